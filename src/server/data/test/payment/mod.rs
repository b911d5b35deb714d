use crate::{
    model::status::{PaymentProvider, PaymentStatus},
    server::{
        data::payment::PaymentRepository,
        error::AppError,
        model::payment::{PaymentEvent, PaymentFilter},
    },
};
use entity::prelude::PaymentTransaction;
use test_utils::builder::TestBuilder;

mod upsert;
