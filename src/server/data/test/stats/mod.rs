use crate::server::{data::stats::StatsRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod collect;
