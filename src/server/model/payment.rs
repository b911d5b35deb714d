use chrono::{DateTime, Utc};

use crate::{
    model::{
        payment::PaymentTransactionDto,
        status::{PaymentProvider, PaymentStatus},
    },
    server::{error::AppError, util::parse::parse_stored},
};

#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    pub id: i32,
    pub provider: PaymentProvider,
    pub reference: String,
    pub event_type: String,
    pub status: PaymentStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub company_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn from_entity(entity: entity::payment_transaction::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            provider: parse_stored(&entity.provider)?,
            reference: entity.reference,
            event_type: entity.event_type,
            status: parse_stored(&entity.status)?,
            amount_minor: entity.amount_minor,
            currency: entity.currency,
            company_id: entity.company_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> PaymentTransactionDto {
        PaymentTransactionDto {
            id: self.id,
            provider: self.provider,
            reference: self.reference,
            event_type: self.event_type,
            status: self.status,
            amount_minor: self.amount_minor,
            currency: self.currency,
            company_id: self.company_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A provider event normalized from its webhook payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEvent {
    pub provider: PaymentProvider,
    pub reference: String,
    pub event_type: String,
    pub status: PaymentStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub company_id: Option<i32>,
    pub payload: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub provider: Option<PaymentProvider>,
    pub status: Option<PaymentStatus>,
}
