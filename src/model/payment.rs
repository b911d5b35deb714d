use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::{PaymentProvider, PaymentStatus};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PaymentTransactionDto {
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

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct WebhookAckDto {
    pub received: bool,
    pub reference: String,
}
