//! Payment provider webhooks.
//!
//! Each request is authenticated against the provider's signing scheme before its body
//! is parsed, then stored by `(provider, reference)` so redelivered events update the
//! same transaction.

pub mod parse;
pub mod signature;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::status::PaymentProvider,
    server::{
        config::WebhookSecrets,
        data::payment::PaymentRepository,
        error::{auth::AuthError, AppError},
        model::{
            page::Paginated,
            payment::{PaymentFilter, PaymentTransaction},
        },
    },
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    secrets: &'a WebhookSecrets,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, secrets: &'a WebhookSecrets) -> Self {
        Self { db, secrets }
    }

    /// Verifies, parses and stores a webhook delivery.
    ///
    /// # Returns
    /// - `Ok(PaymentTransaction)` - The inserted or updated transaction
    /// - `Err(AuthError::InvalidSignature)` - Secret not configured, header missing or wrong
    /// - `Err(AppError::BadRequest)` - Body could not be parsed
    pub async fn receive(
        &self,
        provider: PaymentProvider,
        headers: &HeaderMap,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<PaymentTransaction, AppError> {
        if !self.verify(provider, headers, body, now) {
            tracing::warn!("Rejected {} webhook with invalid signature", provider);
            return Err(AuthError::InvalidSignature(provider.to_string()).into());
        }

        let event = parse::parse_event(provider, body)?;
        let transaction = PaymentRepository::new(self.db).upsert(event).await?;

        tracing::info!(
            "Stored {} event {} for {} ({})",
            provider,
            transaction.event_type,
            transaction.reference,
            transaction.status
        );

        Ok(transaction)
    }

    pub async fn get_paginated(
        &self,
        filter: PaymentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<PaymentTransaction>, AppError> {
        PaymentRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await
    }

    fn verify(
        &self,
        provider: PaymentProvider,
        headers: &HeaderMap,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> bool {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        match provider {
            PaymentProvider::Paystack => {
                match (&self.secrets.paystack_secret_key, header(signature::PAYSTACK_HEADER)) {
                    (Some(secret), Some(sig)) => signature::verify_paystack(secret, body, sig),
                    _ => false,
                }
            }
            PaymentProvider::Flutterwave => match (
                &self.secrets.flutterwave_secret_hash,
                header(signature::FLUTTERWAVE_HEADER),
            ) {
                (Some(secret), Some(sig)) => signature::verify_flutterwave(secret, sig),
                _ => false,
            },
            PaymentProvider::Stripe => {
                match (&self.secrets.stripe_webhook_secret, header(signature::STRIPE_HEADER)) {
                    (Some(secret), Some(sig)) => {
                        signature::verify_stripe(secret, body, sig, now.timestamp())
                    }
                    _ => false,
                }
            }
        }
    }
}
