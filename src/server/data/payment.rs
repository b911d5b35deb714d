//! Payment transaction data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    model::status::PaymentStatus,
    server::{
        error::AppError,
        model::{
            page::Paginated,
            payment::{PaymentEvent, PaymentFilter, PaymentTransaction},
        },
        util::parse::parse_stored,
    },
};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or updates the transaction identified by `(provider, reference)`.
    ///
    /// A repeated webhook for the same reference overwrites event type, status, amount and
    /// payload while keeping the original creation time. An event that would move a
    /// succeeded transaction elsewhere, or a failed one back to pending, is ignored.
    ///
    /// # Returns
    /// - `Ok(PaymentTransaction)` - The stored transaction
    /// - `Err(AppError::DbErr)` - Database error during lookup or write
    pub async fn upsert(&self, event: PaymentEvent) -> Result<PaymentTransaction, AppError> {
        let now = Utc::now();
        let existing = entity::prelude::PaymentTransaction::find()
            .filter(entity::payment_transaction::Column::Provider.eq(event.provider.as_str()))
            .filter(entity::payment_transaction::Column::Reference.eq(event.reference.as_str()))
            .one(self.db)
            .await?;

        let model = match existing {
            Some(existing) => {
                let current: PaymentStatus = parse_stored(&existing.status)?;
                if !current.can_become(event.status) {
                    tracing::info!(
                        "Ignoring {} event for {} transaction {}",
                        event.status,
                        current,
                        existing.reference
                    );
                    return PaymentTransaction::from_entity(existing);
                }

                let mut active: entity::payment_transaction::ActiveModel = existing.into();
                active.event_type = ActiveValue::Set(event.event_type);
                active.status = ActiveValue::Set(event.status.as_str().to_string());
                active.amount_minor = ActiveValue::Set(event.amount_minor);
                active.currency = ActiveValue::Set(event.currency);
                if event.company_id.is_some() {
                    active.company_id = ActiveValue::Set(event.company_id);
                }
                active.payload = ActiveValue::Set(event.payload);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::payment_transaction::ActiveModel {
                    provider: ActiveValue::Set(event.provider.as_str().to_string()),
                    reference: ActiveValue::Set(event.reference),
                    event_type: ActiveValue::Set(event.event_type),
                    status: ActiveValue::Set(event.status.as_str().to_string()),
                    amount_minor: ActiveValue::Set(event.amount_minor),
                    currency: ActiveValue::Set(event.currency),
                    company_id: ActiveValue::Set(event.company_id),
                    payload: ActiveValue::Set(event.payload),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        PaymentTransaction::from_entity(model)
    }

    /// Gets a page of transactions, most recently updated first.
    pub async fn get_paginated(
        &self,
        filter: &PaymentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<PaymentTransaction>, AppError> {
        let mut query = entity::prelude::PaymentTransaction::find()
            .order_by_desc(entity::payment_transaction::Column::UpdatedAt)
            .order_by_desc(entity::payment_transaction::Column::Id);
        if let Some(provider) = filter.provider {
            query =
                query.filter(entity::payment_transaction::Column::Provider.eq(provider.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::payment_transaction::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let transactions = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(PaymentTransaction::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(transactions, total, page, per_page))
    }
}
