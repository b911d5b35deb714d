//! Aggregate counts for the dashboard.

use std::collections::BTreeMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    model::status::{
        DriverStatus, MatchStatus, PaymentStatus, RequestStatus, VerificationStatus,
    },
    server::{
        data::driver::DriverRepository,
        error::AppError,
        model::{driver::DriverFilter, stats::Stats},
    },
};

pub struct StatsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Collects every dashboard counter. Statuses with no rows are reported as 0.
    pub async fn collect(&self) -> Result<Stats, AppError> {
        let drivers_total = entity::prelude::Driver::find().count(self.db).await?;
        let drivers_active = entity::prelude::Driver::find()
            .filter(entity::driver::Column::Status.eq(DriverStatus::Active.as_str()))
            .count(self.db)
            .await?;
        let drivers_available = DriverRepository::new(self.db)
            .count(&DriverFilter {
                available: Some(true),
                ..Default::default()
            })
            .await?;

        let mut drivers_by_verification_status = BTreeMap::new();
        for status in VerificationStatus::ALL {
            let count = entity::prelude::Driver::find()
                .filter(entity::driver::Column::VerificationStatus.eq(status.as_str()))
                .count(self.db)
                .await?;
            drivers_by_verification_status.insert(status.as_str().to_string(), count);
        }

        let companies_total = entity::prelude::Company::find().count(self.db).await?;
        let companies_active = entity::prelude::Company::find()
            .filter(entity::company::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        let mut requests_by_status = BTreeMap::new();
        for status in RequestStatus::ALL {
            let count = entity::prelude::CompanyRequest::find()
                .filter(entity::company_request::Column::Status.eq(status.as_str()))
                .count(self.db)
                .await?;
            requests_by_status.insert(status.as_str().to_string(), count);
        }

        let mut matches_by_status = BTreeMap::new();
        for status in MatchStatus::ALL {
            let count = entity::prelude::DriverMatch::find()
                .filter(entity::driver_match::Column::Status.eq(status.as_str()))
                .count(self.db)
                .await?;
            matches_by_status.insert(status.as_str().to_string(), count);
        }

        let payments_succeeded = entity::prelude::PaymentTransaction::find()
            .filter(
                entity::payment_transaction::Column::Status.eq(PaymentStatus::Succeeded.as_str()),
            )
            .count(self.db)
            .await?;

        Ok(Stats {
            drivers_total,
            drivers_active,
            drivers_available,
            drivers_by_verification_status,
            companies_total,
            companies_active,
            requests_by_status,
            matches_by_status,
            payments_succeeded,
        })
    }
}
