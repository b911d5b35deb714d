use sea_orm::DatabaseConnection;

use crate::server::{data::stats::StatsRepository, error::AppError, model::stats::Stats};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn dashboard(&self) -> Result<Stats, AppError> {
        StatsRepository::new(self.db).collect().await
    }
}
