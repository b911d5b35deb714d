//! Company factory for creating test client companies.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test companies with customizable fields.
pub struct CompanyFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: String,
    phone: String,
    contact_person: Option<String>,
    is_active: bool,
}

impl<'a> CompanyFactory<'a> {
    /// Creates a new CompanyFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Company {id}"`
    /// - email: `"company{id}@example.com"`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Company {}", id),
            email: format!("company{}@example.com", id),
            phone: format!("+234700{:07}", id),
            contact_person: Some("Jane Contact".to_string()),
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::company::Model, DbErr> {
        let now = Utc::now();
        entity::company::ActiveModel {
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(self.phone),
            address: ActiveValue::Set(None),
            contact_person: ActiveValue::Set(self.contact_person),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active company with default values.
pub async fn create_company(db: &DatabaseConnection) -> Result<entity::company::Model, DbErr> {
    CompanyFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_company_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Company).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let company = create_company(db).await?;

        assert!(company.is_active);
        assert!(company.email.starts_with("company"));

        Ok(())
    }

    #[tokio::test]
    async fn creates_inactive_company() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Company).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let company = CompanyFactory::new(db).name("Acme").active(false).build().await?;

        assert_eq!(company.name, "Acme");
        assert!(!company.is_active);

        Ok(())
    }
}
