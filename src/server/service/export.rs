//! CSV report exports.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{company::CompanyRepository, driver::DriverRepository, driver_match::DriverMatchRepository},
    error::AppError,
    model::driver::DriverFilter,
    util::csv::CsvWriter,
};

const DRIVER_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "city",
    "status",
    "verification_status",
    "kyc_step",
    "license_number",
    "license_expiry",
    "vehicle_type",
    "vehicle_plate",
    "verified_at",
    "created_at",
];

const COMPANY_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "phone",
    "address",
    "contact_person",
    "is_active",
    "created_at",
];

const MATCH_COLUMNS: &[&str] = &[
    "id",
    "driver_id",
    "company_request_id",
    "status",
    "auto_matched",
    "matched_by",
    "responded_at",
    "created_at",
];

pub struct ExportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn drivers_csv(&self) -> Result<String, AppError> {
        let drivers = DriverRepository::new(self.db)
            .get_all(&DriverFilter::default())
            .await?;

        let mut csv = CsvWriter::with_header(DRIVER_COLUMNS);
        for driver in drivers {
            csv.write_row([
                driver.id.to_string(),
                driver.first_name,
                driver.last_name,
                driver.email,
                driver.phone,
                driver.city.unwrap_or_default(),
                driver.status.to_string(),
                driver.verification_status.to_string(),
                driver.kyc_step.to_string(),
                driver.license_number.unwrap_or_default(),
                date(driver.license_expiry),
                driver.vehicle_type.unwrap_or_default(),
                driver.vehicle_plate.unwrap_or_default(),
                timestamp(driver.verified_at),
                driver.created_at.to_rfc3339(),
            ]);
        }

        Ok(csv.finish())
    }

    pub async fn companies_csv(&self) -> Result<String, AppError> {
        let companies = CompanyRepository::new(self.db).get_all().await?;

        let mut csv = CsvWriter::with_header(COMPANY_COLUMNS);
        for company in companies {
            csv.write_row([
                company.id.to_string(),
                company.name,
                company.email,
                company.phone,
                company.address.unwrap_or_default(),
                company.contact_person.unwrap_or_default(),
                company.is_active.to_string(),
                company.created_at.to_rfc3339(),
            ]);
        }

        Ok(csv.finish())
    }

    pub async fn matches_csv(&self) -> Result<String, AppError> {
        let matches = DriverMatchRepository::new(self.db).get_all().await?;

        let mut csv = CsvWriter::with_header(MATCH_COLUMNS);
        for driver_match in matches {
            csv.write_row([
                driver_match.id.to_string(),
                driver_match.driver_id.to_string(),
                driver_match.company_request_id.to_string(),
                driver_match.status.to_string(),
                driver_match.auto_matched.to_string(),
                driver_match
                    .matched_by
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                timestamp(driver_match.responded_at),
                driver_match.created_at.to_rfc3339(),
            ]);
        }

        Ok(csv.finish())
    }
}

fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}
