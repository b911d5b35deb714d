use std::collections::BTreeMap;

use crate::model::stats::{CompanyStatsDto, DriverStatsDto, StatsDto};

/// Dashboard counters keyed by stored status value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub drivers_total: u64,
    pub drivers_active: u64,
    pub drivers_available: u64,
    pub drivers_by_verification_status: BTreeMap<String, u64>,
    pub companies_total: u64,
    pub companies_active: u64,
    pub requests_by_status: BTreeMap<String, u64>,
    pub matches_by_status: BTreeMap<String, u64>,
    pub payments_succeeded: u64,
}

impl Stats {
    pub fn into_dto(self) -> StatsDto {
        StatsDto {
            drivers: DriverStatsDto {
                total: self.drivers_total,
                active: self.drivers_active,
                available: self.drivers_available,
                by_verification_status: self.drivers_by_verification_status,
            },
            companies: CompanyStatsDto {
                total: self.companies_total,
                active: self.companies_active,
            },
            requests_by_status: self.requests_by_status,
            matches_by_status: self.matches_by_status,
            payments_succeeded: self.payments_succeeded,
        }
    }
}
