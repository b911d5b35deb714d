use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct DriverStatsDto {
    pub total: u64,
    pub active: u64,
    pub available: u64,
    pub by_verification_status: BTreeMap<String, u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct CompanyStatsDto {
    pub total: u64,
    pub active: u64,
}

/// Dashboard counters.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct StatsDto {
    pub drivers: DriverStatsDto,
    pub companies: CompanyStatsDto,
    pub requests_by_status: BTreeMap<String, u64>,
    pub matches_by_status: BTreeMap<String, u64>,
    pub payments_succeeded: u64,
}
