use serde::{Deserialize, Serialize};

/// Per-region case counts as published by the stats feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalRecord {
    pub loc: String,
    pub confirmed_cases_indian: u64,
    pub confirmed_cases_foreign: u64,
    pub discharged: u64,
    pub deaths: u64,
    pub total_confirmed: u64,
}

/// Nationwide aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub total: u64,
    pub confirmed_cases_indian: u64,
    pub confirmed_cases_foreign: u64,
    pub discharged: u64,
    pub deaths: u64,
    pub confirmed_but_location_unidentified: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedData {
    pub summary: SummaryRecord,
    pub regional: Vec<RegionalRecord>,
}

/// Full envelope returned by the stats feed. This is also the shape of the
/// document written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(default)]
    pub success: bool,
    pub data: FeedData,
    #[serde(default)]
    pub last_refreshed: String,
    #[serde(default)]
    pub last_origin_update: String,
}

/// Reverse geocoder reply; only the state is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressResponse {
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub state: Option<String>,
}
