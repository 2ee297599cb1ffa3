use serde::{Deserialize, Serialize};

use crate::domain::{Customer, Holiday};

/// One page of the customers collection as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPage {
    pub content: Vec<Customer>,
    pub total: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysResponse {
    pub holidays: Vec<Holiday>,
}

/// A single hit from the address lookup endpoint. The endpoint returns a
/// JSON array; an empty array means the address is unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressHit {
    pub display_name: String,
}
