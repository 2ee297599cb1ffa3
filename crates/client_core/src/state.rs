use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::domain::{Booking, Customer, CustomerId, Holiday, HolidayId, User};

pub const CUSTOMERS_SLICE: &str = "customers";
pub const HOLIDAYS_SLICE: &str = "holidays";
pub const SECURITY_SLICE: &str = "security";
pub const MASTER_SLICE: &str = "master";

/// Slice keys persisted across restarts. Bookings are deliberately absent:
/// they are re-fetched per selected customer.
pub const PERSISTED_SLICES: [&str; 4] = [
    CUSTOMERS_SLICE,
    HOLIDAYS_SLICE,
    SECURITY_SLICE,
    MASTER_SLICE,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomersState {
    pub customers: Arc<Vec<Customer>>,
    pub page: u32,
    pub total: u32,
    pub selected_id: Option<CustomerId>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidaysState {
    pub holidays: Arc<Vec<Holiday>>,
    pub favourite_ids: Arc<Vec<HolidayId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingsState {
    pub bookings: Arc<Vec<Booking>>,
    pub loaded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityState {
    pub loaded: bool,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterState {
    pub countries: Arc<Vec<String>>,
    pub loaded: bool,
}

/// Global application state: one immutable slice per feature.
///
/// Slices sit behind `Arc`s so a transition that leaves a slice untouched
/// also leaves its reference identity untouched. Reducers, selector
/// memoization, and the persistence observer all rely on that. Collections
/// inside a slice are `Arc`-wrapped for the same reason: a transition that
/// only moves `page` or `selected_id` keeps the customer list's identity.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub customers: Arc<CustomersState>,
    pub holidays: Arc<HolidaysState>,
    pub bookings: Arc<BookingsState>,
    pub security: Arc<SecurityState>,
    pub master: Arc<MasterState>,
}
