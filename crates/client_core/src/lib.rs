//! Headless state core for the travel-booking client.
//!
//! One global store holds an immutable slice per feature. Components (or the
//! driver binary) dispatch actions; reducers compute the next state
//! synchronously in dispatch order; effect tasks watch the action stream,
//! perform async API work keyed off current state, and dispatch follow-up
//! actions; memoized selectors project the state for consumers.

pub mod action;
pub mod api;
pub mod bookings;
pub mod customers;
mod effects;
pub mod holidays;
pub mod master;
pub mod security;
pub mod selector;
pub mod state;
pub mod store;

pub use action::{
    Action, BookingsAction, CustomersAction, HolidaysAction, MasterAction, SecurityAction,
};
pub use state::{AppState, LoadStatus};
pub use store::{Store, StoreBuilder, StoreHandle};
