use std::sync::Arc;

use shared::domain::Booking;

use crate::{
    action::BookingsAction,
    customers::select_selected_customer,
    selector::{ident, Memo},
    state::{AppState, BookingsState},
};

pub(crate) fn reduce(_state: &BookingsState, action: &BookingsAction) -> Option<BookingsState> {
    match action {
        BookingsAction::Load | BookingsAction::LoadFailure { .. } => None,
        BookingsAction::Loaded { bookings } => Some(BookingsState {
            bookings: Arc::new(bookings.clone()),
            loaded: true,
        }),
    }
}

pub fn select_bookings(state: &AppState) -> Arc<Vec<Booking>> {
    Arc::clone(&state.bookings.bookings)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingData {
    pub customer_name: String,
    pub loaded: bool,
    pub bookings: Arc<Vec<Booking>>,
}

/// View model for the bookings overview: the selected customer's display
/// name plus their bookings. Composes the customers and bookings slices.
pub struct BookingDataSelector {
    memo: Memo<BookingData>,
}

impl BookingDataSelector {
    pub fn new() -> Self {
        Self { memo: Memo::new() }
    }

    pub fn select(&self, state: &AppState) -> Arc<BookingData> {
        let customers = &state.customers;
        let bookings = &state.bookings;
        let selected_key = match customers.selected_id {
            Some(id) => id.0 as usize,
            None => usize::MAX,
        };
        let keys = [
            ident(&customers.customers),
            selected_key,
            ident(&bookings.bookings),
            bookings.loaded as usize,
        ];
        self.memo.recall(&keys, || BookingData {
            customer_name: select_selected_customer(state)
                .map(|customer| customer.full_name())
                .unwrap_or_default(),
            loaded: bookings.loaded,
            bookings: Arc::clone(&bookings.bookings),
        })
    }
}

impl Default for BookingDataSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/bookings_tests.rs"]
mod tests;
