use super::*;
use chrono::NaiveDate;
use shared::domain::{BookingId, BookingStatus, Customer, CustomerId, HolidayId};

use crate::{
    action::CustomersAction,
    customers,
    state::{CustomersState, HolidaysState},
};

fn booking(id: i64) -> Booking {
    Booking {
        id: BookingId(id),
        holiday_id: HolidayId(1),
        booking_date: NaiveDate::from_ymd_opt(2022, 2, 2).expect("date"),
        status: BookingStatus::Pending,
        comment: String::new(),
    }
}

fn customer(id: i64, firstname: &str, name: &str) -> Customer {
    Customer {
        id: CustomerId(id),
        firstname: firstname.into(),
        name: name.into(),
        country: "AT".into(),
        birthdate: NaiveDate::from_ymd_opt(1975, 9, 22).expect("date"),
    }
}

#[test]
fn loaded_sets_list_and_flag() {
    let next = reduce(
        &BookingsState::default(),
        &BookingsAction::Loaded {
            bookings: vec![booking(1), booking(2)],
        },
    )
    .expect("changed");

    assert!(next.loaded);
    assert_eq!(next.bookings.len(), 2);
}

#[test]
fn load_and_failure_are_identity() {
    let slice = BookingsState::default();
    assert!(reduce(&slice, &BookingsAction::Load).is_none());
    assert!(reduce(
        &slice,
        &BookingsAction::LoadFailure {
            message: "offline".into()
        }
    )
    .is_none());
}

#[test]
fn booking_data_names_the_selected_customer() {
    let selector = BookingDataSelector::new();
    let state = AppState {
        customers: Arc::new(CustomersState {
            customers: Arc::new(vec![customer(1, "Anna", "Aigner")]),
            selected_id: Some(CustomerId(1)),
            ..CustomersState::default()
        }),
        bookings: Arc::new(BookingsState {
            bookings: Arc::new(vec![booking(1)]),
            loaded: true,
        }),
        ..AppState::default()
    };

    let data = selector.select(&state);
    assert_eq!(data.customer_name, "Anna Aigner");
    assert!(data.loaded);
    assert_eq!(data.bookings.len(), 1);
}

#[test]
fn booking_data_is_empty_before_any_load() {
    let selector = BookingDataSelector::new();
    let data = selector.select(&AppState::default());
    assert_eq!(data.customer_name, "");
    assert!(!data.loaded);
    assert!(data.bookings.is_empty());
}

#[test]
fn booking_data_ignores_unrelated_slice_changes() {
    let selector = BookingDataSelector::new();
    let state = AppState {
        customers: Arc::new(CustomersState {
            customers: Arc::new(vec![customer(1, "Anna", "Aigner")]),
            selected_id: Some(CustomerId(1)),
            ..CustomersState::default()
        }),
        ..AppState::default()
    };

    let first = selector.select(&state);

    let holidays_changed = AppState {
        holidays: Arc::new(HolidaysState::default()),
        ..state.clone()
    };
    let second = selector.select(&holidays_changed);
    assert!(Arc::ptr_eq(&first, &second));

    let reselected = AppState {
        customers: Arc::new(CustomersState {
            selected_id: None,
            ..state.customers.as_ref().clone()
        }),
        ..state.clone()
    };
    let third = selector.select(&reselected);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.customer_name, "");
}

#[test]
fn selecting_a_different_customer_recomputes_the_name() {
    let selector = BookingDataSelector::new();
    let base = CustomersState {
        customers: Arc::new(vec![
            customer(1, "Anna", "Aigner"),
            customer(2, "Bernhard", "Bauer"),
        ]),
        selected_id: Some(CustomerId(1)),
        ..CustomersState::default()
    };
    let state = AppState {
        customers: Arc::new(base.clone()),
        ..AppState::default()
    };
    let first = selector.select(&state);
    assert_eq!(first.customer_name, "Anna Aigner");

    let switched = AppState {
        customers: Arc::new(
            customers::reduce(&base, &CustomersAction::Select { id: CustomerId(2) })
                .expect("changed"),
        ),
        ..state.clone()
    };
    let second = selector.select(&switched);
    assert_eq!(second.customer_name, "Bernhard Bauer");
}
