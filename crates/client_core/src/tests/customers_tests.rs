use super::*;
use chrono::NaiveDate;
use shared::domain::CustomerId;

fn customer(id: i64, firstname: &str, name: &str) -> Customer {
    Customer {
        id: CustomerId(id),
        firstname: firstname.into(),
        name: name.into(),
        country: "AT".into(),
        birthdate: NaiveDate::from_ymd_opt(1980, 5, 1).expect("date"),
    }
}

fn loaded_slice() -> CustomersState {
    CustomersState {
        customers: Arc::new(vec![
            customer(1, "Anna", "Aigner"),
            customer(2, "Bernhard", "Bauer"),
        ]),
        page: 1,
        total: 2,
        selected_id: None,
        status: LoadStatus::Loaded,
    }
}

#[test]
fn load_marks_loading_and_moves_page_without_touching_the_list() {
    let slice = loaded_slice();
    let next = reduce(&slice, &CustomersAction::Load { page: 2 }).expect("changed");

    assert_eq!(next.page, 2);
    assert_eq!(next.status, LoadStatus::Loading);
    assert_eq!(next.total, 2);
    assert!(Arc::ptr_eq(&slice.customers, &next.customers));
}

#[test]
fn loaded_replaces_list_total_and_page() {
    let slice = loaded_slice();
    let next = reduce(
        &slice,
        &CustomersAction::Loaded {
            customers: vec![customer(7, "Clara", "Christ")],
            total: 11,
            page: 3,
        },
    )
    .expect("changed");

    assert_eq!(next.customers.len(), 1);
    assert_eq!(next.total, 11);
    assert_eq!(next.page, 3);
    assert_eq!(next.status, LoadStatus::Loaded);
}

#[test]
fn load_failure_marks_the_slice_failed() {
    let slice = loaded_slice();
    let next = reduce(
        &slice,
        &CustomersAction::LoadFailure {
            message: "backend unavailable".into(),
        },
    )
    .expect("changed");

    assert_eq!(next.status, LoadStatus::Failed);
    assert!(Arc::ptr_eq(&slice.customers, &next.customers));
}

#[test]
fn selecting_the_selected_customer_is_identity() {
    let slice = CustomersState {
        selected_id: Some(CustomerId(2)),
        ..loaded_slice()
    };
    assert!(reduce(&slice, &CustomersAction::Select { id: CustomerId(2) }).is_none());

    let next = reduce(&slice, &CustomersAction::Select { id: CustomerId(1) }).expect("changed");
    assert_eq!(next.selected_id, Some(CustomerId(1)));
}

#[test]
fn unselect_without_selection_is_identity() {
    let slice = loaded_slice();
    assert!(reduce(&slice, &CustomersAction::Unselect).is_none());
}

#[test]
fn mutations_never_touch_the_slice_directly() {
    let slice = loaded_slice();
    assert!(reduce(
        &slice,
        &CustomersAction::Add {
            customer: customer(9, "Doris", "Dorn")
        }
    )
    .is_none());
    assert!(reduce(&slice, &CustomersAction::Remove { id: CustomerId(1) }).is_none());
}

#[test]
fn selected_customer_is_looked_up_in_the_list() {
    let state = AppState {
        customers: Arc::new(CustomersState {
            selected_id: Some(CustomerId(2)),
            ..loaded_slice()
        }),
        ..AppState::default()
    };

    let selected = select_selected_customer(&state).expect("selected");
    assert_eq!(selected.full_name(), "Bernhard Bauer");

    let unselected = AppState {
        customers: Arc::new(loaded_slice()),
        ..AppState::default()
    };
    assert!(select_selected_customer(&unselected).is_none());
}

#[test]
fn paged_customers_is_stable_across_selection_changes() {
    let selector = PagedCustomersSelector::new();
    let state = AppState {
        customers: Arc::new(loaded_slice()),
        ..AppState::default()
    };

    let first = selector.select(&state);

    let selected = AppState {
        customers: Arc::new(
            reduce(
                &state.customers,
                &CustomersAction::Select { id: CustomerId(1) },
            )
            .expect("changed"),
        ),
        ..state.clone()
    };
    let second = selector.select(&selected);

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn paged_customers_keeps_the_list_reference_when_only_page_moves() {
    let selector = PagedCustomersSelector::new();
    let state = AppState {
        customers: Arc::new(loaded_slice()),
        ..AppState::default()
    };

    let before = selector.select(&state);

    let paging = AppState {
        customers: Arc::new(
            reduce(&state.customers, &CustomersAction::Load { page: 2 }).expect("changed"),
        ),
        ..state.clone()
    };
    let after = selector.select(&paging);

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(Arc::ptr_eq(&before.customers, &after.customers));
    assert_eq!(before.total, after.total);
    assert_eq!(after.page, 2);
}
