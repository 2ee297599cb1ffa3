use std::sync::Arc;

use shared::domain::Customer;

use crate::{
    action::CustomersAction,
    selector::{ident, Memo},
    state::{AppState, CustomersState, LoadStatus},
};

/// Pure transition for the customers slice. `None` means the action leaves
/// the slice untouched and the store keeps the existing reference.
pub(crate) fn reduce(state: &CustomersState, action: &CustomersAction) -> Option<CustomersState> {
    match action {
        CustomersAction::Load { page } => Some(CustomersState {
            page: *page,
            status: LoadStatus::Loading,
            ..state.clone()
        }),
        CustomersAction::Loaded {
            customers,
            total,
            page,
        } => Some(CustomersState {
            customers: Arc::new(customers.clone()),
            total: *total,
            page: *page,
            status: LoadStatus::Loaded,
            ..state.clone()
        }),
        CustomersAction::LoadFailure { .. } => Some(CustomersState {
            status: LoadStatus::Failed,
            ..state.clone()
        }),
        CustomersAction::Select { id } => {
            if state.selected_id == Some(*id) {
                return None;
            }
            Some(CustomersState {
                selected_id: Some(*id),
                ..state.clone()
            })
        }
        CustomersAction::Unselect => {
            if state.selected_id.is_none() {
                return None;
            }
            Some(CustomersState {
                selected_id: None,
                ..state.clone()
            })
        }
        // Mutations never touch the slice directly; the effect layer calls
        // the API and refreshes through a Load/Loaded round trip.
        CustomersAction::Add { .. }
        | CustomersAction::Update { .. }
        | CustomersAction::Remove { .. } => None,
    }
}

pub fn select_customers(state: &AppState) -> Arc<Vec<Customer>> {
    Arc::clone(&state.customers.customers)
}

pub fn select_selected_customer(state: &AppState) -> Option<Customer> {
    let slice = &state.customers;
    let id = slice.selected_id?;
    slice
        .customers
        .iter()
        .find(|customer| customer.id == id)
        .cloned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedCustomers {
    pub customers: Arc<Vec<Customer>>,
    pub page: u32,
    pub total: u32,
}

/// Composed projection over the customers slice, recomputed only when the
/// customer list reference, page, or total change; selecting a customer
/// does not invalidate it.
pub struct PagedCustomersSelector {
    memo: Memo<PagedCustomers>,
}

impl PagedCustomersSelector {
    pub fn new() -> Self {
        Self { memo: Memo::new() }
    }

    pub fn select(&self, state: &AppState) -> Arc<PagedCustomers> {
        let slice = &state.customers;
        let keys = [
            ident(&slice.customers),
            slice.page as usize,
            slice.total as usize,
        ];
        self.memo.recall(&keys, || PagedCustomers {
            customers: Arc::clone(&slice.customers),
            page: slice.page,
            total: slice.total,
        })
    }
}

impl Default for PagedCustomersSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/customers_tests.rs"]
mod tests;
