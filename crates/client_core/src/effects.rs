//! Effect tasks: each one watches the live action stream, filters for the
//! action variants it owns, performs async work against an API seam, and
//! dispatches follow-up actions. A failed call becomes a failure action and
//! the task keeps serving; it never dies with its stream.

use std::sync::Arc;

use serde::Serialize;
use storage::Storage;
use tokio::sync::{broadcast, watch};
use tracing::warn;

use crate::{
    action::{Action, BookingsAction, CustomersAction, HolidaysAction, MasterAction},
    api::{BookingsApi, CustomersApi, HolidaysApi, MasterDataApi},
    customers::select_selected_customer,
    state::{AppState, CUSTOMERS_SLICE, HOLIDAYS_SLICE, MASTER_SLICE, SECURITY_SLICE},
    store::StoreHandle,
};

/// Receives the next action, riding out lag on the broadcast channel. A
/// slow effect skips actions; it does not terminate.
async fn next_action(actions: &mut broadcast::Receiver<Action>) -> Option<Action> {
    loop {
        match actions.recv().await {
            Ok(action) => return Some(action),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "effect lagged behind the action stream");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

pub(crate) async fn customers_load(
    handle: StoreHandle,
    mut actions: broadcast::Receiver<Action>,
    api: Arc<dyn CustomersApi>,
) {
    while let Some(action) = next_action(&mut actions).await {
        let Action::Customers(CustomersAction::Load { page }) = action else {
            continue;
        };
        match api.page(page).await {
            Ok(loaded) => handle.dispatch(CustomersAction::Loaded {
                customers: loaded.content,
                total: loaded.total,
                page: loaded.page,
            }),
            Err(err) => {
                warn!(page, error = %err, "customers load failed");
                handle.dispatch(CustomersAction::LoadFailure {
                    message: err.to_string(),
                });
            }
        }
    }
}

pub(crate) async fn customers_mutate(
    handle: StoreHandle,
    mut actions: broadcast::Receiver<Action>,
    api: Arc<dyn CustomersApi>,
) {
    while let Some(action) = next_action(&mut actions).await {
        let result = match &action {
            Action::Customers(CustomersAction::Add { customer }) => api.add(customer).await,
            Action::Customers(CustomersAction::Update { customer }) => api.update(customer).await,
            Action::Customers(CustomersAction::Remove { id }) => api.remove(*id).await,
            _ => continue,
        };
        match result {
            // The canonical list lives on the server; refresh from the
            // first page after every mutation.
            Ok(()) => handle.dispatch(CustomersAction::Load { page: 1 }),
            Err(err) => {
                warn!(action = action.name(), error = %err, "customer mutation failed");
                handle.dispatch(CustomersAction::LoadFailure {
                    message: err.to_string(),
                });
            }
        }
    }
}

pub(crate) async fn holidays_load(
    handle: StoreHandle,
    mut actions: broadcast::Receiver<Action>,
    api: Arc<dyn HolidaysApi>,
) {
    while let Some(action) = next_action(&mut actions).await {
        let Action::Holidays(HolidaysAction::Load) = action else {
            continue;
        };
        match api.load().await {
            Ok(holidays) => handle.dispatch(HolidaysAction::Loaded { holidays }),
            Err(err) => {
                warn!(error = %err, "holidays load failed");
                handle.dispatch(HolidaysAction::LoadFailure {
                    message: err.to_string(),
                });
            }
        }
    }
}

pub(crate) async fn bookings_load(
    handle: StoreHandle,
    mut actions: broadcast::Receiver<Action>,
    api: Arc<dyn BookingsApi>,
) {
    while let Some(action) = next_action(&mut actions).await {
        let Action::Bookings(BookingsAction::Load) = action else {
            continue;
        };
        // Latest-state join: the load is keyed off whichever customer is
        // selected at the moment the action is observed. Without a
        // selection there is nothing to load.
        let state = handle.state();
        let Some(customer) = select_selected_customer(&state) else {
            continue;
        };
        match api.for_customer(customer.id).await {
            Ok(bookings) => handle.dispatch(BookingsAction::Loaded { bookings }),
            Err(err) => {
                warn!(customer_id = customer.id.0, error = %err, "bookings load failed");
                handle.dispatch(BookingsAction::LoadFailure {
                    message: err.to_string(),
                });
            }
        }
    }
}

pub(crate) async fn master_load(
    handle: StoreHandle,
    mut actions: broadcast::Receiver<Action>,
    api: Arc<dyn MasterDataApi>,
) {
    while let Some(action) = next_action(&mut actions).await {
        let Action::Master(MasterAction::Load) = action else {
            continue;
        };
        match api.countries().await {
            Ok(countries) => handle.dispatch(MasterAction::Loaded { countries }),
            Err(err) => {
                warn!(error = %err, "master data load failed");
                handle.dispatch(MasterAction::LoadFailure {
                    message: err.to_string(),
                });
            }
        }
    }
}

/// Saves persisted slices whenever their identity changes. Persistence sits
/// off the dispatch path: a storage failure is logged and the state stays
/// authoritative in memory.
pub(crate) async fn persist_slices(mut states: watch::Receiver<AppState>, storage: Storage) {
    let mut last = states.borrow().clone();
    while states.changed().await.is_ok() {
        let current = states.borrow_and_update().clone();
        if !Arc::ptr_eq(&last.customers, &current.customers) {
            save(&storage, CUSTOMERS_SLICE, current.customers.as_ref()).await;
        }
        if !Arc::ptr_eq(&last.holidays, &current.holidays) {
            save(&storage, HOLIDAYS_SLICE, current.holidays.as_ref()).await;
        }
        if !Arc::ptr_eq(&last.security, &current.security) {
            save(&storage, SECURITY_SLICE, current.security.as_ref()).await;
        }
        if !Arc::ptr_eq(&last.master, &current.master) {
            save(&storage, MASTER_SLICE, current.master.as_ref()).await;
        }
        last = current;
    }
}

async fn save<T: Serialize>(storage: &Storage, slice: &str, value: &T) {
    if let Err(err) = storage.save_slice(slice, value).await {
        warn!(slice, error = %err, "failed to persist slice");
    }
}
