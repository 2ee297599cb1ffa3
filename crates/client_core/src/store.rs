use std::sync::Arc;

use anyhow::{Context, Result};
use storage::Storage;
use tokio::{
    sync::{broadcast, mpsc, watch},
    task::JoinHandle,
};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};
use tracing::{debug, warn};

use crate::{
    action::Action,
    api::{
        BookingsApi, CustomersApi, HolidaysApi, MasterDataApi, MissingCustomersApi,
        MissingHolidaysApi, StaticBookingsApi, StaticMasterDataApi,
    },
    bookings, customers, effects, holidays, master, security,
    state::{
        AppState, CustomersState, HolidaysState, MasterState, SecurityState, CUSTOMERS_SLICE,
        HOLIDAYS_SLICE, MASTER_SLICE, SECURITY_SLICE,
    },
};

const ACTION_CHANNEL_CAPACITY: usize = 256;

/// Root transition: routes the action to the owning slice reducer and swaps
/// only that slice. Every other slice keeps its reference identity.
fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::Customers(action) => {
            if let Some(slice) = customers::reduce(&state.customers, action) {
                next.customers = Arc::new(slice);
            }
        }
        Action::Holidays(action) => {
            if let Some(slice) = holidays::reduce(&state.holidays, action) {
                next.holidays = Arc::new(slice);
            }
        }
        Action::Bookings(action) => {
            if let Some(slice) = bookings::reduce(&state.bookings, action) {
                next.bookings = Arc::new(slice);
            }
        }
        Action::Security(action) => {
            if let Some(slice) = security::reduce(&state.security, action) {
                next.security = Arc::new(slice);
            }
        }
        Action::Master(action) => {
            if let Some(slice) = master::reduce(&state.master, action) {
                next.master = Arc::new(slice);
            }
        }
    }
    next
}

/// Cloneable handle onto a running store.
#[derive(Clone)]
pub struct StoreHandle {
    actions_tx: mpsc::UnboundedSender<Action>,
    action_events: broadcast::Sender<Action>,
    state_rx: watch::Receiver<AppState>,
}

impl StoreHandle {
    /// Queues an action for the dispatch loop. Actions are reduced strictly
    /// in dispatch order; effects observe an action only after its state
    /// transition has been published.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        if let Err(err) = self.actions_tx.send(action) {
            warn!(action = err.0.name(), "store is shut down; dropping action");
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state_rx.borrow().clone()
    }

    /// Live stream of actions, emitted after their reduction.
    pub fn subscribe_actions(&self) -> broadcast::Receiver<Action> {
        self.action_events.subscribe()
    }

    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.state_rx.clone()
    }

    /// Live stream of a selector's projection. The current projection is
    /// yielded immediately; afterwards a value is yielded per state
    /// transition, deduplicated by reference identity.
    pub fn select_stream<T, F>(&self, mut select: F) -> impl Stream<Item = Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnMut(&AppState) -> Arc<T> + Send + 'static,
    {
        let mut last: Option<Arc<T>> = None;
        WatchStream::new(self.state_rx.clone()).filter_map(move |state| {
            let value = select(&state);
            if let Some(previous) = &last {
                if Arc::ptr_eq(previous, &value) {
                    return None;
                }
            }
            last = Some(Arc::clone(&value));
            Some(value)
        })
    }
}

/// The running store: dispatch loop plus effect tasks.
pub struct Store {
    handle: StoreHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    /// Stops the dispatch loop and every effect task. In-memory state is
    /// gone afterwards; persisted slices survive in storage.
    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

pub struct StoreBuilder {
    storage: Option<Storage>,
    customers_api: Arc<dyn CustomersApi>,
    holidays_api: Arc<dyn HolidaysApi>,
    bookings_api: Arc<dyn BookingsApi>,
    master_api: Arc<dyn MasterDataApi>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            customers_api: Arc::new(MissingCustomersApi),
            holidays_api: Arc::new(MissingHolidaysApi),
            bookings_api: Arc::new(StaticBookingsApi::default()),
            master_api: Arc::new(StaticMasterDataApi::default()),
        }
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_customers_api(mut self, api: Arc<dyn CustomersApi>) -> Self {
        self.customers_api = api;
        self
    }

    pub fn with_holidays_api(mut self, api: Arc<dyn HolidaysApi>) -> Self {
        self.holidays_api = api;
        self
    }

    pub fn with_bookings_api(mut self, api: Arc<dyn BookingsApi>) -> Self {
        self.bookings_api = api;
        self
    }

    pub fn with_master_data_api(mut self, api: Arc<dyn MasterDataApi>) -> Self {
        self.master_api = api;
        self
    }

    /// Rehydrates persisted slices, then spawns the dispatch loop and the
    /// effect tasks. Effect subscriptions are created before this returns,
    /// so an action dispatched right after `build` cannot be missed.
    pub async fn build(self) -> Result<Store> {
        let mut initial = AppState::default();
        if let Some(storage) = &self.storage {
            rehydrate(storage, &mut initial).await?;
        }

        let (actions_tx, mut actions_rx) = mpsc::unbounded_channel::<Action>();
        let (state_tx, state_rx) = watch::channel(initial);
        let (action_events, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);

        let handle = StoreHandle {
            actions_tx,
            action_events: action_events.clone(),
            state_rx,
        };

        let dispatch_task = tokio::spawn(async move {
            while let Some(action) = actions_rx.recv().await {
                debug!(action = action.name(), "dispatch");
                let next = {
                    let current = state_tx.borrow();
                    reduce(&current, &action)
                };
                state_tx.send_replace(next);
                let _ = action_events.send(action);
            }
        });

        let mut tasks = vec![dispatch_task];
        tasks.push(tokio::spawn(effects::customers_load(
            handle.clone(),
            handle.subscribe_actions(),
            Arc::clone(&self.customers_api),
        )));
        tasks.push(tokio::spawn(effects::customers_mutate(
            handle.clone(),
            handle.subscribe_actions(),
            Arc::clone(&self.customers_api),
        )));
        tasks.push(tokio::spawn(effects::holidays_load(
            handle.clone(),
            handle.subscribe_actions(),
            Arc::clone(&self.holidays_api),
        )));
        tasks.push(tokio::spawn(effects::bookings_load(
            handle.clone(),
            handle.subscribe_actions(),
            Arc::clone(&self.bookings_api),
        )));
        tasks.push(tokio::spawn(effects::master_load(
            handle.clone(),
            handle.subscribe_actions(),
            Arc::clone(&self.master_api),
        )));
        if let Some(storage) = self.storage {
            tasks.push(tokio::spawn(effects::persist_slices(
                handle.watch(),
                storage,
            )));
        }

        Ok(Store { handle, tasks })
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn rehydrate(storage: &Storage, state: &mut AppState) -> Result<()> {
    if let Some(customers) = storage
        .load_slice::<CustomersState>(CUSTOMERS_SLICE)
        .await
        .context("failed to rehydrate customers slice")?
    {
        state.customers = Arc::new(customers);
    }
    if let Some(holidays) = storage
        .load_slice::<HolidaysState>(HOLIDAYS_SLICE)
        .await
        .context("failed to rehydrate holidays slice")?
    {
        state.holidays = Arc::new(holidays);
    }
    if let Some(security) = storage
        .load_slice::<SecurityState>(SECURITY_SLICE)
        .await
        .context("failed to rehydrate security slice")?
    {
        state.security = Arc::new(security);
    }
    if let Some(master) = storage
        .load_slice::<MasterState>(MASTER_SLICE)
        .await
        .context("failed to rehydrate master slice")?
    {
        state.master = Arc::new(master);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
