use shared::domain::{Booking, Customer, CustomerId, Holiday, HolidayId, User};

#[derive(Debug, Clone)]
pub enum CustomersAction {
    Load {
        page: u32,
    },
    Loaded {
        customers: Vec<Customer>,
        total: u32,
        page: u32,
    },
    LoadFailure {
        message: String,
    },
    Add {
        customer: Customer,
    },
    Update {
        customer: Customer,
    },
    Remove {
        id: CustomerId,
    },
    Select {
        id: CustomerId,
    },
    Unselect,
}

#[derive(Debug, Clone)]
pub enum HolidaysAction {
    Load,
    Loaded { holidays: Vec<Holiday> },
    LoadFailure { message: String },
    FavouriteAdded { id: HolidayId },
    FavouriteRemoved { id: HolidayId },
}

#[derive(Debug, Clone)]
pub enum BookingsAction {
    Load,
    Loaded { bookings: Vec<Booking> },
    LoadFailure { message: String },
}

#[derive(Debug, Clone)]
pub enum SecurityAction {
    SignedIn { user: User },
    SignedOut,
}

#[derive(Debug, Clone)]
pub enum MasterAction {
    Load,
    Loaded { countries: Vec<String> },
    LoadFailure { message: String },
}

/// An immutable record describing an intent or event. Actions carry data
/// only; every state transition they cause lives in a reducer.
#[derive(Debug, Clone)]
pub enum Action {
    Customers(CustomersAction),
    Holidays(HolidaysAction),
    Bookings(BookingsAction),
    Security(SecurityAction),
    Master(MasterAction),
}

impl Action {
    /// Stable `feature/event` label used in structured logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Customers(action) => match action {
                CustomersAction::Load { .. } => "customers/load",
                CustomersAction::Loaded { .. } => "customers/loaded",
                CustomersAction::LoadFailure { .. } => "customers/load-failure",
                CustomersAction::Add { .. } => "customers/add",
                CustomersAction::Update { .. } => "customers/update",
                CustomersAction::Remove { .. } => "customers/remove",
                CustomersAction::Select { .. } => "customers/select",
                CustomersAction::Unselect => "customers/unselect",
            },
            Action::Holidays(action) => match action {
                HolidaysAction::Load => "holidays/load",
                HolidaysAction::Loaded { .. } => "holidays/loaded",
                HolidaysAction::LoadFailure { .. } => "holidays/load-failure",
                HolidaysAction::FavouriteAdded { .. } => "holidays/favourite-added",
                HolidaysAction::FavouriteRemoved { .. } => "holidays/favourite-removed",
            },
            Action::Bookings(action) => match action {
                BookingsAction::Load => "bookings/load",
                BookingsAction::Loaded { .. } => "bookings/loaded",
                BookingsAction::LoadFailure { .. } => "bookings/load-failure",
            },
            Action::Security(action) => match action {
                SecurityAction::SignedIn { .. } => "security/signed-in",
                SecurityAction::SignedOut => "security/signed-out",
            },
            Action::Master(action) => match action {
                MasterAction::Load => "master/load",
                MasterAction::Loaded { .. } => "master/loaded",
                MasterAction::LoadFailure { .. } => "master/load-failure",
            },
        }
    }
}

impl From<CustomersAction> for Action {
    fn from(action: CustomersAction) -> Self {
        Action::Customers(action)
    }
}

impl From<HolidaysAction> for Action {
    fn from(action: HolidaysAction) -> Self {
        Action::Holidays(action)
    }
}

impl From<BookingsAction> for Action {
    fn from(action: BookingsAction) -> Self {
        Action::Bookings(action)
    }
}

impl From<SecurityAction> for Action {
    fn from(action: SecurityAction) -> Self {
        Action::Security(action)
    }
}

impl From<MasterAction> for Action {
    fn from(action: MasterAction) -> Self {
        Action::Master(action)
    }
}
