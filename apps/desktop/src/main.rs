use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    api::{AddressLookuper, HttpAddressLookuper, HttpCustomersApi, HttpHolidaysApi},
    bookings::BookingDataSelector,
    customers::PagedCustomersSelector,
    holidays::HolidaysWithFavouritesSelector,
    AppState, BookingsAction, CustomersAction, HolidaysAction, LoadStatus, MasterAction,
    SecurityAction, Store, StoreHandle,
};
use shared::domain::{CustomerId, User, UserId};
use storage::Storage;
use tokio::time::timeout;
use url::Url;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Page of the customer list to load.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Open the bookings overview for this customer id.
    #[arg(long)]
    customer: Option<i64>,
    /// Sign in with this e-mail before loading anything.
    #[arg(long)]
    sign_in: Option<String>,
    /// Run an address lookup instead of hitting the store.
    #[arg(long)]
    lookup: Option<String>,
}

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

async fn wait_until(
    handle: &StoreHandle,
    what: &str,
    mut done: impl FnMut(&AppState) -> bool,
) -> Result<AppState> {
    let mut states = handle.watch();
    let wait = async {
        loop {
            {
                let state = states.borrow_and_update().clone();
                if done(&state) {
                    return state;
                }
            }
            if states.changed().await.is_err() {
                return handle.state();
            }
        }
    };
    timeout(LOAD_TIMEOUT, wait)
        .await
        .with_context(|| format!("timed out waiting for {what}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = load_settings();
    tracing::info!(
        api_base_url = %settings.api_base_url,
        database_url = %settings.database_url,
        "client configured"
    );

    if let Some(query) = &args.lookup {
        let lookup_base = Url::parse(&settings.lookup_base_url)
            .context("invalid lookup base url")?;
        let lookuper = HttpAddressLookuper::new(lookup_base);
        if lookuper.lookup(query).await? {
            println!("Brochure sent");
        } else {
            println!("Address not found");
        }
        return Ok(());
    }

    let api_base = Url::parse(&settings.api_base_url).context("invalid api base url")?;
    let storage = Storage::new(&settings.database_url).await?;

    let store = Store::builder()
        .with_storage(storage)
        .with_customers_api(Arc::new(HttpCustomersApi::new(api_base.clone())))
        .with_holidays_api(Arc::new(HttpHolidaysApi::new(api_base)))
        .build()
        .await?;
    let handle = store.handle();

    if let Some(email) = args.sign_in {
        handle.dispatch(SecurityAction::SignedIn {
            user: User {
                id: UserId(1),
                email,
                anonymous: false,
            },
        });
    }

    handle.dispatch(CustomersAction::Load { page: args.page });
    handle.dispatch(HolidaysAction::Load);
    handle.dispatch(MasterAction::Load);

    let state = wait_until(&handle, "the customer list", |state| {
        matches!(
            state.customers.status,
            LoadStatus::Loaded | LoadStatus::Failed
        ) && state.master.loaded
    })
    .await?;

    if state.customers.status == LoadStatus::Failed {
        println!("Customer list could not be loaded; showing last known state.");
    }

    let paged = PagedCustomersSelector::new().select(&state);
    println!("Customers (page {}, {} total):", paged.page, paged.total);
    for customer in paged.customers.iter() {
        println!(
            "  [{}] {} ({})",
            customer.id.0,
            customer.full_name(),
            customer.country
        );
    }

    let holidays = HolidaysWithFavouritesSelector::new().select(&state);
    println!("Holidays:");
    for entry in holidays.iter() {
        let marker = if entry.is_favourite { "*" } else { " " };
        println!("  {marker} {} - {}", entry.holiday.title, entry.holiday.teaser);
    }

    println!("Countries: {}", state.master.countries.join(", "));
    if let Some(user) = &state.security.user {
        println!("Signed in as {}", user.email);
    }

    if let Some(customer_id) = args.customer {
        handle.dispatch(CustomersAction::Select {
            id: CustomerId(customer_id),
        });
        handle.dispatch(BookingsAction::Load);

        let state = wait_until(&handle, "the bookings overview", |state| {
            state.bookings.loaded
        })
        .await?;

        let booking_data = BookingDataSelector::new().select(&state);
        println!("Bookings of {}:", booking_data.customer_name);
        for booking in booking_data.bookings.iter() {
            println!(
                "  holiday {} on {} [{:?}] {}",
                booking.holiday_id.0,
                booking.booking_date,
                booking.status,
                booking.comment
            );
        }
    }

    store.shutdown();
    Ok(())
}
