use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use shared::{
    domain::{Booking, BookingId, BookingStatus, Customer, CustomerId, Holiday, HolidayId},
    error::{ApiError, ApiException, ErrorCode},
    protocol::{AddressHit, CustomerPage, HolidaysResponse},
};
use url::Url;

#[async_trait]
pub trait CustomersApi: Send + Sync {
    async fn page(&self, page: u32) -> Result<CustomerPage>;
    async fn add(&self, customer: &Customer) -> Result<()>;
    async fn update(&self, customer: &Customer) -> Result<()>;
    async fn remove(&self, id: CustomerId) -> Result<()>;
}

#[async_trait]
pub trait HolidaysApi: Send + Sync {
    async fn load(&self) -> Result<Vec<Holiday>>;
}

#[async_trait]
pub trait BookingsApi: Send + Sync {
    async fn for_customer(&self, id: CustomerId) -> Result<Vec<Booking>>;
}

#[async_trait]
pub trait MasterDataApi: Send + Sync {
    async fn countries(&self) -> Result<Vec<String>>;
}

#[async_trait]
pub trait AddressLookuper: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<bool>;
}

pub struct MissingCustomersApi;

#[async_trait]
impl CustomersApi for MissingCustomersApi {
    async fn page(&self, page: u32) -> Result<CustomerPage> {
        Err(anyhow!("customers api is not configured (page {page})"))
    }

    async fn add(&self, customer: &Customer) -> Result<()> {
        Err(anyhow!(
            "customers api is not configured (add '{}')",
            customer.full_name()
        ))
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        Err(anyhow!(
            "customers api is not configured (update customer {})",
            customer.id.0
        ))
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        Err(anyhow!(
            "customers api is not configured (remove customer {})",
            id.0
        ))
    }
}

pub struct MissingHolidaysApi;

#[async_trait]
impl HolidaysApi for MissingHolidaysApi {
    async fn load(&self) -> Result<Vec<Holiday>> {
        Err(anyhow!("holidays api is not configured"))
    }
}

/// Turns a non-success response into a typed exception, preferring the
/// error payload's message over the caller's fallback when the API sent one.
async fn rejected(response: reqwest::Response, fallback: impl Into<String>) -> anyhow::Error {
    let status = response.status();
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => fallback.into(),
    };
    ApiException::from_status(status.as_u16(), message).into()
}

pub struct HttpCustomersApi {
    http: Client,
    base_url: Url,
}

impl HttpCustomersApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path '{path}'"))
    }
}

#[async_trait]
impl CustomersApi for HttpCustomersApi {
    async fn page(&self, page: u32) -> Result<CustomerPage> {
        let mut url = self.endpoint("customers")?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("customers page request failed")?;
        if !response.status().is_success() {
            return Err(rejected(response, format!("customers page {page} rejected")).await);
        }

        response
            .json::<CustomerPage>()
            .await
            .context("invalid customers page payload")
    }

    async fn add(&self, customer: &Customer) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("customers")?)
            .json(customer)
            .send()
            .await
            .context("add customer request failed")?;
        if !response.status().is_success() {
            return Err(rejected(response, "add customer rejected").await);
        }
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        let response = self
            .http
            .put(self.endpoint(&format!("customers/{}", customer.id.0))?)
            .json(customer)
            .send()
            .await
            .context("update customer request failed")?;
        if !response.status().is_success() {
            return Err(rejected(
                response,
                format!("update customer {} rejected", customer.id.0),
            )
            .await);
        }
        Ok(())
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("customers/{}", id.0))?)
            .send()
            .await
            .context("remove customer request failed")?;
        if !response.status().is_success() {
            return Err(rejected(response, format!("remove customer {} rejected", id.0)).await);
        }
        Ok(())
    }
}

pub struct HttpHolidaysApi {
    http: Client,
    base_url: Url,
}

impl HttpHolidaysApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl HolidaysApi for HttpHolidaysApi {
    async fn load(&self) -> Result<Vec<Holiday>> {
        let url = self
            .base_url
            .join("holidays")
            .context("invalid holidays endpoint")?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("holidays request failed")?;
        if !response.status().is_success() {
            return Err(rejected(response, "holidays request rejected").await);
        }

        let body = response
            .json::<HolidaysResponse>()
            .await
            .context("invalid holidays payload")?;
        Ok(body.holidays)
    }
}

/// Booking lookups served from a fixed dataset keyed by customer id. A
/// customer without an entry simply has no bookings yet.
pub struct StaticBookingsApi {
    bookings: HashMap<i64, Vec<Booking>>,
}

impl StaticBookingsApi {
    pub fn new(bookings: HashMap<i64, Vec<Booking>>) -> Self {
        Self { bookings }
    }
}

fn booking_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Default for StaticBookingsApi {
    fn default() -> Self {
        let mut bookings = HashMap::new();
        bookings.insert(
            1,
            vec![
                Booking {
                    id: BookingId(1),
                    holiday_id: HolidayId(1),
                    booking_date: booking_date(2022, 2, 2),
                    status: BookingStatus::Pending,
                    comment: "A little bit unsure about the holiday. Let's see".into(),
                },
                Booking {
                    id: BookingId(2),
                    holiday_id: HolidayId(2),
                    booking_date: booking_date(2022, 2, 2),
                    status: BookingStatus::Cancelled,
                    comment: "Seemed to be a little bit stressed out".into(),
                },
            ],
        );
        bookings.insert(
            3,
            vec![Booking {
                id: BookingId(3),
                holiday_id: HolidayId(1),
                booking_date: booking_date(2022, 2, 2),
                status: BookingStatus::Finished,
                comment: "Quite a grumbler. Complains all the time and nothing seems to be \
                          satisfactory."
                    .into(),
            }],
        );
        Self::new(bookings)
    }
}

#[async_trait]
impl BookingsApi for StaticBookingsApi {
    async fn for_customer(&self, id: CustomerId) -> Result<Vec<Booking>> {
        Ok(self.bookings.get(&id.0).cloned().unwrap_or_default())
    }
}

/// Master data ships with the client; there is no remote call to fail.
pub struct StaticMasterDataApi {
    countries: Vec<String>,
}

impl StaticMasterDataApi {
    pub fn new(countries: Vec<String>) -> Self {
        Self { countries }
    }
}

impl Default for StaticMasterDataApi {
    fn default() -> Self {
        Self::new(
            [
                "Austria",
                "Germany",
                "Switzerland",
                "Italy",
                "France",
                "Spain",
            ]
            .map(String::from)
            .to_vec(),
        )
    }
}

#[async_trait]
impl MasterDataApi for StaticMasterDataApi {
    async fn countries(&self) -> Result<Vec<String>> {
        Ok(self.countries.clone())
    }
}

pub struct HttpAddressLookuper {
    http: Client,
    base_url: Url,
}

impl HttpAddressLookuper {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AddressLookuper for HttpAddressLookuper {
    /// An address counts as found when the lookup service returns at least
    /// one hit.
    async fn lookup(&self, query: &str) -> Result<bool> {
        if query.trim().is_empty() {
            return Err(
                ApiException::new(ErrorCode::Validation, "address query must not be empty").into(),
            );
        }

        let mut url = self
            .base_url
            .join("search")
            .context("invalid lookup endpoint")?;
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("q", query);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("address lookup request failed")?;
        if !response.status().is_success() {
            return Err(rejected(response, "address lookup rejected").await);
        }

        let hits = response
            .json::<Vec<AddressHit>>()
            .await
            .context("invalid address lookup payload")?;
        Ok(!hits.is_empty())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
