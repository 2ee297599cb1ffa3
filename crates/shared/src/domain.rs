use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CustomerId);
id_newtype!(HolidayId);
id_newtype!(BookingId);
id_newtype!(UserId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Cancelled,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub firstname: String,
    pub name: String,
    pub country: String,
    pub birthdate: NaiveDate,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub title: String,
    pub teaser: String,
    pub description: String,
    pub image_url: String,
    pub min_persons: u32,
    pub max_persons: u32,
    pub sold_out: bool,
}

/// `holiday_id` is a plain foreign-key-like field; nothing at this layer
/// enforces that the referenced holiday exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub holiday_id: HolidayId,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub anonymous: bool,
}
