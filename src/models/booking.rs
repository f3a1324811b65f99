use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::event::Event;
use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Refunded,
}

/// Stall line-item inside a booking, with the category snapshotted at
/// payment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedStall {
    pub stall_id: String,
    #[serde(default)]
    pub row: Option<i32>,
    #[serde(default)]
    pub column: Option<i32>,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRef {
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The booking's event: populated on detail endpoints, a bare id elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Populated(Box<Event>),
    Id(String),
}

impl EventRef {
    pub fn event(&self) -> Option<&Event> {
        match self {
            EventRef::Populated(event) => Some(event),
            EventRef::Id(_) => None,
        }
    }
}

/// Persisted result of a completed payment. Created by the backend; the
/// client only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    pub booking_id: String,
    #[serde(default)]
    pub event_id: Option<EventRef>,
    #[serde(default)]
    pub stalls: Vec<BookedStall>,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
    #[serde(default)]
    pub invoice: Option<InvoiceRef>,
    #[serde(default)]
    pub user_details: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
