use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Booking, BookingStatus};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingList {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: Booking,
}

impl ApiClient {
    pub async fn my_bookings(&self, filters: &BookingFilters) -> Result<BookingList, ApiError> {
        self.get_with_query("/bookings/my-bookings", filters).await
    }

    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, ApiError> {
        let envelope: BookingEnvelope = self.get(&format!("/bookings/{booking_id}")).await?;
        Ok(envelope.booking)
    }
}
