//! Admin console surface: event/category CRUD, stall layout setup and
//! booking oversight. The backend authorizes these by role; the client just
//! exposes the calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::bookings::{BookingFilters, BookingList};
use super::events::{EventFilters, EventList};
use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, Event, EventDates, EventStatus, Layout, User, Venue};

/// Payload for creating or updating an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<EventDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stall_layout: Option<Layout>,
}

/// One configured cell of the layout. The category is a value snapshot,
/// which is why stall records must tolerate the embedded shape later.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StallAssignment {
    pub stall_id: String,
    pub row: i32,
    pub column: i32,
    pub category: Category,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StallSetup {
    pub active_stalls: Vec<StallAssignment>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_events: i64,
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_bookings: i64,
    #[serde(default)]
    pub total_revenue: i64,
}

#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    stats: DashboardStats,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: Event,
}

// the backend names the list field "userslist"
#[derive(Debug, Deserialize)]
struct UsersListEnvelope {
    #[serde(default)]
    userslist: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

impl ApiClient {
    pub async fn admin_events(&self, filters: &EventFilters) -> Result<EventList, ApiError> {
        self.get_with_query("/admin/events", filters).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        let envelope: EventEnvelope = self.post("/admin/events", draft).await?;
        Ok(envelope.event)
    }

    pub async fn update_event(&self, event_id: &str, draft: &EventDraft) -> Result<Event, ApiError> {
        let envelope: EventEnvelope = self.put(&format!("/admin/events/{event_id}"), draft).await?;
        Ok(envelope.event)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/events/delete/{event_id}")).await?;
        Ok(())
    }

    /// Replaces the active-stall configuration of an event's grid.
    pub async fn setup_event_stalls(
        &self,
        event_id: &str,
        setup: &StallSetup,
    ) -> Result<(), ApiError> {
        let _: Value = self
            .post(&format!("/admin/events/{event_id}/stalls"), setup)
            .await?;
        Ok(())
    }

    pub async fn admin_bookings(&self, filters: &BookingFilters) -> Result<BookingList, ApiError> {
        self.get_with_query("/admin/bookings", filters).await
    }

    pub async fn admin_dashboard(&self) -> Result<DashboardStats, ApiError> {
        let envelope: DashboardEnvelope = self.get("/admin/dashboard").await?;
        Ok(envelope.stats)
    }

    /// Every registered user; role and verification filtering happens
    /// client-side.
    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: UsersListEnvelope = self.get("/admin/users/list").await?;
        Ok(envelope.userslist)
    }

    pub async fn admin_user(&self, user_id: &str) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get(&format!("/admin/user/{user_id}")).await?;
        Ok(envelope.user)
    }
}
