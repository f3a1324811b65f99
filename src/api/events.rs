use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, Event, EventStatus, Layout, Stall, StallRecord};

/// Query parameters for the event listing, matching the backend's
/// status/city/search filters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl EventFilters {
    /// The default browsing view: live events, first page.
    pub fn live(page: u32, limit: u32) -> Self {
        EventFilters {
            status: Some(EventStatus::Live),
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: Event,
}

#[derive(Debug, Deserialize)]
struct StallMapPayload {
    #[serde(default)]
    stalls: Vec<StallRecord>,
    #[serde(default)]
    layout: Layout,
    #[serde(default)]
    categories: Vec<Category>,
}

/// Everything the stall selection screen needs for one event, with every
/// stall's category already resolved to the canonical shape.
#[derive(Debug)]
pub struct StallMap {
    pub stalls: Vec<Stall>,
    pub layout: Layout,
    pub categories: Vec<Category>,
}

impl ApiClient {
    pub async fn list_events(&self, filters: &EventFilters) -> Result<EventList, ApiError> {
        self.get_with_query("/events", filters).await
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event, ApiError> {
        let envelope: EventEnvelope = self.get(&format!("/events/{event_id}")).await?;
        Ok(envelope.event)
    }

    pub async fn get_event_stalls(&self, event_id: &str) -> Result<StallMap, ApiError> {
        let payload: StallMapPayload = self.get(&format!("/events/{event_id}/stalls")).await?;
        let stalls = payload
            .stalls
            .into_iter()
            .map(|record| record.resolve(&payload.categories))
            .collect();
        Ok(StallMap {
            stalls,
            layout: payload.layout,
            categories: payload.categories,
        })
    }
}
