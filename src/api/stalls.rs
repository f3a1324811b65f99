use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LockRequest<'a> {
    stall_ids: &'a [String],
    event_id: &'a str,
}

/// A granted hold: the backend reserves the stalls until `expires_at`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockGrant {
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseRequest<'a> {
    event_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedStallRef {
    pub stall_id: String,
}

/// Hold reported by the backend for the current user, used to rehydrate
/// state after a reload. `expires_at` may already be in the past.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveHold {
    #[serde(default)]
    pub locked_stalls: Vec<LockedStallRef>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub async fn lock_stalls(
        &self,
        stall_ids: &[String],
        event_id: &str,
    ) -> Result<LockGrant, ApiError> {
        self.post("/stalls/lock", &LockRequest { stall_ids, event_id })
            .await
    }

    pub async fn release_stalls(&self, event_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .post("/stalls/release", &ReleaseRequest { event_id })
            .await?;
        Ok(())
    }

    pub async fn get_locked_stalls(&self, event_id: &str) -> Result<ActiveHold, ApiError> {
        self.get(&format!("/stalls/locked/{event_id}")).await
    }
}
