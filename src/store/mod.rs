//! Booking store: selection state plus the lock coordinator.
//!
//! One store instance is owned per booking session and injected into the
//! views that need it; there is no ambient singleton, so tests can stand
//! up isolated instances. All mutation funnels through the methods here.
//!
//! Lifecycle per (user, event): Idle → Selecting → Locked, where Locked
//! carries the backend-granted hold and a per-second countdown task. The
//! countdown handle lives next to the hold and is aborted on every exit
//! transition, so a stale timer can never fire against cleared state.

pub mod selection;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::Stall;
use selection::Selection;

/// Coarse view of the coordinator's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    Idle,
    Selecting,
    Locked,
}

/// Out-of-band notifications for the owning view. Expiry is deliberately
/// distinct from a manual release so the two can be surfaced differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockNotice {
    Locked {
        stall_ids: Vec<String>,
        expires_at: DateTime<Utc>,
    },
    Tick {
        remaining: Duration,
    },
    Expired,
    Released,
}

/// Snapshot of the active hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldView {
    pub stall_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

struct Hold {
    stall_ids: Vec<String>,
    expires_at: DateTime<Utc>,
    countdown: Option<JoinHandle<()>>,
}

impl Hold {
    fn cancel(mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

#[derive(Default)]
struct Inner {
    selection: Selection,
    hold: Option<Hold>,
    in_flight: bool,
}

pub struct BookingStore {
    api: ApiClient,
    inner: Arc<Mutex<Inner>>,
    notices: UnboundedSender<LockNotice>,
}

impl BookingStore {
    pub fn new(api: ApiClient) -> (Self, UnboundedReceiver<LockNotice>) {
        let (notices, receiver) = mpsc::unbounded_channel();
        (
            Self {
                api,
                inner: Arc::new(Mutex::new(Inner::default())),
                notices,
            },
            receiver,
        )
    }

    pub fn phase(&self) -> LockPhase {
        let inner = self.inner.lock().unwrap();
        if inner.hold.is_some() {
            LockPhase::Locked
        } else if !inner.selection.is_empty() {
            LockPhase::Selecting
        } else {
            LockPhase::Idle
        }
    }

    pub fn selected_stalls(&self) -> Vec<Stall> {
        self.inner.lock().unwrap().selection.stalls().to_vec()
    }

    pub fn total_amount(&self) -> i64 {
        self.inner.lock().unwrap().selection.total_amount()
    }

    pub fn hold_snapshot(&self) -> Option<HoldView> {
        self.inner.lock().unwrap().hold.as_ref().map(|hold| HoldView {
            stall_ids: hold.stall_ids.clone(),
            expires_at: hold.expires_at,
        })
    }

    pub fn has_active_hold(&self) -> bool {
        self.inner.lock().unwrap().hold.is_some()
    }

    /// Replaces the selection wholesale. Ignored while a hold is active.
    pub fn set_selection(&self, stalls: Vec<Stall>) {
        let mut inner = self.inner.lock().unwrap();
        if inner.hold.is_some() {
            return;
        }
        inner.selection.set(stalls);
    }

    /// Toggles one stall. Silently does nothing while a hold is active:
    /// the selection is frozen between lock and release/expiry/booking.
    pub fn toggle(&self, stall: &Stall) {
        let mut inner = self.inner.lock().unwrap();
        if inner.hold.is_some() {
            return;
        }
        inner.selection.toggle(stall);
    }

    pub fn clear_selection(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.hold.is_some() {
            return;
        }
        inner.selection.clear();
    }

    /// Converts the current selection into a backend hold.
    ///
    /// Validation happens before any network call; the selection is never
    /// mutated optimistically, so a rejection (for instance a stall taken
    /// concurrently) leaves the user free to adjust and retry.
    pub async fn lock(&self, event_id: &str) -> Result<DateTime<Utc>, ApiError> {
        let stall_ids = {
            let mut inner = self.inner.lock().unwrap();
            if inner.hold.is_some() {
                return Err(ApiError::Validation(
                    "You already have locked stalls. Proceed to checkout or release them first."
                        .to_string(),
                ));
            }
            if inner.in_flight {
                return Err(ApiError::Validation(
                    "Another request is still in progress.".to_string(),
                ));
            }
            if inner.selection.is_empty() {
                return Err(ApiError::Validation(
                    "Please select at least one stall.".to_string(),
                ));
            }
            inner.in_flight = true;
            inner.selection.stall_ids()
        };

        let result = self.api.lock_stalls(&stall_ids, event_id).await;

        let mut inner = self.inner.lock().unwrap();
        inner.in_flight = false;
        let grant = match result {
            Ok(grant) => grant,
            Err(error) => {
                warn!("failed to lock {} stalls: {error}", stall_ids.len());
                return Err(error);
            }
        };

        let countdown = self.spawn_countdown(grant.expires_at);
        inner.hold = Some(Hold {
            stall_ids: stall_ids.clone(),
            expires_at: grant.expires_at,
            countdown: Some(countdown),
        });
        drop(inner);

        info!(
            "locked {} stalls until {}",
            stall_ids.len(),
            grant.expires_at
        );
        let _ = self.notices.send(LockNotice::Locked {
            stall_ids,
            expires_at: grant.expires_at,
        });
        Ok(grant.expires_at)
    }

    /// Releases the hold. Also discards the in-progress selection: after a
    /// release the user starts picking from scratch.
    pub async fn release(&self, event_id: &str) -> Result<(), ApiError> {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.hold.is_none() {
                return Err(ApiError::Validation(
                    "There are no locked stalls to release.".to_string(),
                ));
            }
            if inner.in_flight {
                return Err(ApiError::Validation(
                    "Another request is still in progress.".to_string(),
                ));
            }
            inner.in_flight = true;
        }

        let result = self.api.release_stalls(event_id).await;

        let mut inner = self.inner.lock().unwrap();
        inner.in_flight = false;
        result?;

        if let Some(hold) = inner.hold.take() {
            hold.cancel();
        }
        inner.selection.clear();
        drop(inner);

        info!("released hold for event {event_id}");
        let _ = self.notices.send(LockNotice::Released);
        Ok(())
    }

    /// Called once on mount to pick up an existing hold after a reload.
    /// A hold whose expiry already passed is ignored: the coordinator must
    /// not enter Locked on stale data. Defers to a lock or release that is
    /// already in flight, so a fresh grant is never clobbered by a stale
    /// backend snapshot.
    pub async fn rehydrate(&self, event_id: &str) -> Result<bool, ApiError> {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.hold.is_some() {
                return Ok(true);
            }
            if inner.in_flight {
                return Ok(false);
            }
            inner.in_flight = true;
        }

        let result = self.api.get_locked_stalls(event_id).await;

        let mut inner = self.inner.lock().unwrap();
        inner.in_flight = false;
        let reported = result?;

        let Some(expires_at) = reported.expires_at else {
            return Ok(false);
        };
        if reported.locked_stalls.is_empty() || expires_at <= Utc::now() {
            return Ok(false);
        }

        let stall_ids: Vec<String> = reported
            .locked_stalls
            .into_iter()
            .map(|s| s.stall_id)
            .collect();

        let countdown = self.spawn_countdown(expires_at);
        inner.hold = Some(Hold {
            stall_ids: stall_ids.clone(),
            expires_at,
            countdown: Some(countdown),
        });
        drop(inner);

        info!("rehydrated hold of {} stalls", stall_ids.len());
        let _ = self.notices.send(LockNotice::Locked {
            stall_ids,
            expires_at,
        });
        Ok(true)
    }

    /// Resets to Idle after checkout reports verified payment. The hold is
    /// consumed by the booking server-side; only the timer needs stopping.
    pub fn finish_checkout(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(hold) = inner.hold.take() {
            hold.cancel();
        }
        inner.selection.clear();
    }

    /// Per-second countdown against the hold's deadline. On expiry the hold
    /// and selection are cleared under the same lock that checks them, so
    /// the Expired notice fires exactly once even if a release raced it.
    fn spawn_countdown(&self, expires_at: DateTime<Utc>) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let notices = self.notices.clone();
        let total = (expires_at - Utc::now()).to_std().unwrap_or_default();
        let deadline = Instant::now() + total;

        tokio::spawn(async move {
            let mut ticker = time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // completes immediately
            loop {
                ticker.tick().await;
                let now = Instant::now();
                if now >= deadline {
                    let expired = {
                        let mut inner = inner.lock().unwrap();
                        match inner.hold.take() {
                            Some(_) => {
                                inner.selection.clear();
                                true
                            }
                            None => false,
                        }
                    };
                    if expired {
                        warn!("stall hold expired");
                        let _ = notices.send(LockNotice::Expired);
                    }
                    return;
                }
                let _ = notices.send(LockNotice::Tick {
                    remaining: deadline - now,
                });
            }
        })
    }
}

impl Drop for BookingStore {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(hold) = inner.hold.take() {
                hold.cancel();
            }
        }
    }
}
