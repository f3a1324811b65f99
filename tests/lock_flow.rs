//! Lock coordinator against a mocked backend: acquire, reject, release,
//! rehydrate.

use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stall_booking::api::ApiClient;
use stall_booking::config::ApiConfig;
use stall_booking::error::ApiError;
use stall_booking::models::{Category, Stall, StallStatus};
use stall_booking::session::Session;
use stall_booking::store::{BookingStore, LockNotice, LockPhase};

mod common;

fn store_for(server: &MockServer) -> (BookingStore, tokio::sync::mpsc::UnboundedReceiver<LockNotice>) {
    common::init_tracing();
    let api = ApiClient::new(
        &ApiConfig {
            base_url: server.uri(),
            timeout_seconds: 5,
            page_size: 12,
        },
        Session::new(),
    );
    BookingStore::new(api)
}

fn stall(id: &str, row: i32, column: i32, price: i64) -> Stall {
    Stall {
        stall_id: id.to_string(),
        row,
        column,
        status: StallStatus::Available,
        category: Some(Category {
            id: None,
            name: "Standard".to_string(),
            price,
            color: None,
            description: None,
        }),
    }
}

#[tokio::test]
async fn locking_freezes_the_selection_until_release() {
    let server = MockServer::start().await;
    let (store, mut notices) = store_for(&server);

    let expires = Utc::now() + Duration::seconds(300);
    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .and(body_json(json!({
            "stallIds": ["R1-C1", "R1-C2"],
            "eventId": "evt1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expiresAt": expires.to_rfc3339()
        })))
        .expect(1)
        .mount(&server)
        .await;

    store.set_selection(vec![stall("R1-C1", 1, 1, 5000), stall("R1-C2", 1, 2, 3000)]);
    assert_eq!(store.total_amount(), 8000);

    let granted = store.lock("evt1").await.unwrap();
    assert_eq!(granted.timestamp(), expires.timestamp());
    assert_eq!(store.phase(), LockPhase::Locked);

    // deselecting after the lock is a no-op
    store.toggle(&stall("R1-C1", 1, 1, 5000));
    assert_eq!(store.selected_stalls().len(), 2);
    assert_eq!(store.total_amount(), 8000);

    assert!(matches!(
        notices.try_recv(),
        Ok(LockNotice::Locked { .. })
    ));
}

#[tokio::test]
async fn rejected_lock_leaves_the_selection_for_another_attempt() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Stall R1-C1 was just taken"
        })))
        .mount(&server)
        .await;

    store.set_selection(vec![stall("R1-C1", 1, 1, 5000)]);
    let error = store.lock("evt1").await.unwrap_err();
    assert!(error.is_conflict());

    // no optimistic mutation, no auto-pruning: the user decides what to drop
    assert_eq!(store.phase(), LockPhase::Selecting);
    assert_eq!(store.selected_stalls().len(), 1);
    assert_eq!(store.total_amount(), 5000);
}

#[tokio::test]
async fn release_clears_hold_and_selection() {
    let server = MockServer::start().await;
    let (store, mut notices) = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expiresAt": (Utc::now() + Duration::seconds(300)).to_rfc3339()
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stalls/release"))
        .and(body_json(json!({"eventId": "evt1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Stalls released"
        })))
        .expect(1)
        .mount(&server)
        .await;

    store.set_selection(vec![stall("R1-C1", 1, 1, 5000)]);
    store.lock("evt1").await.unwrap();
    store.release("evt1").await.unwrap();

    assert_eq!(store.phase(), LockPhase::Idle);
    assert!(store.hold_snapshot().is_none());
    assert!(store.selected_stalls().is_empty());
    assert_eq!(store.total_amount(), 0);

    let mut saw_released = false;
    while let Ok(notice) = notices.try_recv() {
        saw_released |= notice == LockNotice::Released;
    }
    assert!(saw_released);
}

#[tokio::test]
async fn failed_release_keeps_the_hold() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expiresAt": (Utc::now() + Duration::seconds(300)).to_rfc3339()
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stalls/release"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Failed to release stalls"
        })))
        .mount(&server)
        .await;

    store.set_selection(vec![stall("R1-C1", 1, 1, 5000)]);
    store.lock("evt1").await.unwrap();

    let error = store.release("evt1").await.unwrap_err();
    assert!(matches!(error, ApiError::Rejected { status: 500, .. }));
    assert_eq!(store.phase(), LockPhase::Locked);
    assert_eq!(store.selected_stalls().len(), 1);
}

#[tokio::test]
async fn empty_selection_never_reaches_the_backend() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = store.lock("evt1").await.unwrap_err();
    assert!(matches!(error, ApiError::Validation(_)));
}

#[tokio::test]
async fn rehydrate_enters_locked_for_a_future_expiry() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/stalls/locked/evt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lockedStalls": [{"stallId": "R1-C1"}, {"stallId": "R1-C2"}],
            "expiresAt": (Utc::now() + Duration::seconds(120)).to_rfc3339()
        })))
        .mount(&server)
        .await;

    assert!(store.rehydrate("evt1").await.unwrap());
    assert_eq!(store.phase(), LockPhase::Locked);
    let hold = store.hold_snapshot().unwrap();
    assert_eq!(hold.stall_ids, vec!["R1-C1", "R1-C2"]);
}

#[tokio::test]
async fn rehydrate_ignores_a_past_expiry() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/stalls/locked/evt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lockedStalls": [{"stallId": "R1-C1"}],
            "expiresAt": (Utc::now() - Duration::seconds(30)).to_rfc3339()
        })))
        .mount(&server)
        .await;

    assert!(!store.rehydrate("evt1").await.unwrap());
    assert_eq!(store.phase(), LockPhase::Idle);
    assert!(store.hold_snapshot().is_none());
}

#[tokio::test]
async fn rehydrate_with_no_hold_stays_idle() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/stalls/locked/evt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lockedStalls": []
        })))
        .mount(&server)
        .await;

    assert!(!store.rehydrate("evt1").await.unwrap());
    assert_eq!(store.phase(), LockPhase::Idle);
}

#[tokio::test]
async fn lock_still_works_after_an_empty_rehydrate() {
    let server = MockServer::start().await;
    let (store, _notices) = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/stalls/locked/evt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lockedStalls": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stalls/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expiresAt": (Utc::now() + Duration::seconds(300)).to_rfc3339()
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!store.rehydrate("evt1").await.unwrap());

    // the finished rehydrate round-trip must not leave a request marked
    // in flight
    store.set_selection(vec![stall("R1-C1", 1, 1, 5000)]);
    store.lock("evt1").await.unwrap();
    assert_eq!(store.phase(), LockPhase::Locked);
}
