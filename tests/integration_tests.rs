use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::handlers;
use slotbook::services::identity::ProxyHeaderIdentity;
use slotbook::services::notify::{Level, NotificationSink};
use slotbook::state::AppState;

// ── Mock Collaborators ──

struct CaptureSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl NotificationSink for CaptureSink {
    async fn notify(&self, message: &str, level: Level) {
        self.sent
            .lock()
            .unwrap()
            .push((message.to_string(), level.as_str().to_string()));
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        maintenance_days: vec![22, 23],
    }
}

fn test_state() -> Arc<AppState> {
    test_state_with_sent().0
}

fn test_state_with_sent() -> (Arc<AppState>, Arc<Mutex<Vec<(String, String)>>>) {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    let sent = Arc::new(Mutex::new(vec![]));
    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        identity: Box::new(ProxyHeaderIdentity::new(config.admin_token.clone())),
        notifier: Box::new(CaptureSink {
            sent: Arc::clone(&sent),
        }),
        config,
    });
    (state, sent)
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn create_request(uid: &str, resource: &str, date: &str, slot: &str, purpose: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/bookings")
        .header("Content-Type", "application/json")
        .header("X-User-Id", uid)
        .header("X-User-Email", format!("{uid}@example.com"))
        .header("X-User-Name", uid)
        .body(Body::from(format!(
            r#"{{"resource":"{resource}","date":"{date}","time_slot":"{slot}","purpose":"{purpose}"}}"#
        )))
        .unwrap()
}

async fn create_booking(state: &Arc<AppState>, uid: &str, resource: &str, date: &str, slot: &str) -> serde_json::Value {
    let app = test_app(state.clone());
    let res = app
        .oneshot(create_request(uid, resource, date, slot, "Club practice"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    json_body(res).await
}

async fn json_body(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn admin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-User-Id", "admin-1")
        .header("X-User-Email", "admin@example.com")
        .header("Authorization", "Bearer test-token")
        .body(Body::empty())
        .unwrap()
}

fn set_status_request(id: &str, status: &str, admin: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/api/admin/bookings/{id}/status"))
        .header("Content-Type", "application/json")
        .header("X-User-Id", if admin { "admin-1" } else { "u-other" })
        .header("X-User-Email", "admin@example.com");
    if admin {
        builder = builder.header("Authorization", "Bearer test-token");
    }
    builder
        .body(Body::from(format!(r#"{{"status":"{status}"}}"#)))
        .unwrap()
}

fn cancel_request(id: &str, uid: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/bookings/{id}/cancel"))
        .header("X-User-Id", uid)
        .header("X-User-Email", format!("{uid}@example.com"))
        .body(Body::empty())
        .unwrap()
}

// ── Health Check ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

// ── Booking Creation ──

#[tokio::test]
async fn test_create_booking() {
    let (state, sent) = test_state_with_sent();

    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["resource"], "community-hall");
    assert_eq!(booking["resource_name"], "Community Hall");
    assert_eq!(booking["date"], "2025-05-10");
    assert_eq!(booking["time_slot"], "09:00-10:00");
    assert_eq!(booking["time_slot_display"], "9:00 AM - 10:00 AM");
    assert_eq!(booking["requester_email"], "u-1@example.com");

    let reference = booking["booking_ref"].as_str().unwrap();
    assert!(reference.starts_with("BK-"));
    assert_eq!(reference.len(), 17);

    let messages = sent.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].0.contains(reference));
    assert_eq!(messages[0].1, "success");
}

#[tokio::test]
async fn test_create_requires_identity() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bookings")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"resource":"community-hall","date":"2025-05-10","time_slot":"09:00-10:00","purpose":"Practice"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let state = test_state();

    for (resource, date, slot, purpose) in [
        ("swimming-pool", "2025-05-10", "09:00-10:00", "Practice"),
        ("community-hall", "10/05/2025", "09:00-10:00", "Practice"),
        ("community-hall", "2025-05-10", "09:00-11:00", "Practice"),
        ("community-hall", "2025-05-10", "09:00-10:00", "   "),
    ] {
        let app = test_app(state.clone());
        let res = app
            .oneshot(create_request("u-1", resource, date, slot, purpose))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["severity"], "error");
    }
}

#[tokio::test]
async fn test_conflicting_booking_rejected() {
    let state = test_state();

    create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(create_request(
            "u-2",
            "community-hall",
            "2025-05-10",
            "09:00-10:00",
            "Rival practice",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = json_body(res).await;
    assert_eq!(body["severity"], "warning");

    // exactly one booking survives
    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/admin/bookings")).await.unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["status"], "pending");
}

#[tokio::test]
async fn test_concurrent_creates_one_winner() {
    let state = test_state();

    let mut handles = vec![];
    for i in 0..4 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            let app = test_app(state);
            let uid = format!("u-{i}");
            app.oneshot(create_request(
                &uid,
                "sports-ground",
                "2025-05-10",
                "14:00-15:00",
                "Match",
            ))
            .await
            .unwrap()
            .status()
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status: {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 3);
}

#[tokio::test]
async fn test_same_slot_different_resource_ok() {
    let state = test_state();
    create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    create_booking(&state, "u-2", "meeting-room", "2025-05-10", "09:00-10:00").await;
}

// ── Cancellation ──

#[tokio::test]
async fn test_owner_cancels_and_slot_frees() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app.oneshot(cancel_request(id, "u-1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // the freed slot can be taken by someone else
    create_booking(&state, "u-2", "community-hall", "2025-05-10", "09:00-10:00").await;
}

#[tokio::test]
async fn test_stranger_cannot_cancel() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app.oneshot(cancel_request(id, "u-2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // booking unchanged
    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/admin/bookings")).await.unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings[0]["status"], "pending");
}

#[tokio::test]
async fn test_admin_can_cancel_any_booking() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/bookings/{id}/cancel"))
                .header("X-User-Id", "admin-1")
                .header("X-User-Email", "admin@example.com")
                .header("Authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(admin_get("/api/admin/bookings?status=cancelled"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["updated_by"], "admin@example.com");
}

#[tokio::test]
async fn test_cancel_twice_is_harmless() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    for _ in 0..2 {
        let app = test_app(state.clone());
        let res = app.oneshot(cancel_request(id, "u-1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let app = test_app(state);
    let res = app
        .oneshot(admin_get("/api/admin/bookings?status=cancelled"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_unknown_booking() {
    let state = test_state();
    let app = test_app(state);
    let res = app
        .oneshot(cancel_request("no-such-id", "u-1"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Administrative Transitions ──

#[tokio::test]
async fn test_admin_approves_and_denies() {
    let state = test_state();
    let first = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let second = create_booking(&state, "u-2", "community-hall", "2025-05-10", "10:00-11:00").await;

    let app = test_app(state.clone());
    let res = app
        .oneshot(set_status_request(
            first["id"].as_str().unwrap(),
            "approved",
            true,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state.clone());
    let res = app
        .oneshot(set_status_request(
            second["id"].as_str().unwrap(),
            "denied",
            true,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(admin_get("/api/admin/bookings?status=approved"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["updated_by"], "admin@example.com");
}

#[tokio::test]
async fn test_set_status_rejects_cancellation_path() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(set_status_request(
            booking["id"].as_str().unwrap(),
            "cancelled",
            true,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(res).await;
    assert_eq!(body["severity"], "warning");
}

#[tokio::test]
async fn test_approved_booking_cannot_be_readjudicated() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(set_status_request(id, "approved", true))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app
        .oneshot(set_status_request(id, "denied", true))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_set_status_requires_admin() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(set_status_request(
            booking["id"].as_str().unwrap(),
            "approved",
            false,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_set_status_unknown_status() {
    let state = test_state();
    let booking = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(set_status_request(
            booking["id"].as_str().unwrap(),
            "blessed",
            true,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Admin Listing, Search & Stats ──

#[tokio::test]
async fn test_admin_list_requires_admin() {
    let state = test_state();
    let app = test_app(state.clone());

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/bookings")
                .header("X-User-Id", "u-1")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_search() {
    let state = test_state();
    create_booking(&state, "alice", "community-hall", "2025-05-10", "09:00-10:00").await;
    create_booking(&state, "bob", "sports-ground", "2025-06-01", "09:00-10:00").await;

    // by email
    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_get("/api/admin/bookings?search=alice%40example.com"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["requester_email"], "alice@example.com");

    // by resource display name, case-insensitively
    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_get("/api/admin/bookings?search=Sports"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["resource"], "sports-ground");

    // by date fragment
    let app = test_app(state);
    let res = app
        .oneshot(admin_get("/api/admin/bookings?search=2025-06"))
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_stats() {
    let state = test_state();
    let first = create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    let second = create_booking(&state, "u-2", "community-hall", "2025-05-10", "10:00-11:00").await;
    create_booking(&state, "u-3", "community-hall", "2025-05-10", "11:00-12:00").await;

    let app = test_app(state.clone());
    app.oneshot(set_status_request(
        first["id"].as_str().unwrap(),
        "approved",
        true,
    ))
    .await
    .unwrap();
    let app = test_app(state.clone());
    app.oneshot(set_status_request(
        second["id"].as_str().unwrap(),
        "denied",
        true,
    ))
    .await
    .unwrap();

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/admin/stats")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats = json_body(res).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["approved"], 1);
    assert_eq!(stats["denied"], 1);
}

// ── User Listing ──

#[tokio::test]
async fn test_my_bookings_scoped_and_ordered() {
    let state = test_state();
    create_booking(&state, "alice", "community-hall", "2025-05-12", "09:00-10:00").await;
    create_booking(&state, "alice", "meeting-room", "2025-05-10", "09:00-10:00").await;
    create_booking(&state, "bob", "sports-ground", "2025-05-11", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .header("X-User-Id", "alice")
                .header("X-User-Email", "alice@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bookings = json_body(res).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["date"], "2025-05-10");
    assert_eq!(bookings[1]["date"], "2025-05-12");
}

#[tokio::test]
async fn test_my_bookings_cancelled_hidden_by_default() {
    let state = test_state();
    let booking = create_booking(&state, "alice", "community-hall", "2025-05-10", "09:00-10:00").await;
    let id = booking["id"].as_str().unwrap();

    let app = test_app(state.clone());
    app.oneshot(cancel_request(id, "alice")).await.unwrap();

    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .header("X-User-Id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 0);

    // history view keeps the cancelled row
    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings?exclude_cancelled=false")
                .header("X-User-Id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["status"], "cancelled");
}

#[tokio::test]
async fn test_past_booking_displays_completed() {
    let state = test_state();
    create_booking(&state, "alice", "community-hall", "2020-01-10", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .header("X-User-Id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bookings = json_body(res).await;
    assert_eq!(bookings[0]["status"], "completed");
}

// ── Availability & Calendar ──

#[tokio::test]
async fn test_slot_availability_flips_on_booking() {
    let state = test_state();

    let uri = "/api/availability?resource=community-hall&date=2025-05-10&time_slot=09%3A00-10%3A00";
    let app = test_app(state.clone());
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(res).await["available"], true);

    create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(res).await["available"], false);
}

#[tokio::test]
async fn test_day_slots_exclude_taken() {
    let state = test_state();
    create_booking(&state, "u-1", "meeting-room", "2025-05-10", "11:00-12:00").await;

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/availability/day?resource=meeting-room&date=2025-05-10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    let free: Vec<&str> = body["free_slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(free.len(), 7);
    assert!(!free.contains(&"11:00-12:00"));
    assert!(free.contains(&"09:00-10:00"));
    assert_eq!(body["status"], "available");
    assert_eq!(body["available_slots"], 7);
    assert_eq!(body["total_slots"], 8);
}

#[tokio::test]
async fn test_day_slots_closed_on_maintenance_day() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/availability/day?resource=meeting-room&date=2025-05-22")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(res).await;
    assert_eq!(body["status"], "maintenance");
    assert_eq!(body["available_slots"], 0);
    assert_eq!(body["free_slots"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_calendar_maintenance_days() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/calendar/2025/5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let view = json_body(res).await;
    let days = view["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);

    let day22 = &days[21];
    assert_eq!(day22["status"], "maintenance");
    assert_eq!(day22["available_slots"], 0);
    assert_eq!(day22["total_slots"], 0);
    assert_eq!(days[22]["status"], "maintenance");
}

#[tokio::test]
async fn test_calendar_counts_active_bookings() {
    let state = test_state();
    create_booking(&state, "u-1", "community-hall", "2025-05-10", "09:00-10:00").await;
    create_booking(&state, "u-2", "community-hall", "2025-05-10", "10:00-11:00").await;
    let third = create_booking(&state, "u-3", "meeting-room", "2025-05-10", "09:00-10:00").await;
    // a cancelled booking frees its capacity
    let cancelled = create_booking(&state, "u-4", "sports-ground", "2025-05-10", "09:00-10:00").await;
    let app = test_app(state.clone());
    app.oneshot(cancel_request(
        cancelled["id"].as_str().unwrap(),
        "u-4",
    ))
    .await
    .unwrap();
    // denied bookings still occupy capacity
    let app = test_app(state.clone());
    app.oneshot(set_status_request(
        third["id"].as_str().unwrap(),
        "denied",
        true,
    ))
    .await
    .unwrap();

    let app = test_app(state);
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/calendar/2025/5?selected=2025-05-10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let view = json_body(res).await;
    let day10 = &view["days"].as_array().unwrap()[9];

    assert_eq!(day10["status"], "available");
    assert_eq!(day10["available_slots"], 5);
    assert_eq!(day10["total_slots"], 8);
    assert_eq!(day10["is_selected"], true);
}

#[tokio::test]
async fn test_calendar_rejects_bad_month() {
    let state = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/calendar/2025/13")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
