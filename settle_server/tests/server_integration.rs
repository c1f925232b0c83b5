//! Integration tests for the HTTP API.
//!
//! Drives the full router against an in-memory SQLite database using
//! tower's `oneshot`, covering the session lifecycle, player actions,
//! settlement, and error envelopes.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use settle::db::{Database, DatabaseConfig};
use settle::ledger::LedgerTracker;
use settle_server::api::{AppState, create_router};
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

/// Helper to create a test server backed by an in-memory database
async fn create_test_server() -> Router {
    let db = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");

    let pool = Arc::new(db.pool().clone());
    let tracker = Arc::new(LedgerTracker::new(pool.clone()));
    tracker
        .init_schema()
        .await
        .expect("Failed to create schema");

    let state = AppState {
        tracker,
        pool,
        export_dir: Arc::new(std::env::temp_dir().join("settle_server_test_exports")),
    };

    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Helper to run a started game with a couple of buy-ins
async fn start_game_with_players(app: &Router) {
    for request in [
        json_request("POST", "/api/game/start", json!({"date": "01/15"})),
        json_request(
            "POST",
            "/api/players/buy-in",
            json!({"name": "alice", "amount": 100}),
        ),
        json_request(
            "POST",
            "/api/players/buy-in",
            json!({"name": "bob", "amount": 100}),
        ),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_server().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
    assert!(body["game"]["current_date"].is_null());
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let app = create_test_server().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "test-correlation-id")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-correlation-id"
    );
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_start_game_and_current() {
    let app = create_test_server().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/game/start",
            json!({"date": "01/15"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Game started for 01/15");
    assert_eq!(body["date"], "01/15");

    let response = app.oneshot(get("/api/game/current")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["current_date"], "01/15");
    assert_eq!(body["table"], json!([]));
}

#[tokio::test]
async fn test_blank_date_is_rejected() {
    let app = create_test_server().await;

    let response = app
        .oneshot(json_request("POST", "/api/game/start", json!({"date": " "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Date is required");
}

#[tokio::test]
async fn test_clear_detaches_session() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/clear", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "01/15 game saved and cleared");

    let response = app.oneshot(get("/api/game/current")).await.unwrap();
    let body = body_json(response).await;
    assert!(body["current_date"].is_null());
}

#[tokio::test]
async fn test_history_reads_saved_dates() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/clear", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/history/01%2F15")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], "01/15");
    assert_eq!(body["table"][0]["name"], "alice");
    assert_eq!(body["table"][0]["buy_in"], 100);
}

// ============================================================================
// Player Action Tests
// ============================================================================

#[tokio::test]
async fn test_buy_in_requires_active_game() {
    let app = create_test_server().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/players/buy-in",
            json!({"name": "alice", "amount": 100}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No game in progress.");
}

#[tokio::test]
async fn test_buy_in_echoes_updated_table() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/players/buy-in",
            json!({"name": "alice", "amount": 50}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "alice bought in for 50");
    assert_eq!(body["table"][0]["name"], "alice");
    assert_eq!(body["table"][0]["buy_in"], 150);
    assert_eq!(body["table"][1]["name"], "bob");
}

#[tokio::test]
async fn test_payment_before_buy_in_is_rejected() {
    let app = create_test_server().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/game/start",
            json!({"date": "01/15"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/players/payment",
            json!({"name": "carol", "amount": 50, "method": "cash"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Player 'carol' has not bought in yet.");
}

#[tokio::test]
async fn test_unknown_payment_method_is_rejected() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/players/payment",
            json!({"name": "alice", "amount": 50, "method": "venmo"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_positive_amount_is_rejected() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/players/cash-out",
            json!({"name": "alice", "amount": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid amount: 0. Amounts must be positive.");
}

#[tokio::test]
async fn test_remove_player() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .oneshot(json_request(
            "DELETE",
            "/api/players/remove",
            json!({"name": "bob"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "bob removed from table");
    assert_eq!(body["table"].as_array().unwrap().len(), 1);
    assert_eq!(body["table"][0]["name"], "alice");
}

// ============================================================================
// Summary and Settlement Tests
// ============================================================================

#[tokio::test]
async fn test_summary_totals() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/players/payment",
            json!({"name": "alice", "amount": 100, "method": "zelle"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_buy_in"], 200);
    assert_eq!(body["total_payment"], 100);
    assert_eq!(body["total_cash_out"], 0);
    assert_eq!(body["total_payout"], 0);
    assert_eq!(body["bank_balance"], 100);
}

#[tokio::test]
async fn test_summary_without_players_is_rejected() {
    let app = create_test_server().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/game/start",
            json!({"date": "01/15"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No data available");
}

#[tokio::test]
async fn test_solve_end_to_end() {
    let app = create_test_server().await;
    start_game_with_players(&app).await;

    // Alice settles her buy-in in full; Bob doubles up and cashes out.
    for request in [
        json_request(
            "POST",
            "/api/players/payment",
            json!({"name": "alice", "amount": 100, "method": "cash"}),
        ),
        json_request(
            "POST",
            "/api/players/cash-out",
            json!({"name": "bob", "amount": 200}),
        ),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/api/solve")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["balances"],
        json!([
            {"name": "alice", "balance": 0},
            {"name": "bob", "balance": 100},
        ])
    );
    // Nobody owes a fellow player; bob's winnings are on the bank.
    assert_eq!(body["transactions"], json!([]));
    assert_eq!(
        body["missing_balances"],
        json!([{"name": "bob", "balance": 100}])
    );
    assert_eq!(body["final_bank_balance"], -100);
}
