//! Routing-layer behaviour that must hold before the store is ever touched:
//! the identity gate, payload validation and login input checks.
//!
//! The store handle is disconnected, so any request that reached it would
//! fail with a 500 instead of the statuses asserted here.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use commerce_api::{
    config::AuthMode, routes::create_app, services::token_service::TokenService, state::AppState,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret";

fn app(auth_mode: AuthMode) -> Router {
    create_app(AppState {
        orm: DatabaseConnection::Disconnected,
        tokens: TokenService::new(SECRET, 30),
        auth_mode,
    })
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let response = app(AuthMode::Token)
        .oneshot(Request::get("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Token is missing");
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_unauthorized() {
    let request = Request::get("/users/1")
        .header("x-access-token", "definitely-not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let response = app(AuthMode::Token).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Token is invalid");
}

#[tokio::test]
async fn protected_route_with_expired_token_is_unauthorized() {
    let token = TokenService::new(SECRET, 30)
        .issue_at(Uuid::new_v4(), Utc::now() - Duration::hours(1))
        .unwrap();
    let request = Request::delete("/users/1")
        .header("x-access-token", token)
        .body(Body::empty())
        .unwrap();

    let response = app(AuthMode::Token).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Token has expired");
}

#[tokio::test]
async fn gate_runs_before_body_validation() {
    let response = app(AuthMode::Token)
        .oneshot(json_request("PUT", "/users/1", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn open_mode_installs_no_gate() {
    let response = app(AuthMode::Open)
        .oneshot(Request::get("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Reaches the (disconnected) store instead of being rejected.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn registration_reports_each_invalid_field() {
    let response = app(AuthMode::Token)
        .oneshot(json_request(
            "POST",
            "/users",
            json!({ "name": "A", "email": "nope", "password": "pw" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    let fields = &body["data"]["fields"];
    assert!(fields["address"].is_array());
    assert!(fields["email"].is_array());
    assert!(fields.get("name").is_none());
}

#[tokio::test]
async fn product_with_non_numeric_price_is_rejected() {
    let response = app(AuthMode::Token)
        .oneshot(json_request(
            "POST",
            "/products",
            json!({ "product_name": "Mug", "price": "twelve" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["data"]["fields"]["body"].is_array());
}

#[tokio::test]
async fn order_without_user_id_is_rejected() {
    let response = app(AuthMode::Token)
        .oneshot(json_request("POST", "/orders", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["data"]["fields"]["user_id"],
        json!(["provide a user_id"])
    );
}

#[tokio::test]
async fn login_without_credentials_is_unauthorized() {
    let response = app(AuthMode::Token)
        .oneshot(json_request("POST", "/login", json!({ "email": "a@x.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unparseable_body_is_unauthorized() {
    let request = Request::post("/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(AuthMode::Token).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = app(AuthMode::Token)
        .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["path"], "/nowhere");
}
