use axum::{body::Body, http::{Request, StatusCode}};
use commerce_api::{
    config::AuthMode,
    routes::{create_app, health::health_check},
    services::token_service::TokenService,
    state::AppState,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn readiness_reports_unreachable_store() {
    let state = AppState {
        orm: DatabaseConnection::Disconnected,
        tokens: TokenService::new("test-secret", 30),
        auth_mode: AuthMode::Token,
    };

    let response = create_app(state)
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
