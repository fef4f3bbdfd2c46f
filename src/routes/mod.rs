use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    routing::{MethodRouter, get},
};

use crate::{
    config::AuthMode,
    middleware::auth::require_identity,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod auth;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod users;

/// Access requirement attached to each route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Wrap `route` in the identity gate when it is protected and the deployment
/// runs in token mode. Open deployments never install the gate.
pub fn gate(
    access: Access,
    route: MethodRouter<AppState>,
    state: &AppState,
) -> MethodRouter<AppState> {
    match (access, state.auth_mode) {
        (Access::Protected, AuthMode::Token) => route.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        )),
        _ => route,
    }
}

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router(state))
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
}

/// Every route the service exposes, with state bound. Transport layers are added in `main`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness))
        .merge(create_api_router(&state))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
