use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::{AppResult, AuthError},
    response::ApiResponse,
    services::auth_service::login_user,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Missing credentials or unknown user"),
        (status = 403, description = "Wrong password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let Json(payload) = payload.map_err(|_| AuthError::MissingCredentials)?;
    let resp = login_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
