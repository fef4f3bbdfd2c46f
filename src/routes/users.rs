use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::users::{UserList, UserPayload},
    error::AppResult,
    middleware::{auth::AuthUser, validated_json::ValidatedJson},
    models::User,
    response::ApiResponse,
    routes::{Access, gate, params::Pagination},
    services::user_service,
    state::AppState,
};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            gate(Access::Public, post(create_user), state)
                .merge(gate(Access::Protected, get(list_users), state)),
        )
        .route(
            "/{id}",
            gate(
                Access::Protected,
                get(get_user).put(update_user).delete(delete_user),
                state,
            ),
        )
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<User>),
        (status = 400, description = "Validation failed or duplicate email")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = user_service::create_user(&state, payload.into_candidate()?).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/users",
    params(Pagination),
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserList>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("access_token" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 400, description = "Invalid user id"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("access_token" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = ApiResponse<User>),
        (status = 400, description = "Invalid user id, validation failed or duplicate email"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("access_token" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user(&state, id, payload.into_candidate()?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and their orders deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Invalid user id"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("access_token" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    requester: Option<Extension<AuthUser>>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if let Some(Extension(requester)) = &requester {
        tracing::info!(
            requested_by = requester.user_id,
            target = id,
            "user deletion requested"
        );
    }
    let resp = user_service::delete_user(&state, id).await?;
    Ok(Json(resp))
}
