use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AuthError},
    services::auth_service::resolve_identity,
    state::AppState,
};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Identity resolved from a verified token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub public_id: Uuid,
}

/// Gate for protected routes: rejects before the handler runs unless the
/// `x-access-token` header carries a valid token for an existing user.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .ok_or(AuthError::TokenMissing)?
        .to_str()
        .map_err(|_| AuthError::TokenInvalid)?
        .trim()
        .to_owned();

    if token.is_empty() {
        return Err(AuthError::TokenMissing.into());
    }

    let user = resolve_identity(&state, &token).await?;
    req.extensions_mut().insert(AuthUser {
        user_id: user.id,
        public_id: user.public_id,
    });

    Ok(next.run(req).await)
}
