use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    entity::users::{Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult, AuthError},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Hash a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(AuthError::MissingCredentials.into()),
    };

    let user = Users::find()
        .filter(Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AuthError::UnknownUser.into()),
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "login rejected: bad password");
        return Err(AuthError::BadCredentials.into());
    }

    let token = state.tokens.issue(user.public_id)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

/// Resolve a raw `x-access-token` value to the user it names.
pub async fn resolve_identity(state: &AppState, token: &str) -> AppResult<UserModel> {
    let claims = state.tokens.verify(token)?;

    let user = Users::find()
        .filter(Column::PublicId.eq(claims.public_id))
        .one(&state.orm)
        .await?;

    match user {
        Some(u) => {
            tracing::debug!(user_id = u.id, public_id = %u.public_id, "identity resolved");
            Ok(u)
        }
        None => Err(AuthError::UnknownUser.into()),
    }
}
