use sea_orm::DatabaseConnection;

use crate::{config::AuthMode, services::token_service::TokenService};

/// Handles shared by every request. Built once in `main` and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub tokens: TokenService,
    pub auth_mode: AuthMode,
}
