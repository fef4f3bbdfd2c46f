use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Login body. Both fields are optional at the wire level so that a missing
/// field is reported as an authentication failure rather than a parse error.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// JWT payload: who the bearer is and when the claim stops being valid.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub public_id: Uuid,
    pub exp: usize,
}
