pub mod auth;
pub mod validated_json;
