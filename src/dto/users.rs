use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::required,
    error::AppResult,
    models::User,
};

/// Body of `POST /users` and `PUT /users/{id}`. Updates replace every field.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 30, message = "Length must be between 1 and 30.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 95, message = "Length must be between 1 and 95.")
    )]
    pub address: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        email(message = "Not a valid email address."),
        length(max = 200, message = "Longer than maximum length 200.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Password must not be empty.")
    )]
    pub password: Option<String>,
}

/// A user that passed validation and is ready to be stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub address: String,
    pub email: String,
    pub password: String,
}

impl UserPayload {
    pub fn into_candidate(self) -> AppResult<NewUser> {
        Ok(NewUser {
            name: required(self.name, "name")?,
            address: required(self.address, "address")?,
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> UserPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn complete_payload_validates() {
        let p = payload(serde_json::json!({
            "name": "A", "address": "X", "email": "a@x.com", "password": "pw"
        }));
        assert!(p.validate().is_ok());

        let user = p.into_candidate().unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn missing_and_malformed_fields_are_reported_per_field() {
        let p = payload(serde_json::json!({
            "name": "A", "email": "not-an-email", "password": "pw"
        }));

        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("address"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn name_longer_than_thirty_chars_is_rejected() {
        let p = payload(serde_json::json!({
            "name": "n".repeat(31), "address": "X", "email": "a@x.com", "password": "pw"
        }));

        assert!(p.validate().unwrap_err().field_errors().contains_key("name"));
    }
}
