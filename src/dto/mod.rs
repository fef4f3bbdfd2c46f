//! Request payloads and the typed candidates they are validated into.

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;

use crate::error::{AppError, AppResult};

pub(crate) const MISSING_FIELD: &str = "Missing data for required field.";

/// Unwrap a field that `validator` has already checked with `required`.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::field(field, MISSING_FIELD))
}
