//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! The user record is backend-defined. Only `id` is required; every other
//! field is carried through untouched so callers see exactly what the
//! backend sent.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An authenticated user as returned by `GET /user/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend identity. Any JSON scalar (numeric ids and string ids both occur).
    pub id: Value,
    /// Remaining profile fields, opaque to the client.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    /// Display name, if the backend supplies a string `name` field.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.profile.get("name").and_then(Value::as_str)
    }
}

/// Body of `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Success body of `POST /login`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Success body of `GET /user/me`.
#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    pub user: User,
}

/// Failure body shared by all endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
