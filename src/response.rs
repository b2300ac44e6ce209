//! JSON response envelope shared by every user endpoint.
//!
//! ```json
//! { "code": 200, "data": { ... }, "message": "USER_FETCHED" }
//! ```
//!
//! `code` always equals the HTTP status of the response, because both come
//! from the same `StatusCode` in [`Envelope::into_response`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Fixed set of human-readable outcome messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserMessage {
    UserLoggedIn,
    UserInvalid,
    UserCreated,
    UserExists,
    UsersFetched,
    UserFetched,
    UserUpdated,
    UserDeleted,
    UserRoles,
}

/// Response body `{ code, data?, message }`.
///
/// `data` is skipped entirely when absent, so delete and conflict responses
/// carry no `data` key at all.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub message: UserMessage,

    #[serde(skip)]
    status: StatusCode,
}

impl<T> Envelope<T> {
    /// Envelope carrying a payload.
    pub fn with_data(status: StatusCode, data: T, message: UserMessage) -> Self {
        Self {
            code: status.as_u16(),
            data: Some(data),
            message,
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Envelope<()> {
    /// Envelope with no `data` key.
    pub fn message_only(status: StatusCode, message: UserMessage) -> Self {
        Self {
            code: status.as_u16(),
            data: None,
            message,
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
