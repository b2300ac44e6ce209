//! Request extractors whose rejections go through [`AppError`].

use axum::{extract::FromRequest, extract::rejection::JsonRejection};

use crate::error::AppError;

/// JSON request body.
///
/// Same as `axum::Json`, except a missing content type, malformed JSON or a
/// body that does not match `T` becomes `AppError::InvalidRequest`, so the
/// client still gets the `{ code, message }` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
