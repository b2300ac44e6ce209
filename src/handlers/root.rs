//! Root endpoint.

use axum::Json;

/// `GET /` - responds with the JSON string `"Welcome"`.
pub async fn welcome() -> Json<&'static str> {
    Json("Welcome")
}
