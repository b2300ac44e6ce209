//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Verify its signature and expiry
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401

use crate::{error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers can extract it with
/// `Extension<AuthContext>`. The account handlers do not read it yet, since
/// any authenticated user may manage any account. It is the hook for adding
/// ownership checks (e.g. a user may only update or delete themselves).
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the user the token was issued to
    pub user_id: Uuid,
}

/// Bearer token authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer <user_id>.<expires_at>.<signature>
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidToken)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;

    let claims = state.tokens.verify(token.trim())?;

    request.extensions_mut().insert(AuthContext {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}
