//! User account HTTP handlers.
//!
//! Each handler forwards the parsed request to the injected [`UserService`],
//! wraps the result in an [`Envelope`], and lets any `AppError` propagate to
//! the error boundary untouched.
//!
//! - POST /account/login - Log a user in
//! - POST /account/register - Register a new user
//! - GET /account - List all users
//! - GET /account/{_id} - Get a user
//! - PUT|PATCH /account/{_id} - Update a user
//! - DELETE /account/{_id} - Delete a user
//! - GET /account/{_id}/roles - Get a user's roles
//!
//! [`UserService`]: crate::services::user_service::UserService

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    extract::JsonBody,
    models::user::{
        LoginOutcome, LoginRequest, RegisterOutcome, RegisterRequest, UpdateUserRequest,
        UserResponse,
    },
    response::{Envelope, UserMessage},
    state::AppState,
};

/// Log a user in.
///
/// # Request Body
///
/// ```json
/// { "email": "ann@example.com", "password": "correct horse" }
/// ```
///
/// # Response
///
/// - **201 Created**: `Authorization` header carries the token; body is
///   `{ code, data: { token, user }, message: "USER_LOGGED_IN" }`
/// - **409 Conflict**: unknown email or wrong password,
///   `{ code, message: "USER_INVALID" }`, no `Authorization` header
pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response, AppError> {
    match state.users.login_user(request).await? {
        LoginOutcome::LoggedIn(login) => {
            let token = HeaderValue::from_str(&login.token)
                .map_err(|e| AppError::Internal(format!("token is not a valid header: {e}")))?;

            let envelope =
                Envelope::with_data(StatusCode::CREATED, login, UserMessage::UserLoggedIn);

            Ok(([(header::AUTHORIZATION, token)], envelope).into_response())
        }
        LoginOutcome::InvalidCredentials => Ok(Envelope::message_only(
            StatusCode::CONFLICT,
            UserMessage::UserInvalid,
        )
        .into_response()),
    }
}

/// Register a new user.
///
/// # Response
///
/// - **201 Created**: `{ code, data: <user>, message: "USER_CREATED" }`
/// - **409 Conflict**: email already registered, `{ code, message: "USER_EXISTS" }`
/// - **400 Bad Request**: invalid profile fields
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Response, AppError> {
    let response = match state.users.register_user(request).await? {
        RegisterOutcome::Created(user) => {
            Envelope::with_data(StatusCode::CREATED, user, UserMessage::UserCreated)
                .into_response()
        }
        RegisterOutcome::AlreadyExists => {
            Envelope::message_only(StatusCode::CONFLICT, UserMessage::UserExists).into_response()
        }
    };

    Ok(response)
}

/// List every user.
pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<UserResponse>>, AppError> {
    let users = state.users.get_all_users().await?;

    Ok(Envelope::with_data(
        StatusCode::OK,
        users,
        UserMessage::UsersFetched,
    ))
}

/// Fetch one user by `_id`.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<UserResponse>, AppError> {
    let user = state.users.get_user(&id).await?;

    Ok(Envelope::with_data(StatusCode::OK, user, UserMessage::UserFetched))
}

/// Update a user. Served for both PUT and PATCH; answers 202 Accepted.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<Envelope<UserResponse>, AppError> {
    let user = state.users.update_user(&id, request).await?;

    Ok(Envelope::with_data(
        StatusCode::ACCEPTED,
        user,
        UserMessage::UserUpdated,
    ))
}

/// Delete a user. The body has no `data` key.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<()>, AppError> {
    state.users.delete_user(&id).await?;

    Ok(Envelope::message_only(StatusCode::OK, UserMessage::UserDeleted))
}

/// Roles granted to a user, sorted by name.
pub async fn get_user_roles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<Vec<String>>, AppError> {
    let roles = state.users.get_user_roles(&id).await?;

    Ok(Envelope::with_data(StatusCode::OK, roles, UserMessage::UserRoles))
}
