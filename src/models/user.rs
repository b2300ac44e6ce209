//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - `RegisterRequest`, `LoginRequest`, `UpdateUserRequest`: request bodies
//! - `UserResponse`, `LoginResponse`: response payloads returned to clients
//! - `LoginOutcome`, `RegisterOutcome`: business outcomes of the user service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Matches `users.first_name` / `users.last_name` (`VARCHAR(100)`).
pub const MAX_NAME_LEN: usize = 100;

/// Matches `users.email` (`VARCHAR(255)`).
pub const MAX_EMAIL_LEN: usize = 255;

/// Represents a user record from the database.
///
/// Maps to the `users` table. Emails are stored lowercase so lookups are
/// case-insensitive.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Hex-encoded SHA-256 of `salt || password`
    pub password_hash: String,

    /// Hex-encoded random salt, regenerated on every password change
    pub password_salt: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Request body for registering a new user.
///
/// # JSON Example
///
/// ```json
/// {
///   "first_name": "Ann",
///   "last_name": "Lee",
///   "email": "ann@example.com",
///   "password": "correct horse"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Request body for logging in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::InvalidRequest(
                "email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for updating a user. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
        {
            return Err(AppError::InvalidRequest(
                "at least one field must be provided".to_string(),
            ));
        }

        if let Some(ref name) = self.first_name {
            validate_name("first_name", name)?;
        }
        if let Some(ref name) = self.last_name {
            validate_name("last_name", name)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref password) = self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} must not be blank")));
    }
    if value.trim().chars().count() > MAX_NAME_LEN {
        return Err(AppError::InvalidRequest(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if !valid {
        return Err(AppError::InvalidRequest(
            "email must be a valid address".to_string(),
        ));
    }
    if normalize_email(email).chars().count() > MAX_EMAIL_LEN {
        return Err(AppError::InvalidRequest(format!(
            "email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Response body for user endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "first_name": "Ann",
///   "last_name": "Lee",
///   "email": "ann@example.com",
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Strips the password hash and salt.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload returned on successful login. The token is also sent in the
/// `Authorization` response header.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Result of a login attempt that did not fail unexpectedly.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    LoggedIn(LoginResponse),
    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,
}

/// Result of a registration attempt that did not fail unexpectedly.
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Created(UserResponse),
    AlreadyExists,
}
