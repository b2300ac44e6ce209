//! In-memory `UserService` double and request helpers shared by the API tests.

#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc, sync::Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use user_account_service::{
    error::AppError,
    models::user::{
        LoginOutcome, LoginRequest, LoginResponse, RegisterOutcome, RegisterRequest,
        UpdateUserRequest, UserResponse,
    },
    routes::routes,
    services::{token::TokenService, user_service::UserService},
    state::AppState,
};

pub const ANN_ID: &str = "42";
pub const ANN_PASSWORD: &str = "correct horse";

pub fn ann() -> UserResponse {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    UserResponse {
        id: Uuid::nil(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@example.com".to_string(),
        created_at: at,
        updated_at: at,
    }
}

/// Keeps users keyed by their path id. When `failing` is set every call
/// returns an internal error instead.
pub struct InMemoryUserService {
    tokens: TokenService,
    users: Mutex<BTreeMap<String, UserResponse>>,
    failing: bool,
}

impl InMemoryUserService {
    pub fn new(tokens: TokenService) -> Self {
        let mut users = BTreeMap::new();
        users.insert(ANN_ID.to_string(), ann());

        Self {
            tokens,
            users: Mutex::new(users),
            failing: false,
        }
    }

    pub fn failing(tokens: TokenService) -> Self {
        Self {
            failing: true,
            ..Self::new(tokens)
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Internal("backend unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn login_user(&self, request: LoginRequest) -> Result<LoginOutcome, AppError> {
        self.check()?;
        let users = self.users.lock().unwrap();

        let found = users
            .values()
            .find(|u| u.email == request.email)
            .filter(|_| request.password == ANN_PASSWORD);

        match found {
            Some(user) => Ok(LoginOutcome::LoggedIn(LoginResponse {
                token: self.tokens.issue(user.id)?,
                user: user.clone(),
            })),
            None => Ok(LoginOutcome::InvalidCredentials),
        }
    }

    async fn register_user(&self, request: RegisterRequest) -> Result<RegisterOutcome, AppError> {
        self.check()?;
        request.validate()?;
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == request.email) {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let now = Utc::now();
        let user = UserResponse {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id.to_string(), user.clone());

        Ok(RegisterOutcome::Created(user))
    }

    async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        self.check()?;
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn get_user(&self, id: &str) -> Result<UserResponse, AppError> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(AppError::UserNotFound)
    }

    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        self.check()?;
        request.validate()?;
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(id).ok_or(AppError::UserNotFound)?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(AppError::UserNotFound)
    }

    async fn get_user_roles(&self, id: &str) -> Result<Vec<String>, AppError> {
        self.check()?;
        if !self.users.lock().unwrap().contains_key(id) {
            return Err(AppError::UserNotFound);
        }
        Ok(vec!["user".to_string()])
    }
}

pub fn token_service() -> TokenService {
    TokenService::new("integration-secret", Duration::hours(1))
}

pub fn app() -> (Router, TokenService) {
    let tokens = token_service();
    let users = Arc::new(InMemoryUserService::new(tokens.clone()));
    (routes(AppState::new(users, tokens.clone())), tokens)
}

pub fn failing_app() -> (Router, TokenService) {
    let tokens = token_service();
    let users = Arc::new(InMemoryUserService::failing(tokens.clone()));
    (routes(AppState::new(users, tokens.clone())), tokens)
}

pub fn bearer(tokens: &TokenService) -> String {
    format!("Bearer {}", tokens.issue(Uuid::new_v4()).unwrap())
}

pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, Value) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (Response::from_parts(parts, Body::empty()), json)
}
