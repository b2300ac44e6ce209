//! Shared state handed to every handler through `State<AppState>`.

use std::sync::Arc;

use crate::services::{token::TokenService, user_service::UserService};

/// Dependencies injected into the HTTP layer.
///
/// Cloned per request; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(users: Arc<dyn UserService>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }
}
