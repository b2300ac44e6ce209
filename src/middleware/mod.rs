//! HTTP middleware components.
//!
//! Middleware run before route handlers and can short-circuit requests,
//! for example rejecting ones without a valid token.

/// Bearer token authentication middleware
pub mod auth;
