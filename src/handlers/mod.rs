//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to the user service
//! 3. Returns HTTP response (JSON envelope, status code)

/// Root welcome endpoint
pub mod root;
/// User account endpoints
pub mod users;
