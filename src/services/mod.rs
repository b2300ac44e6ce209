//! Business logic services.
//!
//! Services contain the user-account logic separated from HTTP handlers:
//! persistence, password hashing and token issuance.

pub mod password;
pub mod token;
pub mod user_service;
