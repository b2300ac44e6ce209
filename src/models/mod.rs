//! Data models representing database entities and API payloads.

/// User account model
pub mod user;
