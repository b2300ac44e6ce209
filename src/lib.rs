//! User account service.
//!
//! A REST API for registering users, logging them in with signed bearer
//! tokens, and managing accounts and their roles.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HMAC-SHA256 signed bearer tokens
//! - **Format**: JSON envelopes `{ code, data?, message }`

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
