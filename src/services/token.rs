//! Signed bearer tokens.
//!
//! Format: `<user_id>.<expires_at_unix>.<hex_hmac>`, where the HMAC-SHA256
//! covers `<user_id>.<expires_at_unix>`.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Identity carried by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub user_id: Uuid,
    pub expires_at: i64,
}

/// Issues and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            ttl,
        }
    }

    /// Issue a token for `user_id` expiring `ttl` from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("token expiry out of range".to_string()))?
            .timestamp();
        self.issue_with_expiry(user_id, expires_at)
    }

    fn issue_with_expiry(&self, user_id: Uuid, expires_at: i64) -> Result<String, AppError> {
        let payload = format!("{user_id}.{expires_at}");
        let signature = hex::encode(self.mac(&payload)?.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Verify signature and expiry.
    ///
    /// # Errors
    ///
    /// `InvalidToken` for any malformed, tampered or expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let (payload, signature) = token.rsplit_once('.').ok_or(AppError::InvalidToken)?;
        let (user_id, expires_at) = payload.split_once('.').ok_or(AppError::InvalidToken)?;

        let signature = hex::decode(signature).map_err(|_| AppError::InvalidToken)?;
        self.mac(payload)?
            .verify_slice(&signature)
            .map_err(|_| AppError::InvalidToken)?;

        let user_id = Uuid::parse_str(user_id).map_err(|_| AppError::InvalidToken)?;
        let expires_at: i64 = expires_at.parse().map_err(|_| AppError::InvalidToken)?;

        if expires_at <= Utc::now().timestamp() {
            return Err(AppError::InvalidToken);
        }

        Ok(Claims {
            user_id,
            expires_at,
        })
    }

    fn mac(&self, payload: &str) -> Result<HmacSha256, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(format!("invalid token key: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}
