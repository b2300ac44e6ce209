//! Salted password hashing.
//!
//! Stored form is `hex(SHA-256(salt || password))` next to the hex salt.

use sha2::{Digest, Sha256};

/// Generate a fresh random salt (16 bytes = 32 hex chars).
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Hash a password with the given salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());

    hex::encode(hasher.finalize())
}

/// Check a candidate password against a stored hash.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let actual = hash_password(password, salt);
    constant_time_eq(actual.as_bytes(), expected_hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
