// src/auth/password.rs
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SALT_BYTES: usize = 16;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn new_salt() -> [u8; SALT_BYTES] {
    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Salted SHA-256 digest stored alongside the salt.
pub fn hash_password(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

pub fn verify(salt: &[u8], stored_hash: &[u8], password: &str) -> bool {
    hashes_equal(&hash_password(salt, password), stored_hash)
}

/// Constant-time-ish compare for hashes (simple and sufficient here).
fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
