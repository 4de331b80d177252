// src/auth/tokens.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SESSION_TOKEN_BYTES: usize = 32;

/// 15 random bytes -> 20 URL-safe chars, the shape of a store document id.
pub const RECORD_ID_BYTES: usize = 15;

/// Generate a secure random session token using the OS RNG.
pub fn session_token() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, SESSION_TOKEN_BYTES)
}

/// Mint an opaque id for a new store record.
pub fn new_record_id() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, RECORD_ID_BYTES)
}

/// Generate a URL-safe token from random bytes.
/// Base64 URL-safe, no padding.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Hash a token using SHA-256. Store this output in DB (BLOB), never the
/// raw token.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
