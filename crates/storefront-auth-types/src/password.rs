//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored format: `pbkdf2-sha256$<rounds>$<salt>$<hash>`, salt and hash in
//! unpadded URL-safe base64. The round count travels with the hash so it can
//! be raised later without invalidating existing accounts.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "pbkdf2-sha256";
const ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("unrecognised password hash format")]
    InvalidFormat,
    #[error("key derivation failed")]
    Derivation,
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt: [u8; SALT_LEN] = rand::random();
    let mut key = [0u8; KEY_LEN];
    derive(password, &salt, ROUNDS, &mut key)?;
    Ok(format!(
        "{SCHEME}${ROUNDS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Check `password` against a hash produced by [`hash_password`].
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordError::InvalidFormat);
    };
    if scheme != SCHEME {
        return Err(PasswordError::InvalidFormat);
    }
    let rounds: u32 = rounds.parse().map_err(|_| PasswordError::InvalidFormat)?;
    let salt = URL_SAFE_NO_PAD
        .decode(salt)
        .map_err(|_| PasswordError::InvalidFormat)?;
    let expected = URL_SAFE_NO_PAD
        .decode(hash)
        .map_err(|_| PasswordError::InvalidFormat)?;
    if rounds == 0 || expected.is_empty() {
        return Err(PasswordError::InvalidFormat);
    }

    let mut computed = vec![0u8; expected.len()];
    derive(password, &salt, rounds, &mut computed)?;
    Ok(constant_time_eq(&computed, &expected))
}

fn derive(password: &str, salt: &[u8], rounds: u32, out: &mut [u8]) -> Result<(), PasswordError> {
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, rounds, out)
        .map_err(|_| PasswordError::Derivation)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
