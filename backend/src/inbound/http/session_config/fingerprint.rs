//! Session key fingerprinting.
//!
//! Operators compare the fingerprint logged at start-up across replicas to
//! confirm they share one session key, without the key itself ever reaching
//! a log line.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of the key's signing half, as 16 lowercase
/// hex characters.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use worklog::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}
