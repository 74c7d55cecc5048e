//! Password digests.
//!
//! Passwords are stored as the lower-case hex SHA-256 of their UTF-8 bytes. There is no
//! per-user salt, so equal passwords produce equal digests and the digests are open to
//! precomputed lookup. Accounts written by earlier runs depend on this exact encoding.

use sha2::{Digest, Sha256};

/// Returns the hex SHA-256 digest of `plain`.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recomputes the digest of `candidate` and compares it with `stored_hash`.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    hash_password(candidate) == stored_hash
}
