//! Content hashing behind the `createHash` host capability.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a file's text.
///
/// The backend compares these across runs to detect changed inputs, so the
/// encoding must stay stable.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
