//! API key generation, hashing, and webhook HMAC signing utilities.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and the webhook delivery pipeline.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::hashing;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of the generated API key string (alphanumeric characters).
pub const KEY_LENGTH: usize = 48;

/// Number of leading characters stored as a human-visible prefix.
pub const KEY_PREFIX_LENGTH: usize = 8;

/// Default requests-per-minute limit for a newly created API key.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: i32 = 60;

// ---------------------------------------------------------------------------
// API key generation
// ---------------------------------------------------------------------------

/// The result of generating a new API key.
pub struct GeneratedApiKey {
    /// The plaintext key (shown to the caller exactly once, never stored).
    pub plaintext: String,
    /// The first [`KEY_PREFIX_LENGTH`] characters of the key for display.
    pub prefix: String,
    /// The SHA-256 hex digest of the plaintext key (stored in the database).
    pub hash: String,
}

/// Generate a new random API key.
///
/// Returns the plaintext (shown once), prefix (for identification), and
/// SHA-256 hash (for storage). The plaintext must never be persisted.
pub fn generate_api_key() -> GeneratedApiKey {
    let key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect();

    let prefix = key[..KEY_PREFIX_LENGTH].to_string();
    let hash = hash_api_key(&key);

    GeneratedApiKey {
        plaintext: key,
        prefix,
        hash,
    }
}

/// Compute the SHA-256 hex digest of an API key.
///
/// Used both during key creation (to store the hash) and during
/// authentication (to look up the key by hash).
pub fn hash_api_key(key: &str) -> String {
    hashing::sha256_hex(key.as_bytes())
}

/// Extract the prefix from a plaintext API key.
pub fn extract_prefix(key: &str) -> &str {
    &key[..KEY_PREFIX_LENGTH.min(key.len())]
}

// ---------------------------------------------------------------------------
// Webhook HMAC signing
// ---------------------------------------------------------------------------

type HmacSha256 = Hmac<Sha256>;

/// Compute an HMAC-SHA256 signature for a webhook payload.
///
/// The `secret` is the subscription-specific signing secret. The `payload`
/// is the JSON body being delivered. Returns the hex-encoded signature.
pub fn compute_webhook_hmac(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    hashing::hex_encode(&mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_expected_shape() {
        let key = generate_api_key();
        assert_eq!(key.plaintext.len(), KEY_LENGTH);
        assert_eq!(key.prefix.len(), KEY_PREFIX_LENGTH);
        assert!(key.plaintext.starts_with(&key.prefix));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn hash_matches_regenerated_digest() {
        let key = generate_api_key();
        assert_eq!(hash_api_key(&key.plaintext), key.hash);
    }

    #[test]
    fn two_generated_keys_differ() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn extract_prefix_handles_short_input() {
        assert_eq!(extract_prefix("abc"), "abc");
        assert_eq!(extract_prefix("abcdefghijk"), "abcdefgh");
    }

    #[test]
    fn hmac_is_stable_and_secret_dependent() {
        let sig1 = compute_webhook_hmac("secret-a", "{\"x\":1}");
        let sig2 = compute_webhook_hmac("secret-a", "{\"x\":1}");
        let sig3 = compute_webhook_hmac("secret-b", "{\"x\":1}");
        assert_eq!(sig1, sig2);
        assert_ne!(sig1, sig3);
        assert_eq!(sig1.len(), 64);
    }
}
