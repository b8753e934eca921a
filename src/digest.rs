//! Request body digests.
//!
//! The `Digest` header is a content hash of the request body, included as
//! signed input. Computing it is a collaborator concern, not part of the
//! signing protocol itself; the signing policy only requires that some value
//! be present before signing proceeds.

use {
    crate::constants::DIGEST_SHA256_PREFIX,
    base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
    sha2::{Digest, Sha256},
};

/// Compute a `Digest` header value for a request body:
/// `sha-256=<base64 of SHA-256(body)>`.
pub fn content_digest(body: &[u8]) -> String {
    format!("{}{}", DIGEST_SHA256_PREFIX, BASE64.encode(Sha256::digest(body)))
}

#[cfg(test)]
mod tests {
    use crate::content_digest;

    #[test_log::test]
    fn test_empty_body() {
        // SHA-256 of the empty string.
        assert_eq!(
            content_digest(b""),
            "sha-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test_log::test]
    fn test_body_changes_digest() {
        let digest = content_digest(br#"{"id":5}"#);
        assert!(digest.starts_with("sha-256="));
        assert!(digest.ends_with('='));
        assert_ne!(digest, content_digest(br#"{"id":6}"#));
    }
}
