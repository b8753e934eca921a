//! Common constants used throughout the crate.
//!
//! Consolidated here so the entire crate agrees on these values; if one is
//! spelled incorrectly, at least it can be fixed in one spot.
//!
//! Tests that check the content of an error code or message should not use
//! these constants; they should use hard-coded strings so the tests are also
//! testing for misspellings.
//!
//! Please keep this file organized alphabetically.

/// Default portable algorithm name used when none is configured.
pub const DEFAULT_ALGORITHM: &str = "rsa-sha256";

/// Value prefix for a SHA-256 `Digest` header.
pub(crate) const DIGEST_SHA256_PREFIX: &str = "sha-256=";

/// Error code: AlgorithmMismatch
pub(crate) const ERR_CODE_ALGORITHM_MISMATCH: &str = "AlgorithmMismatch";

/// Error code: AmbiguousHeader
pub(crate) const ERR_CODE_AMBIGUOUS_HEADER: &str = "AmbiguousHeader";

/// Error code: IncompleteSignature
pub(crate) const ERR_CODE_INCOMPLETE_SIGNATURE: &str = "IncompleteSignature";

/// Error code: InternalFailure
pub(crate) const ERR_CODE_INTERNAL_FAILURE: &str = "InternalFailure";

/// Error code: InvalidRequestMethod
pub(crate) const ERR_CODE_INVALID_REQUEST_METHOD: &str = "InvalidRequestMethod";

/// Error code: KeyFormat
pub(crate) const ERR_CODE_KEY_FORMAT: &str = "KeyFormat";

/// Error code: MalformedHeader
pub(crate) const ERR_CODE_MALFORMED_HEADER: &str = "MalformedHeader";

/// Error code: MissingRequiredHeader
pub(crate) const ERR_CODE_MISSING_REQUIRED_HEADER: &str = "MissingRequiredHeader";

/// Error code: SignerInitialization
pub(crate) const ERR_CODE_SIGNER_INITIALIZATION: &str = "SignerInitialization";

/// Error code: UnknownAlgorithm
pub(crate) const ERR_CODE_UNKNOWN_ALGORITHM: &str = "UnknownAlgorithm";

/// Error code: UnsupportedAlgorithm
pub(crate) const ERR_CODE_UNSUPPORTED_ALGORITHM: &str = "UnsupportedAlgorithm";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "date";

/// Header for `digest`
pub(crate) const HDR_DIGEST: &str = "digest";

/// Portable name for HMAC over SHA-256.
pub(crate) const HMAC_SHA256: &str = "hmac-sha256";

/// PEM tag of a PKCS#8 private key block.
pub(crate) const PEM_TAG_PKCS8: &str = "PRIVATE KEY";

/// Pseudo-component encoding the request method and target.
pub const REQUEST_TARGET: &str = "(request-target)";

/// Portable name for RSA PKCS#1 v1.5 over SHA-256.
pub(crate) const RSA_SHA256: &str = "rsa-sha256";

/// Fixed payload signed by the construction-time self test.
pub(crate) const SELF_TEST_PAYLOAD: &[u8] = b"validation";

/// Authorization scheme of the serialized signature, including the
/// separating space.
pub(crate) const SIGNATURE_SCHEME_PREFIX: &str = "Signature ";
