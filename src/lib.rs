//! Cavage-style HTTP request signing.
//!
//! This crate signs outbound HTTP requests with an HTTP Signature over the
//! RSA/HMAC-SHA256 family, proving the request originated from the holder of
//! a specific private key and was not altered in transit. The flow:
//!
//! 1. [`load_private_key`] decodes a PEM-encoded PKCS#8 RSA key.
//! 2. [`RequestSigner`] ensures the `Date` and `Digest` headers exist,
//!    canonicalizes `(request-target) date digest` into the signing string,
//!    signs it, and sets the `Authorization` header:
//!    `Signature keyId="…",algorithm="rsa-sha256",headers="…",signature="…"`.
//! 3. The signed [`http::Request`] is handed to whatever transport sends it.
//!
//! The canonical signing string is bit-exact by construction; see
//! [`signing_string`] for the rules. All failure modes are configuration or
//! input defects surfaced as [`SignatureError`], most of them at signer
//! construction time rather than mid-request.

mod algorithm;
mod canonical;
mod constants;
mod digest;
mod error;
mod key;
mod params;
mod request;
mod signer;

#[cfg(test)]
mod unittest;

pub use crate::{
    algorithm::{resolve, AlgorithmSpec, PrimitiveKind},
    canonical::{signing_string, SignatureComponent, SigningContext},
    constants::{DEFAULT_ALGORITHM, REQUEST_TARGET},
    digest::content_digest,
    error::SignatureError,
    key::{load_private_key, private_key_from_pem, PrivateKeyMaterial},
    params::SignatureParameters,
    request::{RequestSigner, SigningOptions, SigningOptionsBuilder},
    signer::Signer,
};
