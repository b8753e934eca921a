//! The portable-name algorithm registry.
//!
//! Signature schemes are identified on the wire by a portable name such as
//! `rsa-sha256`, decoupled from any particular cryptography-library
//! identifier. The registry maps each portable name to the kind of primitive
//! it needs (asymmetric signature vs. keyed MAC) and to the concrete
//! primitive used to produce signature bytes. Adding an algorithm means
//! adding one table entry and one [`Primitive`] arm in the signer.

use {
    crate::{constants::*, SignatureError},
    lazy_static::lazy_static,
    std::{
        collections::HashMap,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// The capability a signature algorithm requires from its key material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Signs with the private half of an asymmetric key pair.
    Asymmetric,

    /// Computes a MAC keyed with a shared secret.
    Mac,
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Asymmetric => f.write_str("asymmetric"),
            Self::Mac => f.write_str("keyed-MAC"),
        }
    }
}

/// Concrete signing primitive backing a registered algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Primitive {
    /// RSA PKCS#1 v1.5 signature over SHA-256 (`ring`).
    RsaPkcs1Sha256,

    /// HMAC over SHA-256 (`hmac` + `sha2`).
    HmacSha256,
}

/// A registered signature algorithm.
#[derive(Clone, Copy, Debug)]
pub struct AlgorithmSpec {
    portable_name: &'static str,
    kind: PrimitiveKind,
    primitive: Primitive,
}

impl AlgorithmSpec {
    /// The scheme-neutral name carried in the `algorithm` signature parameter.
    #[inline(always)]
    pub fn portable_name(&self) -> &'static str {
        self.portable_name
    }

    /// The kind of key material this algorithm requires.
    #[inline(always)]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline(always)]
    pub(crate) fn primitive(&self) -> Primitive {
        self.primitive
    }
}

lazy_static! {
    /// The fixed algorithm table. Read-only after startup; every portable
    /// name maps to exactly one primitive kind.
    static ref ALGORITHMS: HashMap<&'static str, AlgorithmSpec> = {
        let mut table = HashMap::new();
        table.insert(
            RSA_SHA256,
            AlgorithmSpec {
                portable_name: RSA_SHA256,
                kind: PrimitiveKind::Asymmetric,
                primitive: Primitive::RsaPkcs1Sha256,
            },
        );
        table.insert(
            HMAC_SHA256,
            AlgorithmSpec {
                portable_name: HMAC_SHA256,
                kind: PrimitiveKind::Mac,
                primitive: Primitive::HmacSha256,
            },
        );
        table
    };
}

/// Look up an algorithm by its portable name.
///
/// Callers resolve at signer construction time so an unrecognized name
/// surfaces before any request is built.
pub fn resolve(portable_name: &str) -> Result<&'static AlgorithmSpec, SignatureError> {
    ALGORITHMS.get(portable_name).ok_or_else(|| {
        SignatureError::UnknownAlgorithm(format!("Unknown signature algorithm '{}'", portable_name))
    })
}

#[cfg(test)]
mod tests {
    use crate::{resolve, PrimitiveKind};

    #[test_log::test]
    fn test_resolve_known() {
        let rsa = resolve("rsa-sha256").unwrap();
        assert_eq!(rsa.portable_name(), "rsa-sha256");
        assert_eq!(rsa.kind(), PrimitiveKind::Asymmetric);

        let hmac = resolve("hmac-sha256").unwrap();
        assert_eq!(hmac.portable_name(), "hmac-sha256");
        assert_eq!(hmac.kind(), PrimitiveKind::Mac);
    }

    #[test_log::test]
    fn test_resolve_unknown() {
        let e = resolve("rsa-sha512").unwrap_err();
        assert_eq!(e.error_code(), "UnknownAlgorithm");
        assert_eq!(e.to_string(), "Unknown signature algorithm 'rsa-sha512'");

        // Portable names are matched exactly, never case-folded.
        let e = resolve("RSA-SHA256").unwrap_err();
        assert_eq!(e.error_code(), "UnknownAlgorithm");
    }
}
