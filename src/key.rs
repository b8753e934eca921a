//! Private key loading.
//!
//! Keys arrive as PEM text files holding a single PKCS#8 `PRIVATE KEY` block
//! with an RSA key inside. Loading is a one-shot operation: each call reads
//! the file fresh and produces an independent key handle, with no caching
//! across calls or runs.

use {
    crate::{constants::*, PrimitiveKind, SignatureError},
    log::debug,
    ring::signature::RsaKeyPair,
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        fs,
        path::Path,
    },
};

/// Error message: `"Private key path is empty."`
const MSG_KEY_PATH_EMPTY: &str = "Private key path is empty.";

/// Decoded private key material, owned by the signer constructed with it.
///
/// The variants mirror the two primitive kinds: an RSA key pair for
/// asymmetric signature algorithms and raw secret bytes for keyed MACs.
pub enum PrivateKeyMaterial {
    /// An RSA private key decoded from PKCS#8.
    Rsa(RsaKeyPair),

    /// A shared secret for keyed-MAC algorithms.
    Secret(Vec<u8>),
}

impl PrivateKeyMaterial {
    /// Wrap a shared secret for use with keyed-MAC algorithms.
    ///
    /// No file format is defined for secrets; they are provided
    /// programmatically.
    pub fn from_secret_bytes(secret: Vec<u8>) -> Self {
        Self::Secret(secret)
    }

    /// The kind of primitive this key material can drive.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Rsa(_) => PrimitiveKind::Asymmetric,
            Self::Secret(_) => PrimitiveKind::Mac,
        }
    }
}

impl Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("PrivateKeyMaterial")
    }
}

impl Display for PrivateKeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("PrivateKeyMaterial")
    }
}

/// Load an RSA private key from a PEM file.
///
/// The path is checked before any read: an empty path or a path naming no
/// file fails with a descriptive [`SignatureError::KeyFormat`] rather than a
/// bare I/O error.
pub fn load_private_key<P: AsRef<Path>>(path: P) -> Result<PrivateKeyMaterial, SignatureError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SignatureError::KeyFormat(MSG_KEY_PATH_EMPTY.to_string()));
    }
    if !path.is_file() {
        return Err(SignatureError::KeyFormat(format!(
            "No private key file at '{}'.",
            path.display()
        )));
    }

    let pem_text = fs::read_to_string(path)?;
    let key = private_key_from_pem(&pem_text)?;
    debug!("loaded RSA private key from {}", path.display());
    Ok(key)
}

/// Decode an RSA private key from PEM text.
///
/// The text must contain exactly one PEM block, and that block must be a
/// PKCS#8 `PRIVATE KEY`. Recognized non-PKCS#8 private-key encodings fail
/// with [`SignatureError::UnsupportedAlgorithm`]; everything else is a
/// [`SignatureError::KeyFormat`].
pub fn private_key_from_pem(pem_text: &str) -> Result<PrivateKeyMaterial, SignatureError> {
    let blocks = pem::parse_many(pem_text)
        .map_err(|e| SignatureError::KeyFormat(format!("Invalid PEM: {}", e)))?;
    if blocks.len() != 1 {
        return Err(SignatureError::KeyFormat(format!(
            "Expected exactly one PEM block, found {}.",
            blocks.len()
        )));
    }

    let block = &blocks[0];
    match block.tag() {
        PEM_TAG_PKCS8 => {
            let key_pair = RsaKeyPair::from_pkcs8(block.contents()).map_err(|e| {
                SignatureError::KeyFormat(format!("Invalid PKCS#8 RSA private key: {}", e))
            })?;
            Ok(PrivateKeyMaterial::Rsa(key_pair))
        }
        tag @ ("RSA PRIVATE KEY" | "EC PRIVATE KEY" | "OPENSSH PRIVATE KEY"
        | "ENCRYPTED PRIVATE KEY") => Err(SignatureError::UnsupportedAlgorithm(format!(
            "Unsupported private key encoding '{}'; expected a PKCS#8 'PRIVATE KEY' block.",
            tag
        ))),
        tag => Err(SignatureError::KeyFormat(format!(
            "'{}' is not a private key PEM block.",
            tag
        ))),
    }
}
