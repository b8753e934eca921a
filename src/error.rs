use {
    crate::constants::*,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::Error as IOError,
    },
};

/// Error returned when signing an HTTP request fails.
///
/// Every variant is terminal for the current signing attempt: each cause is a
/// configuration or input defect, not a transient condition, so nothing here
/// is retried internally.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The private key family (asymmetric vs. secret) is incompatible with the
    /// kind of primitive the selected algorithm requires.
    AlgorithmMismatch(/* message */ String),

    /// A header covered by the signature carries more than one value.
    AmbiguousHeader(/* message */ String),

    /// Reading the private key file failed with an underlying I/O error.
    IO(IOError),

    /// The signature parameters do not form a complete signature. Sample messages:
    /// `keyId is required.`
    /// `Signature header requires 'headers' parameter.`
    /// `Signature parameters have not been signed yet.`
    IncompleteSignature(/* message */ String),

    /// An underlying cryptographic primitive failed after the signer was
    /// successfully constructed.
    Internal(Box<dyn Error + Send + Sync>),

    /// The request method has no signing profile.
    InvalidRequestMethod(/* message */ String),

    /// The private key file is malformed -- the path is empty or names no
    /// file, the PEM armor is damaged, or the payload is not valid PKCS#8 DER.
    KeyFormat(/* message */ String),

    /// A header covered by the signature has a value that cannot be
    /// represented as visible ASCII.
    MalformedHeader(/* message */ String),

    /// A header covered by the signature is absent from the request.
    MissingHeader(/* message */ String),

    /// The trial signature performed at construction failed, meaning the key
    /// material decoded syntactically but is cryptographically unusable.
    SignerInitialization(/* message */ String),

    /// The portable algorithm name is not present in the registry.
    UnknownAlgorithm(/* message */ String),

    /// The private key uses an encoding the cryptography provider cannot use.
    UnsupportedAlgorithm(/* message */ String),
}

impl SignatureError {
    /// Stable PascalCase code identifying the error class.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlgorithmMismatch(_) => ERR_CODE_ALGORITHM_MISMATCH,
            Self::AmbiguousHeader(_) => ERR_CODE_AMBIGUOUS_HEADER,
            Self::IO(_) | Self::Internal(_) => ERR_CODE_INTERNAL_FAILURE,
            Self::IncompleteSignature(_) => ERR_CODE_INCOMPLETE_SIGNATURE,
            Self::InvalidRequestMethod(_) => ERR_CODE_INVALID_REQUEST_METHOD,
            Self::KeyFormat(_) => ERR_CODE_KEY_FORMAT,
            Self::MalformedHeader(_) => ERR_CODE_MALFORMED_HEADER,
            Self::MissingHeader(_) => ERR_CODE_MISSING_REQUIRED_HEADER,
            Self::SignerInitialization(_) => ERR_CODE_SIGNER_INITIALIZATION,
            Self::UnknownAlgorithm(_) => ERR_CODE_UNKNOWN_ALGORITHM,
            Self::UnsupportedAlgorithm(_) => ERR_CODE_UNSUPPORTED_ALGORITHM,
        }
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::AlgorithmMismatch(msg) => f.write_str(msg),
            Self::AmbiguousHeader(msg) => f.write_str(msg),
            Self::IO(ref e) => Display::fmt(e, f),
            Self::IncompleteSignature(msg) => f.write_str(msg),
            Self::Internal(ref e) => Display::fmt(e, f),
            Self::InvalidRequestMethod(msg) => f.write_str(msg),
            Self::KeyFormat(msg) => f.write_str(msg),
            Self::MalformedHeader(msg) => f.write_str(msg),
            Self::MissingHeader(msg) => f.write_str(msg),
            Self::SignerInitialization(msg) => f.write_str(msg),
            Self::UnknownAlgorithm(msg) => f.write_str(msg),
            Self::UnsupportedAlgorithm(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignatureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IO(ref e) => Some(e),
            Self::Internal(ref e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<IOError> for SignatureError {
    fn from(e: IOError) -> SignatureError {
        SignatureError::IO(e)
    }
}
