//! The signer: a private key paired with an algorithm and a declared
//! component list.
//!
//! Construction performs a trial signature over a fixed payload, converting a
//! whole class of "key is bad" failures from first-use (mid-request) into
//! construction-time errors, before any network I/O happens.

use {
    crate::{
        algorithm::{resolve, AlgorithmSpec, Primitive},
        canonical::{signing_string, SigningContext},
        constants::*,
        PrivateKeyMaterial, SignatureComponent, SignatureError, SignatureParameters,
    },
    base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
    hmac::{Hmac, Mac},
    http::{header::HeaderMap, Method},
    log::debug,
    ring::{rand::SystemRandom, signature::RSA_PKCS1_SHA256},
    sha2::Sha256,
};

/// A configured request signer.
///
/// Holds no mutable state between calls; one instance may be shared across
/// concurrent callers.
#[derive(Debug)]
pub struct Signer {
    key: PrivateKeyMaterial,
    algorithm: &'static AlgorithmSpec,
    params: SignatureParameters,
}

impl Signer {
    /// Create a signer from key material, a portable algorithm name, the
    /// component list every signature will cover, and the key id.
    ///
    /// Fails with [`SignatureError::UnknownAlgorithm`] for an unregistered
    /// name, [`SignatureError::AlgorithmMismatch`] when the key family does
    /// not fit the primitive kind, and [`SignatureError::SignerInitialization`]
    /// when the trial signature fails.
    pub fn new(
        key: PrivateKeyMaterial,
        algorithm_name: &str,
        components: Vec<SignatureComponent>,
        key_id: impl Into<String>,
    ) -> Result<Self, SignatureError> {
        let algorithm = resolve(algorithm_name)?;
        if key.kind() != algorithm.kind() {
            return Err(SignatureError::AlgorithmMismatch(format!(
                "A {} key cannot drive the {} algorithm '{}'.",
                key.kind(),
                algorithm.kind(),
                algorithm.portable_name()
            )));
        }

        let params = SignatureParameters::new(key_id, algorithm.portable_name(), components)?;
        let signer = Self {
            key,
            algorithm,
            params,
        };

        if let Err(e) = signer.sign_bytes(SELF_TEST_PAYLOAD) {
            return Err(SignatureError::SignerInitialization(format!(
                "Cannot initialize the signer with the provided algorithm and key: {}",
                e
            )));
        }

        debug!(
            "signer ready: key_id='{}' algorithm='{}' components='{}'",
            signer.params.key_id(),
            signer.algorithm.portable_name(),
            signer.params.component_list()
        );
        Ok(signer)
    }

    /// The key id signatures are issued under.
    #[inline(always)]
    pub fn key_id(&self) -> &str {
        self.params.key_id()
    }

    /// The resolved algorithm.
    #[inline(always)]
    pub fn algorithm(&self) -> &'static AlgorithmSpec {
        self.algorithm
    }

    /// The components every signature covers, in signing-string order.
    #[inline(always)]
    pub fn components(&self) -> &[SignatureComponent] {
        self.params.components()
    }

    /// Sign one request.
    ///
    /// Canonicalizes the configured components against the given method,
    /// path, and headers, signs the UTF-8 bytes of the result, and returns a
    /// new [`SignatureParameters`] carrying the base64-encoded signature.
    pub fn sign(
        &self,
        method: &Method,
        path_and_query: &str,
        headers: &HeaderMap,
    ) -> Result<SignatureParameters, SignatureError> {
        let ctx = SigningContext {
            method,
            path_and_query,
            headers,
        };
        let signing_string = signing_string(self.params.components(), &ctx)?;
        let raw = self.sign_bytes(signing_string.as_bytes())?;
        Ok(self.params.signed(BASE64.encode(raw)))
    }

    /// Produce raw signature bytes for a message with the selected primitive.
    fn sign_bytes(&self, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
        match self.algorithm.primitive() {
            Primitive::RsaPkcs1Sha256 => {
                let key_pair = match &self.key {
                    PrivateKeyMaterial::Rsa(key_pair) => key_pair,
                    _ => {
                        return Err(SignatureError::AlgorithmMismatch(
                            "RSA signing requires an RSA private key.".to_string(),
                        ))
                    }
                };
                let mut signature = vec![0; key_pair.public().modulus_len()];
                key_pair
                    .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), message, &mut signature)
                    .map_err(|e| SignatureError::Internal(Box::new(e)))?;
                Ok(signature)
            }
            Primitive::HmacSha256 => {
                let secret = match &self.key {
                    PrivateKeyMaterial::Secret(secret) => secret,
                    _ => {
                        return Err(SignatureError::AlgorithmMismatch(
                            "HMAC signing requires secret key bytes.".to_string(),
                        ))
                    }
                };
                let mut mac = Hmac::<Sha256>::new_from_slice(secret)
                    .map_err(|e| SignatureError::Internal(Box::new(e)))?;
                mac.update(message);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            private_key_from_pem, unittest::TEST_RSA_PEM, PrivateKeyMaterial, SignatureComponent,
            Signer,
        },
        base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
        hmac::{Hmac, Mac},
        http::{header::HeaderMap, HeaderValue, Method},
        sha2::Sha256,
    };

    fn signed_components() -> Vec<SignatureComponent> {
        vec![
            SignatureComponent::RequestTarget,
            SignatureComponent::from_name("date"),
            SignatureComponent::from_name("digest"),
        ]
    }

    fn rsa_key() -> PrivateKeyMaterial {
        private_key_from_pem(TEST_RSA_PEM).unwrap()
    }

    #[test_log::test]
    fn test_construction_self_test_passes() {
        let signer = Signer::new(rsa_key(), "rsa-sha256", signed_components(), "test-key").unwrap();
        assert_eq!(signer.key_id(), "test-key");
        assert_eq!(signer.algorithm().portable_name(), "rsa-sha256");
        assert_eq!(signer.components().len(), 3);
    }

    #[test_log::test]
    fn test_unknown_algorithm_at_construction() {
        let e = Signer::new(rsa_key(), "rsa-sha1", signed_components(), "test-key").unwrap_err();
        assert_eq!(e.error_code(), "UnknownAlgorithm");
    }

    #[test_log::test]
    fn test_mismatch_secret_key_with_rsa() {
        let key = PrivateKeyMaterial::from_secret_bytes(b"secret".to_vec());
        let e = Signer::new(key, "rsa-sha256", signed_components(), "test-key").unwrap_err();
        assert_eq!(e.error_code(), "AlgorithmMismatch");
    }

    #[test_log::test]
    fn test_mismatch_rsa_key_with_hmac() {
        let e = Signer::new(rsa_key(), "hmac-sha256", signed_components(), "test-key").unwrap_err();
        assert_eq!(e.error_code(), "AlgorithmMismatch");
    }

    #[test_log::test]
    fn test_empty_key_id_rejected() {
        let e = Signer::new(rsa_key(), "rsa-sha256", signed_components(), "").unwrap_err();
        assert_eq!(e.to_string(), "keyId is required.");
    }

    #[test_log::test]
    fn test_empty_components_rejected() {
        let e = Signer::new(rsa_key(), "rsa-sha256", vec![], "test-key").unwrap_err();
        assert_eq!(e.error_code(), "IncompleteSignature");
    }

    #[test_log::test]
    fn test_sign_produces_parameters() {
        let signer = Signer::new(rsa_key(), "rsa-sha256", signed_components(), "test-key").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("Sun, 05 Jan 2014 21:31:40 GMT"));
        headers.insert("digest", HeaderValue::from_static("sha-256=AAA="));

        let params = signer.sign(&Method::POST, "/foo?x=1", &headers).unwrap();
        assert_eq!(params.key_id(), "test-key");
        assert_eq!(params.algorithm(), "rsa-sha256");
        assert_eq!(params.component_list(), "(request-target) date digest");

        // A 2048-bit RSA signature is 256 bytes.
        let raw = BASE64.decode(params.signature().unwrap()).unwrap();
        assert_eq!(raw.len(), 256);
    }

    #[test_log::test]
    fn test_rsa_signing_is_deterministic() {
        let signer = Signer::new(rsa_key(), "rsa-sha256", signed_components(), "test-key").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));
        headers.insert("digest", HeaderValue::from_static("abc"));

        // PKCS#1 v1.5 is deterministic: identical input, identical bytes.
        let first = signer.sign(&Method::GET, "/v1/widgets?id=5", &headers).unwrap();
        let second = signer.sign(&Method::GET, "/v1/widgets?id=5", &headers).unwrap();
        assert_eq!(first.signature().unwrap(), second.signature().unwrap());
    }

    #[test_log::test]
    fn test_sign_missing_header() {
        let signer = Signer::new(rsa_key(), "rsa-sha256", signed_components(), "test-key").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));

        let e = signer.sign(&Method::GET, "/", &headers).unwrap_err();
        assert_eq!(e.error_code(), "MissingRequiredHeader");
        assert!(e.to_string().contains("digest"));
    }

    #[test_log::test]
    fn test_hmac_arm_matches_reference() {
        let secret = b"shared secret".to_vec();
        let key = PrivateKeyMaterial::from_secret_bytes(secret.clone());
        let signer = Signer::new(key, "hmac-sha256", vec![SignatureComponent::from_name("date")], "mac-key")
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));

        let params = signer.sign(&Method::GET, "/", &headers).unwrap();

        let mut mac = Hmac::<Sha256>::new_from_slice(&secret).unwrap();
        mac.update(b"date: D");
        let expected = BASE64.encode(mac.finalize().into_bytes());
        assert_eq!(params.signature().unwrap(), expected);
    }
}
