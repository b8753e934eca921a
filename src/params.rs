//! The structured signature parameter set and its wire form.
//!
//! A parameter set is first constructed unsigned, declaring the key id,
//! algorithm, and covered components; signing reproduces it with the encoded
//! signature filled in. Signing is a pure transform, never an in-place edit.
//!
//! The wire form is a single header value:
//! `Signature keyId="…",algorithm="…",headers="…",signature="…"`.

use {
    crate::{constants::*, SignatureComponent, SignatureError},
    base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
    http::header::HeaderValue,
    lazy_static::lazy_static,
    regex::Regex,
    std::{fmt::Write, str::FromStr},
};

/// Error message: `"algorithm is required."`
const MSG_ALGORITHM_REQUIRED: &str = "algorithm is required.";

/// Error message: `"At least one signing component is required."`
const MSG_COMPONENTS_REQUIRED: &str = "At least one signing component is required.";

/// Error message: `"keyId is required."`
const MSG_KEY_ID_REQUIRED: &str = "keyId is required.";

/// Error message: `"Signature parameters have not been signed yet."`
const MSG_NOT_SIGNED: &str = "Signature parameters have not been signed yet.";

lazy_static! {
    /// `name="value"` parameter pattern of the wire form.
    static ref SIGNATURE_PARAM: Regex = Regex::new(r#"([A-Za-z]+)="([^"]*)""#).unwrap();
}

/// The structured representation of an HTTP signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureParameters {
    key_id: String,
    algorithm: String,
    components: Vec<SignatureComponent>,
    signature: Option<String>,
}

impl SignatureParameters {
    /// Create an unsigned parameter set.
    ///
    /// The key id and component list must be non-empty; component names are
    /// lower-cased here so the declared list and the produced signing string
    /// always agree.
    pub fn new(
        key_id: impl Into<String>,
        algorithm: impl Into<String>,
        components: Vec<SignatureComponent>,
    ) -> Result<Self, SignatureError> {
        let key_id = key_id.into();
        if key_id.trim().is_empty() {
            return Err(SignatureError::IncompleteSignature(MSG_KEY_ID_REQUIRED.to_string()));
        }

        let algorithm = algorithm.into();
        if algorithm.trim().is_empty() {
            return Err(SignatureError::IncompleteSignature(MSG_ALGORITHM_REQUIRED.to_string()));
        }

        if components.is_empty() {
            return Err(SignatureError::IncompleteSignature(MSG_COMPONENTS_REQUIRED.to_string()));
        }

        Ok(Self {
            key_id,
            algorithm,
            components,
            signature: None,
        })
    }

    /// Reproduce this parameter set with the encoded signature populated.
    pub(crate) fn signed(&self, signature: String) -> Self {
        Self {
            signature: Some(signature),
            ..self.clone()
        }
    }

    /// The key id the receiving party uses to look up the verification key.
    #[inline(always)]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The portable name of the signature algorithm.
    #[inline(always)]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// The covered components, in signing-string order.
    #[inline(always)]
    pub fn components(&self) -> &[SignatureComponent] {
        &self.components
    }

    /// The base64-encoded signature, if this set has been signed.
    #[inline(always)]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// The space-joined component list as it appears in the `headers`
    /// parameter.
    pub fn component_list(&self) -> String {
        let mut list = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                list.push(' ');
            }
            list.push_str(component.as_str());
        }
        list
    }

    /// Serialize to the wire header value.
    ///
    /// Fails with [`SignatureError::IncompleteSignature`] when called on an
    /// unsigned parameter set.
    pub fn to_header_value(&self) -> Result<HeaderValue, SignatureError> {
        let signature = self
            .signature
            .as_deref()
            .ok_or_else(|| SignatureError::IncompleteSignature(MSG_NOT_SIGNED.to_string()))?;

        let mut value = String::with_capacity(
            SIGNATURE_SCHEME_PREFIX.len() + self.key_id.len() + self.algorithm.len() + signature.len() + 64,
        );
        value.push_str(SIGNATURE_SCHEME_PREFIX);
        write!(
            value,
            "keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            self.algorithm,
            self.component_list(),
            signature
        )
        .expect("writing to a String cannot fail");

        HeaderValue::from_str(&value).map_err(|e| SignatureError::Internal(Box::new(e)))
    }
}

impl FromStr for SignatureParameters {
    type Err = SignatureError;

    /// Parse the wire header value, with or without the leading `Signature `
    /// scheme.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let params_str = match s.get(..SIGNATURE_SCHEME_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(SIGNATURE_SCHEME_PREFIX) => {
                &s[SIGNATURE_SCHEME_PREFIX.len()..]
            }
            _ => s,
        };

        let mut key_id = None;
        let mut algorithm = None;
        let mut headers = None;
        let mut signature = None;
        for cap in SIGNATURE_PARAM.captures_iter(params_str) {
            match &cap[1] {
                "keyId" => key_id = Some(cap[2].to_string()),
                "algorithm" => algorithm = Some(cap[2].to_string()),
                "headers" => headers = Some(cap[2].to_string()),
                "signature" => signature = Some(cap[2].to_string()),
                _ => {}
            }
        }

        let key_id = key_id.ok_or_else(|| missing_parameter("keyId"))?;
        let algorithm = algorithm.ok_or_else(|| missing_parameter("algorithm"))?;
        let headers = headers.ok_or_else(|| missing_parameter("headers"))?;
        let signature = signature.ok_or_else(|| missing_parameter("signature"))?;

        if BASE64.decode(&signature).is_err() {
            return Err(SignatureError::IncompleteSignature(
                "'signature' parameter is not valid base64.".to_string(),
            ));
        }

        let components = headers
            .split(' ')
            .filter(|name| !name.is_empty())
            .map(SignatureComponent::from_name)
            .collect();

        let mut params = Self::new(key_id, algorithm, components)?;
        params.signature = Some(signature);
        Ok(params)
    }
}

fn missing_parameter(name: &str) -> SignatureError {
    SignatureError::IncompleteSignature(format!("Signature header requires '{}' parameter.", name))
}
