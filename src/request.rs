//! The request signing policy.
//!
//! This is the seam between the pure signing math and the mutable request:
//! the only place that reads wall-clock time or mutates request state. It
//! ensures the headers the signature must cover exist, invokes the signer,
//! and writes the serialized result into the `Authorization` header.

use {
    crate::{
        constants::*, content_digest, PrivateKeyMaterial, SignatureComponent, SignatureError,
        Signer,
    },
    chrono::{DateTime, SecondsFormat, Utc},
    derive_builder::Builder,
    http::{
        header::{HeaderName, HeaderValue, AUTHORIZATION, DATE},
        Method, Request,
    },
    lazy_static::lazy_static,
    log::debug,
    std::collections::HashMap,
};

/// `Digest` header name.
static DIGEST: HeaderName = HeaderName::from_static(HDR_DIGEST);

lazy_static! {
    /// Components each signable method must cover, in signing-string order.
    /// Fixed at startup; currently identical for every signable method.
    static ref REQUIRED_COMPONENTS: HashMap<Method, Vec<SignatureComponent>> = {
        let mut table = HashMap::new();
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            table.insert(method, signed_components());
        }
        table
    };
}

/// The component list shared by every signing profile.
fn signed_components() -> Vec<SignatureComponent> {
    vec![
        SignatureComponent::RequestTarget,
        SignatureComponent::from_name(HDR_DATE),
        SignatureComponent::from_name(HDR_DIGEST),
    ]
}

/// Options controlling how outbound requests are signed.
///
/// SigningOptions structs are immutable. Use [`SigningOptionsBuilder`] to
/// construct one programmatically.
#[derive(Builder, Clone, Debug)]
pub struct SigningOptions {
    /// Identifier the receiving party uses to look up the verification key.
    #[builder(setter(into))]
    key_id: String,

    /// Portable name of the signature algorithm.
    #[builder(setter(into), default = "String::from(DEFAULT_ALGORITHM)")]
    algorithm: String,

    /// Source of the current time for injected `Date` headers.
    #[builder(default = "Utc::now")]
    clock: fn() -> DateTime<Utc>,
}

impl SigningOptions {
    /// Create a [SigningOptionsBuilder] to construct a [SigningOptions].
    #[inline]
    pub fn builder() -> SigningOptionsBuilder {
        SigningOptionsBuilder::default()
    }

    /// Retrieve the key identifier.
    #[inline(always)]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Retrieve the portable algorithm name.
    #[inline(always)]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

/// Signs outbound HTTP requests in place.
pub struct RequestSigner {
    signer: Signer,
    clock: fn() -> DateTime<Utc>,
}

impl RequestSigner {
    /// Create a request signer from key material and options.
    ///
    /// The underlying [`Signer`] is constructed here, so bad key/algorithm
    /// pairings surface now rather than on the first request.
    pub fn new(key: PrivateKeyMaterial, options: SigningOptions) -> Result<Self, SignatureError> {
        let SigningOptions {
            key_id,
            algorithm,
            clock,
        } = options;
        let signer = Signer::new(key, &algorithm, signed_components(), key_id)?;
        Ok(Self { signer, clock })
    }

    /// The key id signatures are issued under.
    #[inline(always)]
    pub fn key_id(&self) -> &str {
        self.signer.key_id()
    }

    /// Sign `request` in place.
    ///
    /// Injects `Date` and `Digest` only when absent, then computes the
    /// signature and sets the `Authorization` header, overwriting any prior
    /// value. `Authorization` is written only after signing succeeds; a
    /// failed attempt never leaves a partial signature on the request.
    ///
    /// OPTIONS requests carry no signable semantics and are returned
    /// unmodified.
    pub fn sign_request<B: AsRef<[u8]>>(
        &self,
        request: &mut Request<B>,
    ) -> Result<(), SignatureError> {
        let method = request.method().clone();
        if method == Method::OPTIONS {
            debug!("nothing to sign for OPTIONS");
            return Ok(());
        }
        if !REQUIRED_COMPONENTS.contains_key(&method) {
            return Err(SignatureError::InvalidRequestMethod(format!(
                "No signing profile for method '{}'.",
                method
            )));
        }

        if !request.headers().contains_key(DATE) {
            let now = (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true);
            let value =
                HeaderValue::from_str(&now).expect("RFC 3339 timestamps are valid header values");
            request.headers_mut().insert(DATE, value);
        }

        if !request.headers().contains_key(&DIGEST) {
            let digest = content_digest(request.body().as_ref());
            let value =
                HeaderValue::from_str(&digest).expect("digest values are valid header values");
            request.headers_mut().insert(&DIGEST, value);
        }

        let params = {
            let path_and_query = match request.uri().path_and_query() {
                Some(pq) if !pq.as_str().is_empty() => pq.as_str(),
                _ => request.uri().path(),
            };
            self.signer.sign(&method, path_and_query, request.headers())?
        };

        let value = params.to_header_value()?;
        request.headers_mut().insert(AUTHORIZATION, value);
        debug!(
            "signed {} {} as key '{}'",
            method,
            request.uri(),
            self.signer.key_id()
        );
        Ok(())
    }
}
