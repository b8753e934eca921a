//! The API client used by the `sigreq` binary.
//!
//! Wraps a blocking `reqwest` client: builds the request, lets the signing
//! core stamp it, sends it, and renders the response for a terminal.

use {
    anyhow::{bail, Context, Result},
    bytes::Bytes,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode, Uri},
    log::{debug, info},
    sigreq::{load_private_key, RequestSigner, SigningOptions},
    std::path::Path,
};

/// Message shown for a 403 response, per the signing service's behavior.
const MSG_FORBIDDEN: &str = "The signature string is malformed or the key-id is wrong.";

/// A client that signs every request it sends.
pub struct ApiClient {
    endpoint: Uri,
    signer: RequestSigner,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Validate the endpoint and key configuration and build the client.
    ///
    /// The private key is loaded and trial-signed here, so a bad key fails
    /// before any request is attempted.
    pub fn new(endpoint: &str, key_id: &str, key_file: &Path) -> Result<Self> {
        let endpoint: Uri = endpoint
            .parse()
            .with_context(|| format!("endpoint '{}' is not a valid URL", endpoint))?;
        if endpoint.scheme().is_none() || endpoint.authority().is_none() {
            bail!("endpoint '{}' must be an absolute http(s) URL", endpoint);
        }
        if key_id.trim().is_empty() {
            bail!("key id must not be empty");
        }

        let key = load_private_key(key_file)
            .with_context(|| format!("cannot load private key from '{}'", key_file.display()))?;
        let options = SigningOptions::builder().key_id(key_id).build().expect("all fields set");
        let signer = RequestSigner::new(key, options)?;
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("cannot construct the HTTP client")?;

        Ok(Self {
            endpoint,
            signer,
            http,
        })
    }

    pub fn get(&self) -> Result<SignedResponse> {
        self.send(Method::GET, Bytes::new(), false)
    }

    pub fn delete(&self) -> Result<SignedResponse> {
        self.send(Method::DELETE, Bytes::new(), false)
    }

    pub fn post(&self, payload: String) -> Result<SignedResponse> {
        self.send(Method::POST, Bytes::from(payload), true)
    }

    pub fn put(&self, payload: String) -> Result<SignedResponse> {
        self.send(Method::PUT, Bytes::from(payload), true)
    }

    /// Build, sign, and send one request.
    fn send(&self, method: Method, payload: Bytes, json_body: bool) -> Result<SignedResponse> {
        let mut builder = Request::builder().method(method.clone()).uri(self.endpoint.clone());
        if json_body {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let mut request = builder.body(payload).context("cannot build the request")?;

        self.signer.sign_request(&mut request)?;
        debug!(
            "authorization: {:?}",
            request.headers().get(http::header::AUTHORIZATION)
        );

        let request = reqwest::blocking::Request::try_from(request.map(|body| body.to_vec()))
            .context("cannot convert the signed request")?;
        let response = self.http.execute(request).context("request failed")?;

        let status = response.status();
        let body = response.text().context("cannot read the response body")?;
        info!("{} {} -> {}", method, self.endpoint, status);
        Ok(SignedResponse { status, body })
    }
}

/// Status and body of a completed call.
pub struct SignedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl SignedResponse {
    /// Render the response for a terminal, pretty-printing JSON bodies.
    pub fn render(&self) -> String {
        if self.status == StatusCode::FORBIDDEN {
            return format!("{} - {}", self.status.as_u16(), MSG_FORBIDDEN);
        }
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone())
            }
            Err(_) => self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::SignedResponse, http::StatusCode};

    #[test]
    fn test_render_pretty_prints_json() {
        let response = SignedResponse {
            status: StatusCode::OK,
            body: r#"{"authentication_key":{"role":"PRIVATE"}}"#.to_string(),
        };
        let rendered = response.render();
        assert!(rendered.contains("\"role\": \"PRIVATE\""));
    }

    #[test]
    fn test_render_passes_through_non_json() {
        let response = SignedResponse {
            status: StatusCode::OK,
            body: "plain text".to_string(),
        };
        assert_eq!(response.render(), "plain text");
    }

    #[test]
    fn test_render_forbidden() {
        let response = SignedResponse {
            status: StatusCode::FORBIDDEN,
            body: String::new(),
        };
        assert_eq!(
            response.render(),
            "403 - The signature string is malformed or the key-id is wrong."
        );
    }
}
