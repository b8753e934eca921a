//! Canonical signing-string construction.
//!
//! The signing string is the exact byte sequence that gets cryptographically
//! signed: one line per signing component, joined with a single `\n` and no
//! trailing newline. Any deviation -- extra whitespace, a different line
//! terminator, different case -- produces a signature the receiving party
//! cannot verify, so everything here must be bit-exact.

use {
    crate::{constants::*, SignatureError},
    http::{header::HeaderMap, Method},
    log::trace,
};

/// One component of the signing string.
///
/// Components are either the `(request-target)` pseudo-header, which encodes
/// the method and path rather than a literal wire header, or the lower-cased
/// name of a real request header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureComponent {
    /// The `(request-target)` pseudo-header.
    RequestTarget,

    /// A request header, stored lower-cased.
    Header(String),
}

impl SignatureComponent {
    /// Parse a component from its wire name, lower-casing header names.
    pub fn from_name(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(REQUEST_TARGET) {
            Self::RequestTarget
        } else {
            Self::Header(raw.to_ascii_lowercase())
        }
    }

    /// The wire name of this component.
    pub fn as_str(&self) -> &str {
        match self {
            Self::RequestTarget => REQUEST_TARGET,
            Self::Header(name) => name,
        }
    }
}

/// The request elements a single sign operation reads.
///
/// `path_and_query` is the request path with the raw query string already
/// joined by `?` when present; it is emitted into the signing string without
/// re-encoding.
pub struct SigningContext<'a> {
    /// The request method.
    pub method: &'a Method,

    /// The request path, including the query string if present.
    pub path_and_query: &'a str,

    /// The request headers the components are resolved against.
    pub headers: &'a HeaderMap,
}

/// Build the canonical signing string for the given components, in their
/// declared order.
///
/// Every non-pseudo component must resolve to exactly one header value:
/// an absent header is [`SignatureError::MissingHeader`], a repeated header
/// is [`SignatureError::AmbiguousHeader`], and a value outside visible ASCII
/// is [`SignatureError::MalformedHeader`].
pub fn signing_string(
    components: &[SignatureComponent],
    ctx: &SigningContext<'_>,
) -> Result<String, SignatureError> {
    let mut lines = Vec::with_capacity(components.len());

    for component in components {
        match component {
            SignatureComponent::RequestTarget => {
                lines.push(format!(
                    "{}: {} {}",
                    REQUEST_TARGET,
                    ctx.method.as_str().to_ascii_lowercase(),
                    ctx.path_and_query
                ));
            }
            SignatureComponent::Header(name) => {
                let mut values = ctx.headers.get_all(name.as_str()).iter();
                let value = match (values.next(), values.next()) {
                    (None, _) => {
                        return Err(SignatureError::MissingHeader(format!(
                            "Missing required header '{}'.",
                            name
                        )))
                    }
                    (Some(_), Some(_)) => {
                        return Err(SignatureError::AmbiguousHeader(format!(
                            "Expected exactly one value for header '{}'.",
                            name
                        )))
                    }
                    (Some(value), None) => value.to_str().map_err(|_| {
                        SignatureError::MalformedHeader(format!(
                            "Value of header '{}' is not visible ASCII.",
                            name
                        ))
                    })?,
                };
                lines.push(format!("{}: {}", name, value));
            }
        }
    }

    let signing_string = lines.join("\n");
    trace!("signing string:\n{}", signing_string);
    Ok(signing_string)
}

#[cfg(test)]
mod tests {
    use {
        crate::{signing_string, SignatureComponent, SigningContext},
        http::{header::HeaderMap, HeaderValue, Method},
    };

    fn components(names: &[&str]) -> Vec<SignatureComponent> {
        names.iter().map(|n| SignatureComponent::from_name(n)).collect()
    }

    #[test_log::test]
    fn test_component_names() {
        assert_eq!(SignatureComponent::from_name("(request-target)"), SignatureComponent::RequestTarget);
        assert_eq!(SignatureComponent::from_name("(Request-Target)"), SignatureComponent::RequestTarget);
        assert_eq!(
            SignatureComponent::from_name("Digest"),
            SignatureComponent::Header("digest".to_string())
        );
        assert_eq!(SignatureComponent::from_name("Date").as_str(), "date");
        assert_eq!(SignatureComponent::RequestTarget.as_str(), "(request-target)");
    }

    #[test_log::test]
    fn test_exact_canonical_form() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));
        headers.insert("digest", HeaderValue::from_static("abc"));

        let ctx = SigningContext {
            method: &Method::POST,
            path_and_query: "/foo?x=1",
            headers: &headers,
        };
        let result = signing_string(&components(&["(request-target)", "date", "digest"]), &ctx).unwrap();
        assert_eq!(result, "(request-target): post /foo?x=1\ndate: D\ndigest: abc");
    }

    #[test_log::test]
    fn test_component_order_defines_line_order() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));
        headers.insert("digest", HeaderValue::from_static("abc"));

        let ctx = SigningContext {
            method: &Method::GET,
            path_and_query: "/",
            headers: &headers,
        };
        let result = signing_string(&components(&["digest", "date"]), &ctx).unwrap();
        assert_eq!(result, "digest: abc\ndate: D");
    }

    #[test_log::test]
    fn test_method_lowercased_query_preserved() {
        let headers = HeaderMap::new();
        let ctx = SigningContext {
            method: &Method::DELETE,
            path_and_query: "/v1/Widgets?id=5&Q=%2F",
            headers: &headers,
        };
        let result = signing_string(&components(&["(request-target)"]), &ctx).unwrap();
        assert_eq!(result, "(request-target): delete /v1/Widgets?id=5&Q=%2F");
    }

    #[test_log::test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Date", HeaderValue::from_static("D"));

        let ctx = SigningContext {
            method: &Method::GET,
            path_and_query: "/",
            headers: &headers,
        };
        let result = signing_string(&components(&["DATE"]), &ctx).unwrap();
        assert_eq!(result, "date: D");
    }

    #[test_log::test]
    fn test_missing_header_names_the_header() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("D"));

        let ctx = SigningContext {
            method: &Method::POST,
            path_and_query: "/foo",
            headers: &headers,
        };
        let e = signing_string(&components(&["(request-target)", "date", "digest"]), &ctx).unwrap_err();
        assert_eq!(e.error_code(), "MissingRequiredHeader");
        assert_eq!(e.to_string(), "Missing required header 'digest'.");
    }

    #[test_log::test]
    fn test_repeated_header_is_ambiguous() {
        let mut headers = HeaderMap::new();
        headers.append("date", HeaderValue::from_static("D1"));
        headers.append("date", HeaderValue::from_static("D2"));

        let ctx = SigningContext {
            method: &Method::GET,
            path_and_query: "/",
            headers: &headers,
        };
        let e = signing_string(&components(&["date"]), &ctx).unwrap_err();
        assert_eq!(e.error_code(), "AmbiguousHeader");
        assert_eq!(e.to_string(), "Expected exactly one value for header 'date'.");
    }

    #[test_log::test]
    fn test_non_ascii_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_bytes(b"D\xff").unwrap());

        let ctx = SigningContext {
            method: &Method::GET,
            path_and_query: "/",
            headers: &headers,
        };
        let e = signing_string(&components(&["date"]), &ctx).unwrap_err();
        assert_eq!(e.error_code(), "MalformedHeader");
    }
}
