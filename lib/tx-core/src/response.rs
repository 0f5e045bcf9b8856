//! Raw transport responses.
//!
//! A [`RawResponse`] is what the transport hands to the
//! [`ResponseProcessor`](crate::ResponseProcessor): status, reason phrase,
//! headers and the body already decoded to text.

use std::collections::HashMap;

use crate::Charset;

/// HTTP response as produced by the transport, before classification.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    reason_phrase: String,
    headers: HashMap<String, String>,
    body: Option<String>,
}

impl RawResponse {
    /// Creates a new response.
    ///
    /// The reason phrase defaults to the canonical one for `status`.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Option<String>) -> Self {
        Self {
            status,
            reason_phrase: canonical_reason(status).to_string(),
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body,
        }
    }

    /// Creates a response from undecoded body bytes.
    ///
    /// The charset is taken from the `Content-Type` header; an empty body is
    /// recorded as absent.
    #[must_use]
    pub fn from_bytes(status: u16, headers: HashMap<String, String>, body: &[u8]) -> Self {
        let mut response = Self::new(status, headers, None);
        if !body.is_empty() {
            let charset = Charset::from_content_type(response.header("content-type"));
            response.body = Some(charset.decode(body));
        }
        response
    }

    /// Replace the reason phrase reported by the server.
    #[must_use]
    pub fn with_reason_phrase(mut self, reason_phrase: impl Into<String>) -> Self {
        self.reason_phrase = reason_phrase.into();
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// HTTP reason phrase, such as `Internal Server Error`.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Response headers, keyed by lowercased name.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decoded body text, if the server sent one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Status is within 200-299.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 413 Payload Too Large.
    #[must_use]
    pub const fn is_too_large(&self) -> bool {
        self.status == 413
    }

    /// `"{status} - {reason}"`, the message used when the server sent no usable envelope.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} - {}", self.status, self.reason_phrase)
    }
}

fn canonical_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
}
