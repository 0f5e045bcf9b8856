//! Body codec: JSON (de)serialization and charset-aware text decoding.

use bytes::Bytes;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character set of a response body, as announced by `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// UTF-8, also used for anything absent or unrecognized.
    #[default]
    Utf8,
    /// 7-bit ASCII, a subset of UTF-8.
    Ascii,
    /// ISO-8859-1, each byte maps to the code point of the same value.
    Latin1,
}

impl Charset {
    /// Resolve the charset parameter of a `Content-Type` header value.
    ///
    /// # Example
    ///
    /// ```
    /// use tx_core::Charset;
    ///
    /// assert_eq!(Charset::from_content_type(Some("text/plain; charset=ISO-8859-1")), Charset::Latin1);
    /// assert_eq!(Charset::from_content_type(Some("application/json")), Charset::Utf8);
    /// assert_eq!(Charset::from_content_type(None), Charset::Utf8);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Utf8;
        };

        let charset = content_type
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim().trim_matches('"').to_ascii_lowercase());

        match charset.as_deref() {
            Some("us-ascii" | "ascii") => Self::Ascii,
            Some("iso-8859-1" | "latin1" | "latin-1" | "l1") => Self::Latin1,
            _ => Self::Utf8,
        }
    }

    /// Decode raw body bytes into text.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected: the codec
    /// decides later whether the text is a well-formed payload.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 | Self::Ascii => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "value.parsingResponse.code").
///
/// # Example
///
/// ```
/// use tx_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Account { name: String }
///
/// let account: Account = from_json(br#"{"name":"acme"}"#).expect("deserialize");
/// assert_eq!(account, Account { name: "acme".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an optional body, telling an absent body apart from a malformed one.
///
/// - `None`, an empty or whitespace-only body, or a JSON `null` → `Ok(None)`
/// - a well-formed body → `Ok(Some(value))`
/// - anything else → `Err`
///
/// # Errors
///
/// Returns an error if the body is present but does not deserialize as `T`.
pub fn from_json_body<T: serde::de::DeserializeOwned>(body: Option<&str>) -> Result<Option<T>> {
    match body.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => from_json::<Option<T>>(text.as_bytes()),
    }
}
