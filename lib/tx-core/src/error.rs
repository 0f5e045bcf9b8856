//! Error taxonomy for Tx API calls.
//!
//! Every failed call yields exactly one [`Error`] variant:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`Error::Transport`] | no usable response (connection, TLS, timeout) |
//! | [`Error::TooLarge`] | request payload rejected with 413 |
//! | [`Error::Unparsable`] | 2xx response whose body is not a valid envelope |
//! | [`Error::Http`] | the server rejected or failed the request |
//! | [`Error::Geocode`], [`Error::Indexing`], [`Error::ProfessionNormalization`] | the call succeeded but a requested sub-operation did not |
//!
//! The remaining variants are raised on the client before anything is sent.

use derive_more::{Display, Error, From};
use serde::de::DeserializeOwned;

use crate::{RawResponse, ResponseEnvelope, ResponseInfo, SubOperation};

// ============================================================================
// Transport Errors
// ============================================================================

/// The call never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,
}

// ============================================================================
// Error Context
// ============================================================================

/// What is known about a call the server answered but that still failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    info: ResponseInfo,
    response: RawResponse,
    request_body: Option<String>,
}

impl ErrorContext {
    /// Creates a context.
    ///
    /// `request_body` is only kept by callers that enabled debugging.
    #[must_use]
    pub fn new(info: ResponseInfo, response: RawResponse, request_body: Option<String>) -> Self {
        Self {
            info,
            response,
            request_body,
        }
    }

    /// Classified outcome: from the server when available, synthesized otherwise.
    #[must_use]
    pub const fn info(&self) -> &ResponseInfo {
        &self.info
    }

    /// The response as received.
    #[must_use]
    pub const fn response(&self) -> &RawResponse {
        &self.response
    }

    /// The request body, when debugging was enabled on the client.
    #[must_use]
    pub fn request_body(&self) -> Option<&str> {
        self.request_body.as_deref()
    }

    /// Transaction id for support requests, when known.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.info.transaction_id.as_deref()
    }

    /// HTTP status code of the response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for Tx API calls.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The call never produced a usable response.
    #[display("{_0}")]
    #[from]
    Transport(TransportError),

    /// The request payload exceeded the server's size limit (HTTP 413).
    #[display("request too large: {}", _0.info())]
    #[from(skip)]
    TooLarge(#[error(not(source))] Box<ErrorContext>),

    /// A 2xx response whose body could not be read as the expected envelope.
    #[display("unparsable response at '{path}': {}", context.info().message)]
    #[from(skip)]
    Unparsable {
        /// Context, with the codec message as the info message.
        context: Box<ErrorContext>,
        /// JSON path to the field that failed to deserialize.
        path: String,
    },

    /// The server rejected or failed the request.
    #[display("HTTP error {}: {}", _0.status(), _0.info())]
    #[from(skip)]
    Http(#[error(not(source))] Box<ErrorContext>),

    /// The document was processed but geocoding failed.
    #[display("geocoding failed: {}", _0.info())]
    #[from(skip)]
    Geocode(#[error(not(source))] Box<ErrorContext>),

    /// The document was processed but could not be indexed.
    #[display("indexing failed: {}", _0.info())]
    #[from(skip)]
    Indexing(#[error(not(source))] Box<ErrorContext>),

    /// The document was processed but profession normalization failed.
    #[display("profession normalization failed: {}", _0.info())]
    #[from(skip)]
    ProfessionNormalization(#[error(not(source))] Box<ErrorContext>),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "value.resumeData.contactInformation").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Transport(TransportError::Connection(message.into()))
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Transport(TransportError::Tls(message.into()))
    }

    /// Create a timeout error.
    #[must_use]
    pub const fn timeout() -> Self {
        Self::Transport(TransportError::Timeout)
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create the error reported for a failed sub-operation.
    #[must_use]
    pub fn sub_operation(operation: SubOperation, context: ErrorContext) -> Self {
        let context = Box::new(context);
        match operation {
            SubOperation::Primary => Self::Http(context),
            SubOperation::Geocode => Self::Geocode(context),
            SubOperation::Indexing => Self::Indexing(context),
            SubOperation::ProfessionNormalization => Self::ProfessionNormalization(context),
        }
    }

    /// Returns `true` if no usable response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout))
    }

    /// Returns `true` if the request payload was too large.
    #[must_use]
    pub const fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge(_))
    }

    /// Returns `true` if a 2xx response could not be parsed.
    #[must_use]
    pub const fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable { .. })
    }

    /// The failed sub-operation, for geocode, indexing and profession-normalization errors.
    #[must_use]
    pub const fn failed_sub_operation(&self) -> Option<SubOperation> {
        match self {
            Self::Geocode(_) => Some(SubOperation::Geocode),
            Self::Indexing(_) => Some(SubOperation::Indexing),
            Self::ProfessionNormalization(_) => Some(SubOperation::ProfessionNormalization),
            _ => None,
        }
    }

    /// Context of errors raised after the server answered.
    #[must_use]
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::TooLarge(context)
            | Self::Unparsable { context, .. }
            | Self::Http(context)
            | Self::Geocode(context)
            | Self::Indexing(context)
            | Self::ProfessionNormalization(context) => Some(context),
            _ => None,
        }
    }

    /// Classified outcome info, if the server answered.
    #[must_use]
    pub fn info(&self) -> Option<&ResponseInfo> {
        self.context().map(ErrorContext::info)
    }

    /// Transaction id, when known.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.context().and_then(ErrorContext::transaction_id)
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.context().map(ErrorContext::status)
    }

    /// The response as received, if the server answered.
    #[must_use]
    pub fn raw_response(&self) -> Option<&RawResponse> {
        self.context().map(ErrorContext::response)
    }

    /// The request body, when debugging was enabled on the client.
    #[must_use]
    pub fn request_body(&self) -> Option<&str> {
        self.context().and_then(ErrorContext::request_body)
    }

    /// Decode the `value` the server sent alongside the failure.
    ///
    /// For sub-operation errors this is the primary result (a parsed resume
    /// whose geocoding failed is still a parsed resume).
    ///
    /// Returns `None` if there is no response body or it has no `value`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// match client.parse_resume(&request).await {
    ///     Err(err @ Error::Geocode(_)) => {
    ///         let partial: ParseResumeValue = err.partial_value().expect("value")?;
    ///     }
    ///     other => { /* ... */ }
    /// }
    /// ```
    pub fn partial_value<T: DeserializeOwned>(&self) -> Option<Result<T>> {
        let body = self.raw_response()?.body()?;
        match crate::from_json::<ResponseEnvelope<T>>(body.as_bytes()) {
            Ok(envelope) => envelope.value.map(Ok),
            Err(err) => Some(Err(err)),
        }
    }
}
