//! Classification of raw responses into payloads or [`Error`]s.
//!
//! Two response families exist and are handled by separate functions:
//!
//! - [`ResponseProcessor::process`] for the standard `{info, value}` envelope,
//!   with [`ResponseProcessor::check_sub_results`] for endpoints whose
//!   payload carries sub-operation outcomes.
//! - [`ResponseProcessor::process_ui`] for the UI session endpoints, whose
//!   bodies are not enveloped and whose errors are plain text.

use serde::de::DeserializeOwned;

use crate::{
    Error, ErrorContext, RawResponse, ResponseEnvelope, ResponseInfo, Result, SubOperation,
    SubResults, from_json, from_json_body,
};

/// Message reported for 413 responses.
pub const TOO_LARGE_MESSAGE: &str = "Request body was too large.";

/// Turns a [`RawResponse`] into a typed envelope or exactly one [`Error`].
///
/// The processor holds no state besides the per-client debug flag, so one
/// instance can serve any number of concurrent calls.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use tx_core::{Error, RawResponse, ResponseProcessor};
///
/// let processor = ResponseProcessor::new(false);
/// let response = RawResponse::new(500, HashMap::new(), None);
///
/// let err = processor.process::<serde_json::Value>(&response, None).unwrap_err();
/// assert_eq!(err.info().map(|i| i.message.as_str()), Some("500 - Internal Server Error"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseProcessor {
    include_request_body: bool,
}

impl ResponseProcessor {
    /// Create a processor. With `include_request_body`, errors carry the request body.
    #[must_use]
    pub const fn new(include_request_body: bool) -> Self {
        Self {
            include_request_body,
        }
    }

    /// Whether errors carry the request body.
    #[must_use]
    pub const fn includes_request_body(&self) -> bool {
        self.include_request_body
    }

    /// Classify a standard envelope response.
    ///
    /// Checks run in a fixed order:
    ///
    /// 1. 413 is always [`Error::TooLarge`], whatever the body.
    /// 2. A body that is not a valid envelope is [`Error::Unparsable`] on 2xx,
    ///    and treated as absent otherwise.
    /// 3. An absent envelope is [`Error::Http`] with code `Error` and message
    ///    `"{status} - {reason}"`.
    /// 4. A non-2xx status is [`Error::Http`] with the server's `info`.
    /// 5. Otherwise the envelope is returned.
    ///
    /// # Errors
    ///
    /// Returns the single [`Error`] variant selected by the steps above.
    pub fn process<T: DeserializeOwned>(
        &self,
        response: &RawResponse,
        request_body: Option<&str>,
    ) -> Result<ResponseEnvelope<T>> {
        if response.is_too_large() {
            let info = ResponseInfo::synthetic(TOO_LARGE_MESSAGE, None);
            return Err(Error::TooLarge(self.context(info, response, request_body)));
        }

        let envelope = match from_json_body::<ResponseEnvelope<T>>(response.body()) {
            Ok(envelope) => envelope,
            Err(err) if response.is_success() => {
                return Err(self.unparsable(err, response, request_body));
            }
            // Error responses are not obliged to carry a well-formed envelope.
            Err(_) => None,
        };

        let Some(envelope) = envelope else {
            let info = ResponseInfo::synthetic(response.status_line(), None);
            return Err(Error::Http(self.context(info, response, request_body)));
        };

        if !response.is_success() {
            return Err(Error::Http(self.context(envelope.info, response, request_body)));
        }

        Ok(envelope)
    }

    /// Raise the first failed sub-result of a successful envelope.
    ///
    /// Sub-results are inspected in [`SubOperation::PRIORITY`] order; absent
    /// ones were not requested and are skipped. The error carries the
    /// sub-result's code and message with the envelope's transaction id, and
    /// the raw response so the primary value can still be recovered with
    /// [`Error::partial_value`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for a failed primary operation, otherwise
    /// [`Error::Geocode`], [`Error::Indexing`] or
    /// [`Error::ProfessionNormalization`].
    pub fn check_sub_results<T: SubResults>(
        &self,
        envelope: &ResponseEnvelope<T>,
        response: &RawResponse,
        request_body: Option<&str>,
    ) -> Result<()> {
        let Some(value) = &envelope.value else {
            return Ok(());
        };

        let failure = SubOperation::PRIORITY.into_iter().find_map(|operation| {
            value
                .sub_result(operation)
                .filter(|result| !result.is_success)
                .map(|result| (operation, result))
        });

        match failure {
            None => Ok(()),
            Some((operation, result)) => {
                let info = result.to_info(envelope.info.transaction_id.clone());
                let context = *self.context(info, response, request_body);
                Err(Error::sub_operation(operation, context))
            }
        }
    }

    /// [`process`](Self::process) followed by [`check_sub_results`](Self::check_sub_results).
    ///
    /// # Errors
    ///
    /// Returns the first error raised by either step.
    pub fn process_with_sub_results<T: DeserializeOwned + SubResults>(
        &self,
        response: &RawResponse,
        request_body: Option<&str>,
    ) -> Result<ResponseEnvelope<T>> {
        let envelope = self.process::<T>(response, request_body)?;
        self.check_sub_results(&envelope, response, request_body)?;
        Ok(envelope)
    }

    /// Classify a UI session response.
    ///
    /// Success depends on the HTTP status only. On failure the body text is
    /// the error message, verbatim, and a transaction id is generated since
    /// these endpoints never return one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-2xx statuses and [`Error::Unparsable`]
    /// for a 2xx body that is not a `T`.
    pub fn process_ui<T: DeserializeOwned>(
        &self,
        response: &RawResponse,
        request_body: Option<&str>,
    ) -> Result<T> {
        let body = response.body().unwrap_or_default();

        if response.is_success() {
            return from_json(body.as_bytes())
                .map_err(|err| self.unparsable(err, response, request_body));
        }

        let info = ResponseInfo::synthetic(body, Some(uuid::Uuid::new_v4().to_string()));
        Err(Error::Http(self.context(info, response, request_body)))
    }

    fn context(
        &self,
        info: ResponseInfo,
        response: &RawResponse,
        request_body: Option<&str>,
    ) -> Box<ErrorContext> {
        let request_body = request_body
            .filter(|_| self.include_request_body)
            .map(str::to_string);
        Box::new(ErrorContext::new(info, response.clone(), request_body))
    }

    fn unparsable(&self, err: Error, response: &RawResponse, request_body: Option<&str>) -> Error {
        let (path, message) = match err {
            Error::JsonDeserialization { path, message } => (path, message),
            other => (String::new(), other.to_string()),
        };
        let info = ResponseInfo::synthetic(message, None);
        Error::Unparsable {
            context: self.context(info, response, request_body),
            path,
        }
    }
}
