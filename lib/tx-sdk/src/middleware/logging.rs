//! Request/response logging middleware.
//!
//! Logs each exchange with `tracing`. Only the transport layer logs; response
//! classification stays silent so the embedding application decides what an
//! error is worth.
//!
//! Events never contain the service key, request bodies or response bodies.
//! Endpoints are logged by path, without the data center host.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::middleware::{ACCOUNT_ID_HEADER, SERVICE_KEY_HEADER};
use crate::{Error, RawResponse, Request, Result};

/// Layer that adds request/response logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Verbosity of the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also emit debug events with header names and payload sizes.
    Debug,
    /// One event per request and one per outcome.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Log a summary of each exchange.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a summary plus header names and payload sizes.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// What is worth knowing about an outgoing request.
#[derive(Debug)]
struct RequestSummary {
    method: crate::Method,
    endpoint: String,
    account: Option<String>,
    headers: Vec<String>,
    body_len: usize,
}

impl RequestSummary {
    fn of(request: &Request<Bytes>) -> Self {
        let mut headers: Vec<String> = request
            .headers()
            .keys()
            .map(|name| {
                if name.eq_ignore_ascii_case(SERVICE_KEY_HEADER) {
                    format!("{name}=<redacted>")
                } else {
                    name.clone()
                }
            })
            .collect();
        headers.sort();

        Self {
            method: request.method(),
            endpoint: request.url().path().to_string(),
            account: request.header(ACCOUNT_ID_HEADER).map(str::to_string),
            headers,
            body_len: request.body().map_or(0, Bytes::len),
        }
    }
}

/// How an exchange ended, as far as the transport can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    TooLarge,
    HttpError,
    Timeout,
    Transport,
}

impl Outcome {
    fn of(result: &Result<RawResponse>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Success,
            Ok(response) if response.is_too_large() => Self::TooLarge,
            Ok(_) => Self::HttpError,
            Err(err) if err.is_timeout() => Self::Timeout,
            Err(_) => Self::Transport,
        }
    }
}

fn log_outcome(
    result: &Result<RawResponse>,
    summary: &RequestSummary,
    level: LogLevel,
    elapsed_ms: u64,
) {
    if let (LogLevel::Debug, Ok(response)) = (level, result) {
        debug!(
            reason = response.reason_phrase(),
            content_type = response.header("content-type"),
            body_len = response.body().map_or(0, str::len),
            "response received"
        );
    }

    match (Outcome::of(result), result) {
        (Outcome::Success, Ok(response)) => {
            info!(status = response.status(), elapsed_ms, "request completed");
        }
        (Outcome::TooLarge, _) => {
            warn!(
                status = 413,
                body_len = summary.body_len,
                elapsed_ms,
                "request body rejected as too large"
            );
        }
        (Outcome::HttpError, Ok(response)) => {
            warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
        }
        (Outcome::Timeout, _) => warn!(elapsed_ms, "request timed out"),
        (_, Err(err)) => warn!(error = %err, elapsed_ms, "request failed"),
        (_, Ok(_)) => {}
    }
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = RawResponse, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = RawResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let summary = RequestSummary::of(&request);
        let level = self.level;
        let span = info_span!(
            "tx_request",
            method = %summary.method,
            endpoint = %summary.endpoint,
            account = summary.account.as_deref(),
        );

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                match level {
                    LogLevel::Debug => debug!(
                        headers = ?summary.headers,
                        body_len = summary.body_len,
                        "sending request"
                    ),
                    LogLevel::Info => info!("sending request"),
                }

                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                log_outcome(&result, &summary, level, elapsed_ms);
                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Method;

    fn request() -> Request<Bytes> {
        let url = url::Url::parse("https://api.us.textkernel.com/tx/v10/index/resumes?x=1")
            .expect("url");
        Request::builder(Method::Post, url)
            .header("Tx-AccountId", "12345678")
            .header("Tx-ServiceKey", "secret")
            .body(Bytes::from_static(b"{\"indexType\":\"Resume\"}"))
            .build()
    }

    #[test]
    fn layer_levels() {
        assert_eq!(LoggingLayer::new().level, LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level, LogLevel::Debug);
    }

    #[test]
    fn summary_redacts_service_key() {
        let summary = RequestSummary::of(&request());

        assert_eq!(summary.headers, vec!["Tx-AccountId", "Tx-ServiceKey=<redacted>"]);
        assert!(!format!("{summary:?}").contains("secret"));
    }

    #[test]
    fn summary_uses_path_and_account() {
        let summary = RequestSummary::of(&request());

        assert_eq!(summary.method, Method::Post);
        assert_eq!(summary.endpoint, "/tx/v10/index/resumes");
        assert_eq!(summary.account.as_deref(), Some("12345678"));
        assert_eq!(summary.body_len, 22);
    }

    #[test]
    fn outcomes() {
        let response = |status| Ok(RawResponse::new(status, HashMap::new(), None));

        assert_eq!(Outcome::of(&response(200)), Outcome::Success);
        assert_eq!(Outcome::of(&response(413)), Outcome::TooLarge);
        assert_eq!(Outcome::of(&response(404)), Outcome::HttpError);
        assert_eq!(Outcome::of(&Err(Error::timeout())), Outcome::Timeout);
        assert_eq!(Outcome::of(&Err(Error::connection("refused"))), Outcome::Transport);
    }
}
