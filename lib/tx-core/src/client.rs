//! Transport trait.
//!
//! [`HttpClient`] is the seam between request building and the network.
//! `tx-sdk` provides a hyper-based implementation; tests can supply canned
//! responses by implementing it on a small struct.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{RawResponse, Request, Result};

/// Executes one HTTP exchange.
///
/// Implementations report connection-level failures, including timeouts,
/// as [`Error::Transport`](crate::Error::Transport) and return every answered
/// request as a [`RawResponse`], whatever its status. Classification is left
/// to the [`ResponseProcessor`](crate::ResponseProcessor).
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no response was received.
    fn execute(&self, request: Request<Bytes>) -> impl Future<Output = Result<RawResponse>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(&self, request: Request<Bytes>) -> impl Future<Output = Result<RawResponse>> + Send {
        C::execute(self, request)
    }
}
