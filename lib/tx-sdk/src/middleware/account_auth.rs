//! Account authentication middleware.
//!
//! Adds the `Tx-AccountId` and `Tx-ServiceKey` headers, and `Tx-TrackingTags`
//! when tags are configured, to every outgoing request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, RawResponse, Request, Result};

/// Header carrying the account id.
pub const ACCOUNT_ID_HEADER: &str = "Tx-AccountId";
/// Header carrying the service key.
pub const SERVICE_KEY_HEADER: &str = "Tx-ServiceKey";
/// Header carrying comma-separated tracking tags.
pub const TRACKING_TAGS_HEADER: &str = "Tx-TrackingTags";

#[derive(Debug)]
struct Credentials {
    account_id: String,
    service_key: String,
    tracking_tags: Option<String>,
}

/// Layer that authenticates requests with account credentials.
///
/// # Example
///
/// ```ignore
/// use tx_sdk::middleware::AccountAuthLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(AccountAuthLayer::new("12345678", "my-service-key"))
///     .service(client);
/// ```
#[derive(Debug, Clone)]
pub struct AccountAuthLayer {
    credentials: Arc<Credentials>,
}

impl AccountAuthLayer {
    /// Create a new layer with the given credentials.
    pub fn new(account_id: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            credentials: Arc::new(Credentials {
                account_id: account_id.into(),
                service_key: service_key.into(),
                tracking_tags: None,
            }),
        }
    }

    /// Also send tracking tags with every request. An empty list sends nothing.
    #[must_use]
    pub fn with_tracking_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        Self {
            credentials: Arc::new(Credentials {
                account_id: self.credentials.account_id.clone(),
                service_key: self.credentials.service_key.clone(),
                tracking_tags: (!joined.is_empty()).then_some(joined),
            }),
        }
    }
}

impl<S> Layer<S> for AccountAuthLayer {
    type Service = AccountAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccountAuth {
            inner,
            credentials: Arc::clone(&self.credentials),
        }
    }
}

/// Service that authenticates requests with account credentials.
#[derive(Debug, Clone)]
pub struct AccountAuth<S> {
    inner: S,
    credentials: Arc<Credentials>,
}

impl<S> Service<Request<Bytes>> for AccountAuth<S>
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

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        let headers = request.headers_mut();
        headers.insert(
            ACCOUNT_ID_HEADER.to_string(),
            self.credentials.account_id.clone(),
        );
        headers.insert(
            SERVICE_KEY_HEADER.to_string(),
            self.credentials.service_key.clone(),
        );
        if let Some(tags) = &self.credentials.tracking_tags {
            headers.insert(TRACKING_TAGS_HEADER.to_string(), tags.clone());
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_tags_are_joined() {
        let layer = AccountAuthLayer::new("1", "k").with_tracking_tags(["ats", " import ", ""]);
        assert_eq!(layer.credentials.tracking_tags.as_deref(), Some("ats,import"));
        assert_eq!(layer.credentials.account_id, "1");
    }

    #[test]
    fn empty_tracking_tags_send_nothing() {
        let layer = AccountAuthLayer::new("1", "k").with_tracking_tags(Vec::<String>::new());
        assert!(layer.credentials.tracking_tags.is_none());
    }
}
