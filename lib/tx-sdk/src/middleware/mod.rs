//! Tower middleware layers for the Tx transport.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service through
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer). The first
//! layer added is the first to see a request.
//!
//! - [`AccountAuthLayer`] - adds the account credential headers
//! - [`LoggingLayer`] - logs requests/responses using `tracing`
//!
//! No retry layer is offered: every failure reaches the caller exactly once.
//!
//! ```ignore
//! use tx_sdk::HyperClient;
//!
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .with_account_auth("12345678", "my-service-key")
//!     .build();
//! ```

mod account_auth;
mod logging;

pub use account_auth::{
    ACCOUNT_ID_HEADER, AccountAuth, AccountAuthLayer, SERVICE_KEY_HEADER, TRACKING_TAGS_HEADER,
};
pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
