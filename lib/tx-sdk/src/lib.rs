//! Client for the Tx resume/job parsing, search and matching API.
//!
//! [`TxClient`] exposes one async method per endpoint. Each call sends a JSON
//! request through a pooled HTTPS transport and classifies the answer with
//! [`ResponseProcessor`]: the caller gets the typed `{info, value}` envelope
//! or exactly one [`Error`].
//!
//! # Example
//!
//! ```ignore
//! use tx_sdk::prelude::*;
//!
//! let client = TxClient::from_env()?;
//! let document = std::fs::read("resume.pdf")?;
//! let request = ParseRequest::new(&document).with_geocoding(GeocodeOptions::enabled());
//!
//! match client.parse_resume(&request).await {
//!     Ok(response) => println!("{:?}", response.value),
//!     Err(err @ Error::Geocode(_)) => {
//!         // The resume was parsed; only geocoding failed.
//!         let partial = err.partial_value::<ParseResumeValue>();
//!         println!("{partial:?}");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod client;
mod config;
mod connector;
mod endpoints;
pub mod middleware;
pub mod models;
pub mod prelude;
mod transport;

pub use client::{AckResponse, TxClient};
pub use config::{ClientConfig, ClientConfigBuilder, DataCenter, TxSettings};
pub use endpoints::Endpoints;
pub use transport::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use tx_core::{
    Charset, ContentType, CustomerDetails, Error, ErrorContext, HttpClient, Method,
    OperationResult, RawResponse, Request, RequestBuilder, ResponseEnvelope, ResponseInfo,
    ResponseProcessor, Result, SubOperation, SubResults, TOO_LARGE_MESSAGE, TransportError,
    from_json, to_json,
};
pub use url;
