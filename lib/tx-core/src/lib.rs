//! Core types for the Tx platform SDK.
//!
//! This crate is transport-agnostic and provides:
//! - [`Method`], [`Request`] and [`RequestBuilder`] - outgoing requests
//! - [`RawResponse`] - a response as received, with case-insensitive headers
//! - [`ResponseEnvelope`], [`ResponseInfo`] and [`OperationResult`] - the
//!   `{info, value}` shape every endpoint answers with
//! - [`ResponseProcessor`] - classification of responses into payloads or errors
//! - [`Error`] and [`Result`] - the error taxonomy
//! - [`HttpClient`] - the transport trait

mod body;
mod client;
mod envelope;
mod error;
mod method;
pub mod prelude;
mod processor;
mod request;
mod response;

pub use body::{Charset, ContentType, from_json, from_json_body, to_json};
pub use client::HttpClient;
pub use envelope::{
    CustomerDetails, OperationResult, ResponseEnvelope, ResponseInfo, SubOperation, SubResults,
};
pub use error::{Error, ErrorContext, Result, TransportError};
pub use method::Method;
pub use processor::{ResponseProcessor, TOO_LARGE_MESSAGE};
pub use request::{Request, RequestBuilder};
pub use response::RawResponse;
