//! Prelude module for convenient imports.

pub use crate::{
    Error, HttpClient, Method, OperationResult, RawResponse, Request, ResponseEnvelope,
    ResponseInfo, ResponseProcessor, Result, SubOperation, SubResults,
};
