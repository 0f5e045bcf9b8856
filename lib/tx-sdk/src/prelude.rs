//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tx_sdk::prelude::*;
//! ```

pub use crate::models::{
    GeocodeOptions, IndexDocumentRequest, IndexType, MatchRequest, ParseJobValue, ParseRequest,
    ParseResumeValue, SearchRequest, UiSessionRequest,
};
pub use crate::{
    ClientConfig, DataCenter, Error, HttpClient, HyperClient, ResponseEnvelope, ResponseInfo,
    Result, SubOperation, TxClient, TxSettings,
};
