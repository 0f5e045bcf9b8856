//! HTTP verbs used by the Tx REST API.

use derive_more::Display;

/// HTTP request method accepted by the Tx endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Read a resource (account, index, document).
    #[display("GET")]
    Get,
    /// Submit a document for parsing, searching or matching.
    #[display("POST")]
    Post,
    /// Remove an index or a document.
    #[display("DELETE")]
    Delete,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
        }
    }
}
