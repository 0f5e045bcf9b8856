//! The response envelope every Tx endpoint answers with.
//!
//! ```json
//! {
//!   "info": { "code": "Success", "message": "...", "transactionId": "...", "isSuccess": true },
//!   "value": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Outer JSON object of every standard API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Call metadata and outcome.
    #[serde(default)]
    pub info: ResponseInfo,
    /// Endpoint-specific payload, absent for endpoints that return nothing.
    #[serde(default = "Option::default")]
    pub value: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// The transaction id reported by the server.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.info.transaction_id.as_deref()
    }

    /// Consume into the payload.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

/// Call metadata returned in `info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseInfo {
    /// Outcome code, such as `Success` or `DataNotFound`.
    pub code: String,
    /// Human-readable outcome description.
    pub message: String,
    /// Correlation id for support requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Whether the call succeeded. Authoritative over the HTTP status.
    pub is_success: bool,
    /// Version of the engine that served the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    /// API version that served the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Server-side processing time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elapsed_milliseconds: Option<u64>,
    /// Account usage at the time of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
}

impl ResponseInfo {
    /// Info synthesized on the client when the server supplied none.
    #[must_use]
    pub fn synthetic(message: impl Into<String>, transaction_id: Option<String>) -> Self {
        Self {
            code: "Error".to_string(),
            message: message.into(),
            transaction_id,
            ..Self::default()
        }
    }
}

impl std::fmt::Display for ResponseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(transaction_id) = &self.transaction_id {
            write!(f, " (transaction {transaction_id})")?;
        }
        Ok(())
    }
}

/// Account details echoed back with each call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct CustomerDetails {
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub region: Option<String>,
    pub credits_remaining: Option<f64>,
    pub credits_used: Option<f64>,
    pub max_concurrent_requests: Option<u32>,
}

/// Outcome of one sub-operation embedded in a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationResult {
    /// Whether the sub-operation succeeded.
    pub is_success: bool,
    /// Outcome code, such as `Success` or `InsufficientData`.
    pub code: String,
    /// Human-readable outcome description.
    pub message: String,
}

impl OperationResult {
    /// Build the error info for this outcome, tagged with the call's transaction id.
    #[must_use]
    pub fn to_info(&self, transaction_id: Option<String>) -> ResponseInfo {
        ResponseInfo {
            code: self.code.clone(),
            message: self.message.clone(),
            transaction_id,
            is_success: self.is_success,
            ..ResponseInfo::default()
        }
    }
}

/// Named sub-operations that may accompany a primary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubOperation {
    /// The operation the endpoint exists for, such as parsing.
    Primary,
    /// Geocoding of the document's addresses.
    Geocode,
    /// Adding the document to an index.
    Indexing,
    /// Normalizing job titles against the profession taxonomy.
    ProfessionNormalization,
}

impl SubOperation {
    /// Order in which failed sub-results are reported; the first failure wins.
    pub const PRIORITY: [Self; 4] = [
        Self::Primary,
        Self::Geocode,
        Self::Indexing,
        Self::ProfessionNormalization,
    ];
}

/// Payloads that carry sub-operation outcomes.
///
/// Return `None` for an operation that was not requested.
pub trait SubResults {
    /// The outcome of `operation`, if it was part of the call.
    fn sub_result(&self, operation: SubOperation) -> Option<&OperationResult>;
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn envelope_defaults_missing_fields() {
        let envelope: ResponseEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"info":{"code":"DataNotFound","message":"no such document"}}"#)
                .expect("deserialize");

        check!(envelope.info.code == "DataNotFound");
        check!(envelope.info.message == "no such document");
        check!(!envelope.info.is_success);
        check!(envelope.value.is_none());
        check!(envelope.transaction_id().is_none());
    }

    #[test]
    fn info_reads_metadata() {
        let info: ResponseInfo = serde_json::from_value(serde_json::json!({
            "code": "Success",
            "message": "ok",
            "transactionId": "tx-1",
            "isSuccess": true,
            "engineVersion": "10.5",
            "totalElapsedMilliseconds": 87,
            "customerDetails": { "accountId": "123", "creditsRemaining": 41.5 }
        }))
        .expect("deserialize");

        check!(info.transaction_id.as_deref() == Some("tx-1"));
        check!(info.total_elapsed_milliseconds == Some(87));
        check!(
            info.customer_details.and_then(|c| c.account_id).as_deref() == Some("123")
        );
    }

    #[test]
    fn info_display() {
        let info = ResponseInfo::synthetic("500 - Internal Server Error", None);
        assert_eq!(info.to_string(), "Error: 500 - Internal Server Error");

        let info = ResponseInfo::synthetic("boom", Some("abc".to_string()));
        assert_eq!(info.to_string(), "Error: boom (transaction abc)");
    }

    #[test]
    fn operation_result_to_info() {
        let result = OperationResult {
            is_success: false,
            code: "GeoFail".to_string(),
            message: "no coordinates".to_string(),
        };
        let info = result.to_info(Some("tx-9".to_string()));

        check!(info.code == "GeoFail");
        check!(info.message == "no coordinates");
        check!(info.transaction_id.as_deref() == Some("tx-9"));
        check!(!info.is_success);
    }
}
