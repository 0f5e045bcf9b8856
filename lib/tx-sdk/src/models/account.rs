//! Account information.

use serde::{Deserialize, Serialize};

/// `value` of `GET account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct AccountInfo {
    pub credits_remaining: f64,
    pub credits_used: f64,
    pub max_concurrent_requests: u32,
    pub expiration_date: Option<String>,
    pub ip_address: Option<String>,
    pub region: Option<String>,
}
