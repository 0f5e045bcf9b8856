//! Hosted UI sessions.
//!
//! UI endpoints wrap an ordinary API request and answer with a session URL
//! rather than the standard envelope.

use serde::{Deserialize, Serialize};

/// Body of the `ui/...` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSessionRequest<Q> {
    /// Presentation options.
    pub ui_options: UiOptions,
    /// The API request the session runs.
    pub api_request: Q,
}

impl<Q> UiSessionRequest<Q> {
    /// A session with default options.
    pub fn new(api_request: Q) -> Self {
        Self {
            ui_options: UiOptions::default(),
            api_request,
        }
    }

    /// Use `options`.
    #[must_use]
    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.ui_options = options;
        self
    }
}

/// Presentation options for a UI session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiOptions {
    /// Show the per-category score breakdown.
    pub show_detailed_scores: bool,
    /// User name shown in the session, for auditing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Answer of a UI endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUiResponse {
    /// Session URL to open in a browser.
    pub url: String,
}
