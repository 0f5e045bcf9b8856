//! Searching and matching.

use serde::{Deserialize, Serialize};

/// Body of `POST searcher`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Indexes to search; all must hold the same document type.
    pub index_ids_to_search_into: Vec<String>,
    /// What to look for.
    pub query: SearchQuery,
    /// Paging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_settings: Option<PaginationSettings>,
}

impl SearchRequest {
    /// Full-text search over `indexes`.
    #[must_use]
    pub fn new<I, S>(indexes: I, expression: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index_ids_to_search_into: indexes.into_iter().map(Into::into).collect(),
            query: SearchQuery {
                search_expression: Some(expression.into()),
                document_ids: Vec::new(),
                user_defined_tags: Vec::new(),
            },
            pagination_settings: None,
        }
    }

    /// Fetch `take` results after skipping `skip`.
    #[must_use]
    pub const fn page(mut self, skip: u32, take: u32) -> Self {
        self.pagination_settings = Some(PaginationSettings { skip, take });
        self
    }
}

/// Search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Boolean full-text expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_expression: Option<String>,
    /// Restrict to these documents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub document_ids: Vec<String>,
    /// Restrict to documents carrying these tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

/// Result paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSettings {
    /// Results to skip.
    pub skip: u32,
    /// Results to return.
    pub take: u32,
}

/// Body of `POST matcher/indexes/{indexId}/documents/{documentId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    /// Indexes holding the candidates to rank.
    pub index_ids_to_search_into: Vec<String>,
    /// Maximum number of matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

impl MatchRequest {
    /// Rank documents of `indexes` against the source document.
    #[must_use]
    pub fn new<I, S>(indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index_ids_to_search_into: indexes.into_iter().map(Into::into).collect(),
            take: None,
        }
    }

    /// Limit the number of matches.
    #[must_use]
    pub const fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }
}

/// One ranked document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMatch {
    /// Document id.
    pub id: String,
    /// Index holding the document.
    pub index_id: String,
    /// Overall score, 0-100.
    pub weighted_score: Option<f64>,
}

/// `value` of a search or match call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchesValue {
    /// Number of documents satisfying the criteria.
    pub total_count: u64,
    /// Number of documents returned.
    pub current_count: u64,
    /// Ranked documents.
    pub matches: Vec<DocumentMatch>,
}
