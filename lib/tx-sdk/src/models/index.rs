//! Indexes and indexed documents.

use serde::{Deserialize, Serialize};
use tx_core::{OperationResult, SubOperation, SubResults};

use crate::models::{GeocodeOptions, ParsedJob, ParsedResume};

/// Kind of documents an index holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexType {
    /// Parsed resumes.
    Resume,
    /// Parsed job orders.
    Job,
}

/// Body of `POST index/{indexId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    /// Kind of the new index.
    pub index_type: IndexType,
}

/// An index owned by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    /// Index id.
    pub name: String,
    /// Kind of documents held.
    pub index_type: IndexType,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Body of `POST index/{indexId}/documents/{documentId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocumentRequest {
    /// The resume to store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<ParsedResume>,
    /// The job to store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_data: Option<ParsedJob>,
    /// Tags usable as search filters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

impl IndexDocumentRequest {
    /// Store a parsed resume.
    #[must_use]
    pub fn resume(resume: ParsedResume) -> Self {
        Self {
            resume_data: Some(resume),
            ..Self::default()
        }
    }

    /// Store a parsed job.
    #[must_use]
    pub fn job(job: ParsedJob) -> Self {
        Self {
            job_data: Some(job),
            ..Self::default()
        }
    }

    /// Add a user-defined tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.user_defined_tags.push(tag.into());
        self
    }
}

/// Body of `POST index/{indexId}/documents/{documentId}/geocodeAndIndex`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeAndIndexRequest {
    /// The document to geocode and store.
    #[serde(flatten)]
    pub document: IndexDocumentRequest,
    /// Geocoding options.
    pub geocode_options: GeocodeOptions,
}

/// `value` of a geocode-and-index call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct GeocodeAndIndexValue {
    pub geocode_response: Option<OperationResult>,
    pub indexing_response: Option<OperationResult>,
}

impl SubResults for GeocodeAndIndexValue {
    fn sub_result(&self, operation: SubOperation) -> Option<&OperationResult> {
        match operation {
            SubOperation::Geocode => self.geocode_response.as_ref(),
            SubOperation::Indexing => self.indexing_response.as_ref(),
            SubOperation::Primary | SubOperation::ProfessionNormalization => None,
        }
    }
}
