//! Resume and job parsing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tx_core::{OperationResult, ResponseEnvelope, SubOperation, SubResults};

/// Body of `parser/resume` and `parser/joborder`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    /// The document file, base64-encoded.
    pub document_as_base64_string: String,
    /// Date the document was last modified (`YYYY-MM-DD`), used to date
    /// "current" positions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_last_modified: Option<String>,
    /// Geocode the document's addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geocode_options: Option<GeocodeOptions>,
    /// Add the parsed document to an index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_options: Option<IndexOptions>,
    /// Normalize job titles against the profession taxonomy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professions_settings: Option<ProfessionsSettings>,
}

impl ParseRequest {
    /// A request for the raw bytes of a document file.
    #[must_use]
    pub fn new(document: &[u8]) -> Self {
        Self {
            document_as_base64_string: STANDARD.encode(document),
            ..Self::default()
        }
    }

    /// Set the last-modified date (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_last_modified(mut self, date: impl Into<String>) -> Self {
        self.document_last_modified = Some(date.into());
        self
    }

    /// Geocode the document's addresses.
    #[must_use]
    pub fn with_geocoding(mut self, options: GeocodeOptions) -> Self {
        self.geocode_options = Some(options);
        self
    }

    /// Store the parsed document in `index_id` under `document_id`.
    #[must_use]
    pub fn with_indexing(
        mut self,
        index_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        self.index_options = Some(IndexOptions {
            index_id: index_id.into(),
            document_id: document_id.into(),
            user_defined_tags: Vec::new(),
        });
        self
    }

    /// Normalize job titles.
    #[must_use]
    pub fn with_profession_normalization(mut self) -> Self {
        self.professions_settings = Some(ProfessionsSettings { normalize: true });
        self
    }
}

/// Geocoding provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeocodeProvider {
    /// The platform's default provider.
    #[default]
    Google,
    /// Bing Maps.
    Bing,
}

/// Geocoding options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeOptions {
    /// Whether to geocode.
    pub include_geocoding: bool,
    /// Provider to use.
    pub provider: GeocodeProvider,
    /// Your own provider key; the platform's key is used if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_key: Option<String>,
}

impl GeocodeOptions {
    /// Geocode with the default provider.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            include_geocoding: true,
            ..Self::default()
        }
    }
}

/// Where to store a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOptions {
    /// Target index.
    pub index_id: String,
    /// Id of the document within the index.
    pub document_id: String,
    /// Tags usable as search filters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_defined_tags: Vec<String>,
}

/// Profession normalization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionsSettings {
    /// Whether to normalize.
    pub normalize: bool,
}

/// How the submitted file was converted to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ConversionMetadata {
    pub detected_type: Option<String>,
    pub suggested_file_extension: Option<String>,
    pub output_validity_code: Option<String>,
    pub elapsed_milliseconds: Option<u64>,
    pub document_hash: Option<String>,
}

// ============================================================================
// Parsed Documents
// ============================================================================

/// A parsed resume.
///
/// The fields most callers need are typed; everything else the server
/// returns is kept in [`other`](Self::other).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    /// Candidate name and contact channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
    /// Free-text summary written by the candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    /// Remaining sections (employment history, education, skills, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Candidate contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInformation {
    /// Candidate name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<CandidateName>,
    /// Email addresses, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<String>,
}

/// Candidate name parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct CandidateName {
    pub formatted_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// A parsed job order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJob {
    /// Titles of the advertised position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_titles: Option<JobTitles>,
    /// Remaining sections (employer, skills, degrees, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Job titles found in a job order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobTitles {
    /// The principal title.
    pub main_job_title: Option<String>,
    /// Every title found.
    pub job_title: Vec<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// `value` of a resume parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ParseResumeValue {
    pub resume_data: Option<ParsedResume>,
    pub conversion_metadata: Option<ConversionMetadata>,
    pub parsing_response: Option<OperationResult>,
    pub geocode_response: Option<OperationResult>,
    pub indexing_response: Option<OperationResult>,
    pub profession_normalization_response: Option<OperationResult>,
}

/// `value` of a job parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ParseJobValue {
    pub job_data: Option<ParsedJob>,
    pub conversion_metadata: Option<ConversionMetadata>,
    pub parsing_response: Option<OperationResult>,
    pub geocode_response: Option<OperationResult>,
    pub indexing_response: Option<OperationResult>,
    pub profession_normalization_response: Option<OperationResult>,
}

macro_rules! parse_sub_results {
    ($ty:ty) => {
        impl SubResults for $ty {
            fn sub_result(&self, operation: SubOperation) -> Option<&OperationResult> {
                match operation {
                    SubOperation::Primary => self.parsing_response.as_ref(),
                    SubOperation::Geocode => self.geocode_response.as_ref(),
                    SubOperation::Indexing => self.indexing_response.as_ref(),
                    SubOperation::ProfessionNormalization => {
                        self.profession_normalization_response.as_ref()
                    }
                }
            }
        }
    };
}

parse_sub_results!(ParseResumeValue);
parse_sub_results!(ParseJobValue);

/// Response of `parser/resume`.
pub type ParseResumeResponse = ResponseEnvelope<ParseResumeValue>;

/// Response of `parser/joborder`.
pub type ParseJobResponse = ResponseEnvelope<ParseJobValue>;

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_request_serializes_options() {
        let request = ParseRequest::new(b"hello")
            .with_last_modified("2024-05-01")
            .with_geocoding(GeocodeOptions::enabled())
            .with_indexing("resumes", "r-1")
            .with_profession_normalization();

        let json = serde_json::to_value(&request).expect("serialize");
        check!(
            json == json!({
                "documentAsBase64String": "aGVsbG8=",
                "documentLastModified": "2024-05-01",
                "geocodeOptions": { "includeGeocoding": true, "provider": "Google" },
                "indexOptions": { "indexId": "resumes", "documentId": "r-1" },
                "professionsSettings": { "normalize": true }
            })
        );
    }

    #[test]
    fn minimal_parse_request() {
        let json = serde_json::to_value(ParseRequest::new(b"")).expect("serialize");
        check!(json == json!({ "documentAsBase64String": "" }));
    }

    #[test]
    fn parsed_resume_keeps_unmodelled_sections() {
        let value: ParseResumeValue = serde_json::from_value(json!({
            "resumeData": {
                "contactInformation": {
                    "candidateName": { "formattedName": "Jane Doe", "givenName": "Jane" },
                    "emailAddresses": ["jane@example.com"]
                },
                "employmentHistory": { "positions": [{ "employer": "Acme" }] }
            },
            "parsingResponse": { "isSuccess": true, "code": "Success" }
        }))
        .expect("deserialize");

        let_assert!(Some(resume) = &value.resume_data);
        let_assert!(Some(contact) = &resume.contact_information);
        check!(contact.email_addresses == vec!["jane@example.com".to_string()]);
        check!(resume.other.contains_key("employmentHistory"));

        check!(value.sub_result(SubOperation::Primary).is_some_and(|r| r.is_success));
        check!(value.sub_result(SubOperation::Geocode).is_none());
    }

    #[test]
    fn job_value_exposes_sub_results() {
        let value: ParseJobValue = serde_json::from_value(json!({
            "jobData": { "jobTitles": { "mainJobTitle": "Welder", "jobTitle": ["Welder"] } },
            "indexingResponse": { "isSuccess": false, "code": "DuplicateDocument" }
        }))
        .expect("deserialize");

        check!(
            value.sub_result(SubOperation::Indexing).map(|r| r.code.as_str())
                == Some("DuplicateDocument")
        );
        let_assert!(Some(job) = value.job_data);
        check!(job.job_titles.and_then(|t| t.main_job_title).as_deref() == Some("Welder"));
    }
}
