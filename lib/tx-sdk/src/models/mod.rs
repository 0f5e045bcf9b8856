//! Request and response models.
//!
//! JSON field names are camelCase. Types whose `value` carries sub-operation
//! outcomes implement [`SubResults`](tx_core::SubResults).

mod account;
mod index;
mod parse;
mod search;
mod ui;

pub use account::AccountInfo;
pub use index::{
    CreateIndexRequest, GeocodeAndIndexRequest, GeocodeAndIndexValue, IndexDocumentRequest,
    IndexInfo, IndexType,
};
pub use parse::{
    CandidateName, ContactInformation, ConversionMetadata, GeocodeOptions, GeocodeProvider,
    IndexOptions, JobTitles, ParseJobResponse, ParseJobValue, ParseRequest, ParseResumeResponse,
    ParseResumeValue, ParsedJob, ParsedResume, ProfessionsSettings,
};
pub use search::{
    DocumentMatch, MatchRequest, MatchesValue, PaginationSettings, SearchQuery, SearchRequest,
};
pub use ui::{GenerateUiResponse, UiOptions, UiSessionRequest};
