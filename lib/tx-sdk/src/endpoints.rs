//! Endpoint catalog.
//!
//! All paths are relative to the data center base URL. Index and document
//! ids are percent-encoded as single path segments.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tx_core::{Error, Result};
use url::Url;

/// Characters escaped in a path segment: everything but RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Builds endpoint URLs against one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create a catalog for `base`, which must end with `/`.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// The base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(Error::InvalidUrl)
    }

    /// `POST parser/resume`
    pub fn parse_resume(&self) -> Result<Url> {
        self.url("parser/resume")
    }

    /// `POST parser/joborder`
    pub fn parse_job(&self) -> Result<Url> {
        self.url("parser/joborder")
    }

    /// `GET account`
    pub fn account(&self) -> Result<Url> {
        self.url("account")
    }

    /// `GET index`
    pub fn indexes(&self) -> Result<Url> {
        self.url("index")
    }

    /// `POST|DELETE index/{indexId}`
    pub fn index(&self, index_id: &str) -> Result<Url> {
        self.url(&format!("index/{}", segment("index id", index_id)?))
    }

    /// `POST|GET|DELETE index/{indexId}/documents/{documentId}`
    pub fn document(&self, index_id: &str, document_id: &str) -> Result<Url> {
        self.url(&document_path(index_id, document_id)?)
    }

    /// `POST index/{indexId}/documents/{documentId}/geocodeAndIndex`
    pub fn geocode_and_index(&self, index_id: &str, document_id: &str) -> Result<Url> {
        self.url(&format!(
            "{}/geocodeAndIndex",
            document_path(index_id, document_id)?
        ))
    }

    /// `POST searcher`
    pub fn search(&self) -> Result<Url> {
        self.url("searcher")
    }

    /// `POST matcher/indexes/{indexId}/documents/{documentId}`
    pub fn match_document(&self, index_id: &str, document_id: &str) -> Result<Url> {
        self.url(&format!("matcher/{}", match_path(index_id, document_id)?))
    }

    /// `POST ui/matcher/indexes/{indexId}/documents/{documentId}`
    pub fn match_document_ui(&self, index_id: &str, document_id: &str) -> Result<Url> {
        self.url(&format!("ui/matcher/{}", match_path(index_id, document_id)?))
    }

    /// `POST ui/searcher`
    pub fn search_ui(&self) -> Result<Url> {
        self.url("ui/searcher")
    }
}

fn segment(what: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!("{what} must not be empty")));
    }
    // Dot segments are resolved by `Url::join`, even percent-encoded.
    if matches!(value.trim(), "." | "..") {
        return Err(Error::invalid_request(format!(
            "{what} must not be '{}'",
            value.trim()
        )));
    }
    Ok(utf8_percent_encode(value, SEGMENT).to_string())
}

fn document_path(index_id: &str, document_id: &str) -> Result<String> {
    Ok(format!(
        "index/{}/documents/{}",
        segment("index id", index_id)?,
        segment("document id", document_id)?
    ))
}

fn match_path(index_id: &str, document_id: &str) -> Result<String> {
    Ok(format!(
        "indexes/{}/documents/{}",
        segment("index id", index_id)?,
        segment("document id", document_id)?
    ))
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("https://api.us.textkernel.com/tx/v10/").expect("url"))
    }

    #[test]
    fn fixed_paths() {
        let e = endpoints();
        check!(
            e.parse_resume().expect("url").as_str()
                == "https://api.us.textkernel.com/tx/v10/parser/resume"
        );
        check!(e.parse_job().expect("url").path() == "/tx/v10/parser/joborder");
        check!(e.account().expect("url").path() == "/tx/v10/account");
        check!(e.search_ui().expect("url").path() == "/tx/v10/ui/searcher");
    }

    #[test]
    fn ids_are_encoded_as_segments() {
        let e = endpoints();
        let url = e.document("my index", "doc/1?x").expect("url");
        check!(url.path() == "/tx/v10/index/my%20index/documents/doc%2F1%3Fx");
        check!(url.query().is_none());

        let url = e.match_document_ui("resumes", "r-1").expect("url");
        check!(url.path() == "/tx/v10/ui/matcher/indexes/resumes/documents/r-1");

        let url = e.geocode_and_index("jobs", "j_2").expect("url");
        check!(url.path() == "/tx/v10/index/jobs/documents/j_2/geocodeAndIndex");
    }

    #[test]
    fn empty_ids_are_rejected() {
        let e = endpoints();
        check!(e.index("").is_err());
        check!(e.document("resumes", "  ").is_err());
    }

    #[test]
    fn dot_ids_are_rejected() {
        let e = endpoints();
        check!(e.index("..").is_err());
        check!(e.index(" . ").is_err());
        check!(e.document("..", "..").is_err());
        check!(e.document("resumes", ".").is_err());
        check!(e.geocode_and_index("jobs", "..").is_err());
        check!(e.match_document("..", "..").is_err());
        check!(e.match_document_ui("resumes", ".").is_err());

        let url = e.document("resumes", "...").expect("url");
        check!(url.path() == "/tx/v10/index/resumes/documents/...");
        let url = e.document("v1.2", ".hidden").expect("url");
        check!(url.path() == "/tx/v10/index/v1.2/documents/.hidden");
    }
}
