//! The endpoint-level client.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tx_core::{HttpClient, ResponseEnvelope, ResponseProcessor, SubResults};
use url::Url;

use crate::{
    ClientConfig, Endpoints, HyperClient, Method, RawResponse, Request, Result, TxSettings,
    middleware::AccountAuthLayer,
    models::{
        AccountInfo, CreateIndexRequest, GenerateUiResponse, GeocodeAndIndexRequest,
        GeocodeAndIndexValue, IndexDocumentRequest, IndexInfo, IndexType, MatchRequest,
        MatchesValue, ParseJobResponse, ParseRequest, ParseResumeResponse, SearchRequest,
        UiSessionRequest,
    },
};

/// Envelope of calls whose `value` carries nothing of interest.
pub type AckResponse = ResponseEnvelope<Value>;

/// Client for the Tx API.
///
/// Every call returns exactly one outcome: the decoded envelope, or the
/// single [`Error`](crate::Error) the response maps to. Nothing is retried.
///
/// The client is cheap to clone and safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use tx_sdk::{TxClient, TxSettings, models::ParseRequest};
///
/// let client = TxClient::new(TxSettings::new("12345678", "service-key"))?;
/// let document = std::fs::read("resume.pdf")?;
///
/// let response = client.parse_resume(&ParseRequest::new(&document)).await?;
/// println!("transaction {:?}", response.transaction_id());
/// ```
#[derive(Debug)]
pub struct TxClient<C = HyperClient> {
    http: Arc<C>,
    endpoints: Endpoints,
    processor: ResponseProcessor,
}

impl<C> Clone for TxClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            endpoints: self.endpoints.clone(),
            processor: self.processor,
        }
    }
}

impl TxClient<HyperClient> {
    /// Create a client with the default transport configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data center URL is invalid.
    pub fn new(settings: TxSettings) -> Result<Self> {
        Self::with_config(settings, &ClientConfig::default())
    }

    /// Create a client with a custom transport configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data center URL is invalid.
    pub fn with_config(settings: TxSettings, config: &ClientConfig) -> Result<Self> {
        let auth = AccountAuthLayer::new(&settings.account_id, &settings.service_key)
            .with_tracking_tags(settings.tracking_tags.iter().cloned());
        let http = HyperClient::builder().config(config).layer(auth).build();
        Self::with_http_client(http, &settings)
    }

    /// Create a client from the `TX_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(TxSettings::from_env()?)
    }
}

impl<C: HttpClient> TxClient<C> {
    /// Create a client over any transport.
    ///
    /// The transport is responsible for the credential headers; only the
    /// data center and the error options of `settings` are used here.
    ///
    /// # Errors
    ///
    /// Returns an error if the data center URL is invalid.
    pub fn with_http_client(http: C, settings: &TxSettings) -> Result<Self> {
        Ok(Self {
            http: Arc::new(http),
            endpoints: Endpoints::new(settings.data_center.base_url()?),
            processor: ResponseProcessor::new(settings.show_full_request_body_in_errors),
        })
    }

    /// The endpoint catalog.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The transport.
    #[must_use]
    pub fn http_client(&self) -> &C {
        &self.http
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parse a resume.
    ///
    /// # Errors
    ///
    /// Besides the usual HTTP errors, a failed geocoding, indexing or
    /// profession normalization step is reported as the matching error
    /// variant; the parsed resume stays available through
    /// [`Error::partial_value`](crate::Error::partial_value).
    pub async fn parse_resume(&self, request: &ParseRequest) -> Result<ParseResumeResponse> {
        self.call_with_sub_results(Method::Post, self.endpoints.parse_resume()?, Some(request))
            .await
    }

    /// Parse a job order.
    ///
    /// # Errors
    ///
    /// As for [`parse_resume`](Self::parse_resume).
    pub async fn parse_job(&self, request: &ParseRequest) -> Result<ParseJobResponse> {
        self.call_with_sub_results(Method::Post, self.endpoints.parse_job()?, Some(request))
            .await
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Credits and limits of the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn account(&self) -> Result<ResponseEnvelope<AccountInfo>> {
        self.call(Method::Get, self.endpoints.account()?, None::<&()>)
            .await
    }

    // ------------------------------------------------------------------
    // Indexes
    // ------------------------------------------------------------------

    /// Create an index.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, for instance when the index exists.
    pub async fn create_index(&self, index_id: &str, index_type: IndexType) -> Result<AckResponse> {
        let body = CreateIndexRequest { index_type };
        self.call(Method::Post, self.endpoints.index(index_id)?, Some(&body))
            .await
    }

    /// Delete an index and all of its documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_index(&self, index_id: &str) -> Result<AckResponse> {
        self.call(Method::Delete, self.endpoints.index(index_id)?, None::<&()>)
            .await
    }

    /// All indexes of the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn indexes(&self) -> Result<ResponseEnvelope<Vec<IndexInfo>>> {
        self.call(Method::Get, self.endpoints.indexes()?, None::<&()>)
            .await
    }

    /// Store a parsed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn index_document(
        &self,
        index_id: &str,
        document_id: &str,
        request: &IndexDocumentRequest,
    ) -> Result<AckResponse> {
        let url = self.endpoints.document(index_id, document_id)?;
        self.call(Method::Post, url, Some(request)).await
    }

    /// Fetch a stored document, as a [`ParsedResume`](crate::models::ParsedResume)
    /// or [`ParsedJob`](crate::models::ParsedJob) depending on the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; a missing document is reported
    /// with the server's `DataNotFound` code.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        index_id: &str,
        document_id: &str,
    ) -> Result<ResponseEnvelope<T>> {
        let url = self.endpoints.document(index_id, document_id)?;
        self.call(Method::Get, url, None::<&()>).await
    }

    /// Delete a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_document(&self, index_id: &str, document_id: &str) -> Result<AckResponse> {
        let url = self.endpoints.document(index_id, document_id)?;
        self.call(Method::Delete, url, None::<&()>).await
    }

    /// Geocode a parsed document and store it.
    ///
    /// # Errors
    ///
    /// A failed geocoding or indexing step is reported as the matching
    /// error variant.
    pub async fn geocode_and_index(
        &self,
        index_id: &str,
        document_id: &str,
        request: &GeocodeAndIndexRequest,
    ) -> Result<ResponseEnvelope<GeocodeAndIndexValue>> {
        let url = self.endpoints.geocode_and_index(index_id, document_id)?;
        self.call_with_sub_results(Method::Post, url, Some(request))
            .await
    }

    // ------------------------------------------------------------------
    // Search and match
    // ------------------------------------------------------------------

    /// Full-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn search(&self, request: &SearchRequest) -> Result<ResponseEnvelope<MatchesValue>> {
        self.call(Method::Post, self.endpoints.search()?, Some(request))
            .await
    }

    /// Rank indexed documents against a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn match_document(
        &self,
        index_id: &str,
        document_id: &str,
        request: &MatchRequest,
    ) -> Result<ResponseEnvelope<MatchesValue>> {
        let url = self.endpoints.match_document(index_id, document_id)?;
        self.call(Method::Post, url, Some(request)).await
    }

    // ------------------------------------------------------------------
    // UI sessions
    // ------------------------------------------------------------------

    /// Open a hosted matching session for a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the server's text and a generated
    /// transaction id if the call fails.
    pub async fn match_document_ui(
        &self,
        index_id: &str,
        document_id: &str,
        request: &UiSessionRequest<MatchRequest>,
    ) -> Result<GenerateUiResponse> {
        let url = self.endpoints.match_document_ui(index_id, document_id)?;
        self.call_ui(url, request).await
    }

    /// Open a hosted search session.
    ///
    /// # Errors
    ///
    /// As for [`match_document_ui`](Self::match_document_ui).
    pub async fn search_ui(
        &self,
        request: &UiSessionRequest<SearchRequest>,
    ) -> Result<GenerateUiResponse> {
        self.call_ui(self.endpoints.search_ui()?, request).await
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Execute a request. Returns the response and, when errors carry it,
    /// the request body as text.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(RawResponse, Option<String>)> {
        let mut builder = Request::<Bytes>::builder(method, url).accept_json();
        if let Some(body) = body {
            builder = builder.json(body)?;
        }
        let request = builder.build();

        let request_body = if self.processor.includes_request_body() {
            request.body_text()
        } else {
            None
        };

        let response = self.http.execute(request).await?;
        Ok((response, request_body))
    }

    async fn call<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (response, request_body) = self.send(method, url, body).await?;
        self.processor.process(&response, request_body.as_deref())
    }

    async fn call_with_sub_results<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned + SubResults,
        B: Serialize + ?Sized,
    {
        let (response, request_body) = self.send(method, url, body).await?;
        self.processor
            .process_with_sub_results(&response, request_body.as_deref())
    }

    async fn call_ui<T, B>(&self, url: Url, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (response, request_body) = self.send(Method::Post, url, Some(body)).await?;
        self.processor.process_ui(&response, request_body.as_deref())
    }
}
