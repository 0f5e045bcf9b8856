//! Integration tests for `TxClient` using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use serde_json::json;
use tx_sdk::{
    ClientConfig, DataCenter, Error, SubOperation, TxClient, TxSettings,
    models::{
        IndexType, MatchRequest, ParseRequest, ParseResumeValue, ParsedResume, SearchRequest,
        UiSessionRequest,
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, header_exists, headers, method, path},
};

fn settings(server: &MockServer) -> TxSettings {
    let base = url::Url::parse(&format!("{}/tx/v10/", server.uri())).expect("url");
    TxSettings::new("12345678", "service-key").with_data_center(DataCenter::Custom(base))
}

fn client(server: &MockServer) -> TxClient {
    TxClient::new(settings(server)).expect("client")
}

fn success_info(transaction_id: &str) -> serde_json::Value {
    json!({
        "code": "Success",
        "message": "Success",
        "transactionId": transaction_id,
        "isSuccess": true,
        "engineVersion": "10.4.0",
        "apiVersion": "10.4.0",
        "totalElapsedMilliseconds": 140
    })
}

#[tokio::test]
async fn test_credentials_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tx/v10/account"))
        .and(header("Tx-AccountId", "12345678"))
        .and(header("Tx-ServiceKey", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-account"),
            "value": { "creditsRemaining": 99.5, "creditsUsed": 0.5, "maxConcurrentRequests": 4 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).account().await.expect("account");

    check!(response.transaction_id() == Some("t-account"));
    let_assert!(Some(account) = response.value);
    check!(account.max_concurrent_requests == 4);
}

#[tokio::test]
async fn test_tracking_tags_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tx/v10/index"))
        .and(headers("Tx-TrackingTags", vec!["batch", "nightly"]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-indexes"),
            "value": [{ "name": "resumes", "indexType": "Resume" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings(&server)
        .with_tracking_tag("batch")
        .with_tracking_tag("nightly");
    let tx = TxClient::new(settings).expect("client");

    let indexes = tx.indexes().await.expect("indexes").value.expect("value");
    check!(indexes.len() == 1);
    check!(indexes.first().map(|i| i.index_type) == Some(IndexType::Resume));
}

#[tokio::test]
async fn test_parse_resume() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/parser/resume"))
        .and(body_json(json!({ "documentAsBase64String": "aGVsbG8=" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-parse"),
            "value": {
                "resumeData": {
                    "contactInformation": {
                        "candidateName": { "formattedName": "Ada Lovelace" },
                        "emailAddresses": ["ada@example.com"]
                    },
                    "skillsData": [{ "root": "Tx" }]
                },
                "parsingResponse": { "isSuccess": true, "code": "Success", "message": "ok" }
            }
        })))
        .mount(&server)
        .await;

    let response = client(&server)
        .parse_resume(&ParseRequest::new(b"hello"))
        .await
        .expect("parse");

    let_assert!(Some(value) = response.value);
    let_assert!(Some(resume) = value.resume_data);
    let name = resume
        .contact_information
        .and_then(|c| c.candidate_name)
        .and_then(|n| n.formatted_name);
    check!(name.as_deref() == Some("Ada Lovelace"));
    check!(resume.other.contains_key("skillsData"));
}

#[tokio::test]
async fn test_geocode_failure_keeps_parsed_resume() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/parser/resume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-geo"),
            "value": {
                "resumeData": { "professionalSummary": "Engineer" },
                "parsingResponse": { "isSuccess": true, "code": "Success" },
                "geocodeResponse": {
                    "isSuccess": false,
                    "code": "InsufficientData",
                    "message": "no address to geocode"
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .parse_resume(&ParseRequest::new(b"cv"))
        .await
        .expect_err("geocode failure");

    let_assert!(Error::Geocode(context) = &err);
    check!(context.transaction_id() == Some("t-geo"));
    check!(context.info().code == "InsufficientData");
    check!(context.info().message == "no address to geocode");

    let_assert!(Some(Ok(partial)) = err.partial_value::<ParseResumeValue>());
    check!(
        partial.resume_data.and_then(|r| r.professional_summary).as_deref() == Some("Engineer")
    );
}

#[tokio::test]
async fn test_first_failed_sub_operation_wins() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/parser/joborder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-job"),
            "value": {
                "parsingResponse": { "isSuccess": true, "code": "Success" },
                "indexingResponse": { "isSuccess": false, "code": "DataNotFound" },
                "professionNormalizationResponse": { "isSuccess": false, "code": "Error" }
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .parse_job(&ParseRequest::new(b"job"))
        .await
        .expect_err("indexing failure");

    check!(err.failed_sub_operation() == Some(SubOperation::Indexing));
}

#[tokio::test]
async fn test_too_large() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/parser/resume"))
        .respond_with(
            ResponseTemplate::new(413).set_body_string("<html>Request Entity Too Large</html>"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .parse_resume(&ParseRequest::new(&[0_u8; 64]))
        .await
        .expect_err("413");

    check!(err.is_too_large());
    check!(err.status() == Some(413));
    check!(err.info().map(|i| i.message.as_str()) == Some("Request body was too large."));
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tx/v10/account"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).account().await.expect_err("500");

    let_assert!(Error::Http(context) = err);
    check!(context.status() == 500);
    check!(context.info().code == "Error");
    check!(context.info().message == "500 - Internal Server Error");
    check!(context.transaction_id().is_none());
}

#[tokio::test]
async fn test_server_error_info_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tx/v10/index/resumes/documents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "info": {
                "code": "DataNotFound",
                "message": "Document not found",
                "transactionId": "t-404"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_document::<ParsedResume>("resumes", "missing")
        .await
        .expect_err("404");

    let_assert!(Error::Http(context) = err);
    check!(context.status() == 404);
    check!(context.info().code == "DataNotFound");
    check!(context.transaction_id() == Some("t-404"));
}

#[tokio::test]
async fn test_invalid_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/index/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_index("jobs", IndexType::Job)
        .await
        .expect_err("unparsable");

    check!(err.is_unparsable());
    check!(err.raw_response().and_then(|r| r.body()) == Some("{not json"));
}

#[tokio::test]
async fn test_request_body_in_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/searcher"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "info": { "code": "InvalidParameter", "message": "bad expression" }
        })))
        .mount(&server)
        .await;

    let request = SearchRequest::new(["resumes"], "rust AND (");

    let quiet = client(&server);
    let err = quiet.search(&request).await.expect_err("400");
    check!(err.request_body().is_none());

    let debug = TxClient::new(settings(&server).with_request_body_in_errors(true)).expect("client");
    let err = debug.search(&request).await.expect_err("400");
    let_assert!(Some(body) = err.request_body());
    check!(body.contains("rust AND ("));
}

#[tokio::test]
async fn test_ui_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/ui/matcher/indexes/resumes/documents/r-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://ui.example.com/s/1" })),
        )
        .mount(&server)
        .await;

    let session = client(&server)
        .match_document_ui("resumes", "r-1", &UiSessionRequest::new(MatchRequest::new(["jobs"])))
        .await
        .expect("session");

    check!(session.url == "https://ui.example.com/s/1");
}

#[tokio::test]
async fn test_ui_error_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/ui/searcher"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let err = client(&server)
        .search_ui(&UiSessionRequest::new(SearchRequest::new(["resumes"], "rust")))
        .await
        .expect_err("401");

    let_assert!(Error::Http(context) = err);
    check!(context.status() == 401);
    check!(context.info().code == "Error");
    check!(context.info().message == "Invalid credentials");
    let_assert!(Some(transaction_id) = context.transaction_id());
    check!(!transaction_id.is_empty());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tx/v10/account"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .timeout(Duration::from_millis(200))
        .build();
    let tx = TxClient::with_config(settings(&server), &config).expect("client");

    let err = tx.account().await.expect_err("timeout");

    check!(err.is_transport());
    check!(err.is_timeout());
    check!(err.raw_response().is_none());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let base = url::Url::parse("http://127.0.0.1:1/tx/v10/").expect("url");
    let settings = TxSettings::new("12345678", "key").with_data_center(DataCenter::Custom(base));
    let tx = TxClient::new(settings).expect("client");

    let err = tx.indexes().await.expect_err("refused");

    check!(err.is_transport());
    check!(!err.is_timeout());
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tx/v10/index/resumes"))
        .and(header("Content-Type", "application/json"))
        .and(header_exists("Accept"))
        .and(body_json(json!({ "indexType": "Resume" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": success_info("t-create")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server)
        .create_index("resumes", IndexType::Resume)
        .await
        .expect("created");

    check!(ack.info.code == "Success");
    check!(ack.value.is_none());
}
