//! Integration tests for `NewsApiClient` using wiremock HTTP mocks.

use sintel_newsapi::client::{EverythingRequest, NewsApiClient};
use sintel_newsapi::error::NewsApiError;
use sintel_newsapi::types::SortBy;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NewsApiClient {
    NewsApiClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().expect("test date should parse")
}

#[tokio::test]
async fn everything_returns_parsed_articles() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": null, "name": "Straits Times" },
                "author": "Jane Tan",
                "title": "Acme opens Singapore office",
                "url": "https://example.com/acme-sg",
                "publishedAt": "2026-08-20T08:00:00Z"
            },
            {
                "source": { "id": "reuters", "name": "Reuters" },
                "title": "Beta Corp files patent",
                "url": "https://example.com/beta-patent",
                "publishedAt": "2026-08-21T10:30:00Z"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(header("x-api-key", "test-key"))
        .and(query_param("q", "acme"))
        .and(query_param("from", "2026-08-19"))
        .and(query_param("to", "2026-08-26"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .everything(&EverythingRequest {
            query: "acme",
            from: date("2026-08-19"),
            to: date("2026-08-26"),
            sort_by: SortBy::PublishedAt,
            exclude_domains: None,
        })
        .await
        .expect("should parse response");

    assert_eq!(response.status, "ok");
    assert_eq!(response.total_results, 2);
    assert_eq!(response.articles.len(), 2);
    assert_eq!(
        response.articles[0].url.as_deref(),
        Some("https://example.com/acme-sg")
    );
    assert_eq!(
        response.articles[1].source.name.as_deref(),
        Some("Reuters")
    );
    assert!(response.articles[0].trigger_type.is_none());
}

#[tokio::test]
async fn everything_passes_exclude_domains() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param(
            "excludeDomains",
            "arxiv.org,ieee.org,springer.com",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok", "totalResults": 0, "articles": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .everything(&EverythingRequest {
            query: "widgets",
            from: date("2026-08-19"),
            to: date("2026-08-26"),
            sort_by: SortBy::Relevancy,
            exclude_domains: Some("arxiv.org,ieee.org,springer.com"),
        })
        .await
        .expect("should parse response");

    assert!(response.articles.is_empty());
}

#[tokio::test]
async fn error_envelope_is_surfaced_as_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "error",
        "code": "apiKeyInvalid",
        "message": "Your API key is invalid or incorrect."
    });

    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .everything(&EverythingRequest {
            query: "acme",
            from: date("2026-08-19"),
            to: date("2026-08-26"),
            sort_by: SortBy::PublishedAt,
            exclude_domains: None,
        })
        .await
        .unwrap_err();

    match err {
        NewsApiError::Api { code, message } => {
            assert_eq!(code, "apiKeyInvalid");
            assert!(message.contains("invalid"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_server_failure_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .everything(&EverythingRequest {
            query: "acme",
            from: date("2026-08-19"),
            to: date("2026-08-26"),
            sort_by: SortBy::PublishedAt,
            exclude_domains: None,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, NewsApiError::Http(_)),
        "expected Http error, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    // status "ok" but articles is not an array
    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 1,
        "articles": "not-a-list"
    });

    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .everything(&EverythingRequest {
            query: "acme",
            from: date("2026-08-19"),
            to: date("2026-08-26"),
            sort_by: SortBy::PublishedAt,
            exclude_domains: None,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, NewsApiError::Deserialize { .. }),
        "expected Deserialize error, got: {err:?}"
    );
}

#[tokio::test]
async fn top_headlines_returns_parsed_articles() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [
            {
                "source": { "id": "cna", "name": "CNA" },
                "title": "Morning briefing",
                "url": "https://example.com/briefing",
                "publishedAt": "2026-08-26T00:00:00Z"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("country", "sg"))
        .and(query_param("category", "business"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .top_headlines("sg", Some("business"), None)
        .await
        .expect("should parse response");

    assert_eq!(response.total_results, 1);
    assert_eq!(response.articles[0].source.id.as_deref(), Some("cna"));
}
