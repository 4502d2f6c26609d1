//! HTTP client for the NewsAPI REST API.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling, API key management,
//! and typed response deserialization. Every response is checked for the
//! `{"status": "error"}` envelope before deserialization and surfaced as
//! [`NewsApiError::Api`].

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::types::{NewsResponse, SortBy};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// Only English-language results; mirrors the catalog's query grammar.
const LANGUAGE: &str = "en";

/// Parameters for one `everything` search call.
#[derive(Debug, Clone)]
pub struct EverythingRequest<'a> {
    /// Boolean search expression in NewsAPI's query grammar. Not validated
    /// locally; a malformed query comes back as an API error.
    pub query: &'a str,
    /// Inclusive start of the date window, `YYYY-MM-DD` on the wire.
    pub from: NaiveDate,
    /// Inclusive end of the date window.
    pub to: NaiveDate,
    pub sort_by: SortBy,
    /// Comma-separated domains to exclude from results, if any.
    pub exclude_domains: Option<&'a str>,
}

/// Client for the NewsAPI REST API.
///
/// Manages the HTTP client, API key, and endpoint URLs. Use
/// [`NewsApiClient::new`] for production or [`NewsApiClient::with_base_url`]
/// to point at a mock server in tests. The API key travels in the
/// `X-Api-Key` header, never in the URL.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    everything_url: Url,
    top_headlines_url: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, NewsApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsApiError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sintel/0.1 (sales-trigger-intelligence)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // endpoint joins append a path segment rather than replacing the last
        // one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |e: &dyn std::fmt::Display| NewsApiError::Api {
            code: "invalid_base_url".to_string(),
            message: format!("invalid base URL '{base_url}': {e}"),
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(&e))?;
        let everything_url = base.join("everything").map_err(|e| invalid(&e))?;
        let top_headlines_url = base.join("top-headlines").map_err(|e| invalid(&e))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            everything_url,
            top_headlines_url,
        })
    }

    /// Searches all indexed articles via the `everything` endpoint.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::Api`] if NewsAPI returns an error envelope
    ///   (bad key, malformed query, quota exhausted).
    /// - [`NewsApiError::Http`] on network failure or a non-2xx status
    ///   without a parseable error envelope.
    /// - [`NewsApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn everything(
        &self,
        req: &EverythingRequest<'_>,
    ) -> Result<NewsResponse, NewsApiError> {
        let from = req.from.format("%Y-%m-%d").to_string();
        let to = req.to.format("%Y-%m-%d").to_string();
        let mut params = vec![
            ("q", req.query),
            ("from", &from),
            ("to", &to),
            ("sortBy", req.sort_by.as_str()),
            ("language", LANGUAGE),
        ];
        if let Some(domains) = req.exclude_domains {
            params.push(("excludeDomains", domains));
        }

        let url = Self::build_url(&self.everything_url, &params);
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
            context: format!("everything(q={})", req.query),
            source: e,
        })
    }

    /// Fetches current top headlines for a country, category, or source set.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`NewsApiClient::everything`].
    pub async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        sources: Option<&str>,
    ) -> Result<NewsResponse, NewsApiError> {
        let mut params = vec![("country", country)];
        if let Some(c) = category {
            params.push(("category", c));
        }
        if let Some(s) = sources {
            params.push(("sources", s));
        }

        let url = Self::build_url(&self.top_headlines_url, &params);
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
            context: format!("top_headlines(country={country})"),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters appended to a pre-validated endpoint URL.
    fn build_url(endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request with the API key header and parses the body as
    /// JSON, surfacing NewsAPI error envelopes as typed errors.
    ///
    /// NewsAPI pairs its error envelope with a 4xx/5xx status, so the
    /// envelope is checked first; the HTTP status error only surfaces when
    /// no envelope can be read from the body.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NewsApiError> {
        let response = self
            .client
            .get(url.clone())
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => {
                Self::check_api_error(&value)?;
                if let Some(e) = status_error {
                    return Err(e.into());
                }
                Ok(value)
            }
            Err(e) => {
                if let Some(se) = status_error {
                    Err(se.into())
                } else {
                    Err(NewsApiError::Deserialize {
                        context: url.to_string(),
                        source: e,
                    })
                }
            }
        }
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), NewsApiError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("error") {
            let field = |name: &str| {
                body.get(name)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
                    .to_string()
            };
            return Err(NewsApiError::Api {
                code: field("code"),
                message: field("message"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
