//! NewsAPI wire types and the query-parameter records built on top of them.
//!
//! NewsAPI wraps every success response in `{"status": "ok", ...}` and
//! every failure in `{"status": "error", "code": ..., "message": ...}`.
//! Field names on the wire are camelCase (`totalResults`, `publishedAt`).

use serde::{Deserialize, Serialize};

/// The `source` object embedded in every article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One article as returned by NewsAPI, plus the single field this system
/// adds: `trigger_type`, the label of the trigger query that produced it.
///
/// Fields not modelled here (and any the API adds later) round-trip through
/// `extra`, so persisted documents keep the full upstream record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Label of the trigger query that produced this article. Set once by
    /// the fetch pipeline; absent on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Success envelope for `everything` and `top-headlines`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    pub status: String,
    #[serde(default, rename = "totalResults")]
    pub total_results: i64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Sort order accepted by the `everything` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Popularity,
    PublishedAt,
    Relevancy,
}

impl SortBy {
    /// The wire value NewsAPI expects in the `sortBy` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
            SortBy::Relevancy => "relevancy",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortBy::Popularity),
            "publishedAt" => Ok(SortBy::PublishedAt),
            "relevancy" => Ok(SortBy::Relevancy),
            other => Err(format!(
                "unknown sort order '{other}' (expected popularity, publishedAt, or relevancy)"
            )),
        }
    }
}

/// The parameters a trigger batch was fetched with. Recorded verbatim into
/// the output document's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchParams {
    pub days_back: u32,
    pub sort_by: SortBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            days_back: 7,
            sort_by: SortBy::PublishedAt,
            region: None,
        }
    }
}
