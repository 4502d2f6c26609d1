//! The trigger-fetch pipeline: one `everything` call per catalog entry,
//! usage tracking per attempted call, and URL deduplication of the merged
//! result.
//!
//! Per-trigger failures are accumulated and skipped rather than propagated
//! so a single bad query does not abort the full batch. Callers inspect
//! [`TriggerBatch::failures`] to decide what, if anything, is fatal.

use chrono::{Duration, Local};
use sintel_core::triggers::TriggerCatalog;

use crate::client::{EverythingRequest, NewsApiClient};
use crate::dedupe::dedupe;
use crate::error::NewsApiError;
use crate::types::{Article, FetchParams, NewsResponse, SortBy};
use crate::usage::{UsageStore, UsageTracker};

/// Academic-journal domains excluded from keyword searches; their articles
/// are papers, not sales-relevant news.
pub const JOURNAL_EXCLUDE_DOMAINS: &str = "arxiv.org,ieee.org,springer.com";

/// One trigger query that failed during a batch, with the error that
/// stopped it.
#[derive(Debug)]
pub struct TriggerFailure {
    pub label: String,
    pub query: String,
    pub error: NewsApiError,
}

/// The outcome of a full trigger batch: deduplicated articles plus every
/// per-query failure encountered along the way.
#[derive(Debug, Default)]
pub struct TriggerBatch {
    /// Merged articles across all trigger queries, unique by URL,
    /// first-seen order.
    pub articles: Vec<Article>,
    pub failures: Vec<TriggerFailure>,
}

impl TriggerBatch {
    /// Number of unique articles collected.
    #[must_use]
    pub fn total_results(&self) -> usize {
        self.articles.len()
    }

    /// True when nothing was collected and every query failed.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.articles.is_empty() && !self.failures.is_empty()
    }
}

/// Fetches news articles for a single search query over an inclusive
/// `[today - days_back, today]` window, excluding academic-journal domains.
///
/// Records one usage event for every call that reached the network layer,
/// success or failure.
///
/// # Errors
///
/// Returns [`NewsApiError`] on network, API-envelope, or deserialization
/// failure. Whether that is fatal is the caller's decision; the batch
/// pipeline treats it as "zero articles from this query".
pub async fn fetch_news_by_query<S: UsageStore>(
    client: &NewsApiClient,
    tracker: &UsageTracker<S>,
    query: &str,
    days_back: u32,
    sort_by: SortBy,
) -> Result<NewsResponse, NewsApiError> {
    let to = Local::now().date_naive();
    let from = to - Duration::days(i64::from(days_back));

    let result = client
        .everything(&EverythingRequest {
            query,
            from,
            to,
            sort_by,
            exclude_domains: Some(JOURNAL_EXCLUDE_DOMAINS),
        })
        .await;
    record_usage(tracker);
    result
}

/// Runs every trigger query in catalog order and folds the responses into
/// a single deduplicated [`TriggerBatch`].
///
/// When `catalog` is `None` the built-in default catalog is used. When
/// `params.region` is set, every query is rewritten as
/// `(original) AND region` before execution. Each query gets one
/// `everything` call over the `params.days_back` window; successes have
/// their articles stamped with the trigger's label, failures are recorded
/// and skipped. Partial failure is non-fatal by design.
pub async fn fetch_sales_triggers<S: UsageStore>(
    client: &NewsApiClient,
    tracker: &UsageTracker<S>,
    catalog: Option<&TriggerCatalog>,
    params: &FetchParams,
) -> TriggerBatch {
    let catalog = match catalog {
        Some(c) => c.clone(),
        None => TriggerCatalog::default_catalog(),
    };
    let catalog = match params.region.as_deref() {
        Some(region) => catalog.with_region(region),
        None => catalog,
    };

    let to = Local::now().date_naive();
    let from = to - Duration::days(i64::from(params.days_back));

    let mut all_articles = Vec::new();
    let mut failures = Vec::new();

    for trigger in &catalog {
        let result = client
            .everything(&EverythingRequest {
                query: &trigger.query,
                from,
                to,
                sort_by: params.sort_by,
                exclude_domains: None,
            })
            .await;
        record_usage(tracker);

        match result {
            Ok(response) if response.status == "ok" => {
                tracing::info!(
                    trigger = %trigger.label,
                    count = response.articles.len(),
                    "trigger query returned articles"
                );
                all_articles.extend(response.articles.into_iter().map(|mut article| {
                    article.trigger_type = Some(trigger.label.clone());
                    article
                }));
            }
            Ok(response) => {
                tracing::warn!(
                    trigger = %trigger.label,
                    status = %response.status,
                    "unexpected response status, skipping trigger"
                );
            }
            Err(error) => {
                tracing::warn!(
                    trigger = %trigger.label,
                    error = %error,
                    "trigger query failed, continuing with remaining triggers"
                );
                failures.push(TriggerFailure {
                    label: trigger.label.clone(),
                    query: trigger.query.clone(),
                    error,
                });
            }
        }
    }

    TriggerBatch {
        articles: dedupe(all_articles),
        failures,
    }
}

/// Bumps today's ledger bucket; a store failure costs only the local
/// estimate, so it is logged and swallowed.
fn record_usage<S: UsageStore>(tracker: &UsageTracker<S>) {
    if let Err(e) = tracker.record_call() {
        tracing::warn!(error = %e, "failed to persist usage ledger");
    }
}
