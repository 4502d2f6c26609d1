//! URL-keyed article deduplication.

use std::collections::HashSet;

use crate::types::Article;

/// Removes duplicate articles, keyed by URL, preserving first-seen order.
///
/// Single left-to-right pass: the first occurrence of each URL is kept and
/// every later occurrence is dropped regardless of content differences.
/// Articles with a missing or empty URL cannot be deduplicated safely and
/// are always dropped. Output order is input order restricted to kept
/// elements; the pass is idempotent.
#[must_use]
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_urls = HashSet::new();
    articles
        .into_iter()
        .filter(|article| match article.url.as_deref() {
            Some(url) if !url.is_empty() => seen_urls.insert(url.to_owned()),
            _ => false,
        })
        .collect()
}
