//! Command handlers for the CLI.
//!
//! These are called from `main` after config is loaded. Per-trigger
//! failures inside a batch are logged and skipped rather than propagated,
//! so a single bad query does not abort the run or the exit code.

use sintel_core::triggers::TriggerCatalog;
use sintel_core::AppConfig;
use sintel_newsapi::{
    fetch_sales_triggers, save_news, Article, FetchParams, JsonFileStore, NewsApiClient,
    UsageTracker,
};

use crate::{HeadlinesArgs, TriggersArgs};

/// Resolve the trigger catalog for a run.
///
/// An explicit `--triggers-path` must load or the run fails. Otherwise the
/// configured path is used when the file exists, and the built-in catalog
/// when it does not.
fn load_catalog(config: &AppConfig, args: &TriggersArgs) -> anyhow::Result<TriggerCatalog> {
    if let Some(path) = &args.triggers_path {
        return Ok(sintel_core::load_triggers(path)?);
    }
    if config.triggers_path.exists() {
        return Ok(sintel_core::load_triggers(&config.triggers_path)?);
    }
    tracing::info!(
        path = %config.triggers_path.display(),
        "no triggers file found, using built-in catalog"
    );
    Ok(TriggerCatalog::default_catalog())
}

pub(crate) async fn run_triggers(config: &AppConfig, args: &TriggersArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(config, args)?;
    let client = NewsApiClient::new(&config.news_api_key, config.request_timeout_secs)?;
    let tracker = UsageTracker::new(JsonFileStore::in_data_dir(&config.data_dir));

    let region = if args.region.trim().is_empty() {
        None
    } else {
        Some(args.region.clone())
    };
    let params = FetchParams {
        days_back: args.days_back,
        sort_by: args.sort_by,
        region,
    };

    println!(
        "Fetching sales trigger news ({} triggers, {} day lookback{})...",
        catalog.len(),
        params.days_back,
        params
            .region
            .as_deref()
            .map(|r| format!(", region: {r}"))
            .unwrap_or_default()
    );

    let batch = fetch_sales_triggers(&client, &tracker, Some(&catalog), &params).await;

    for failure in &batch.failures {
        tracing::warn!(
            trigger = %failure.label,
            error = %failure.error,
            "trigger query failed"
        );
    }

    println!("Total unique articles: {}", batch.total_results());
    if !batch.failures.is_empty() {
        println!(
            "Failed queries: {} of {}",
            batch.failures.len(),
            catalog.len()
        );
    }

    if batch.is_total_failure() {
        println!("Every query failed; nothing to save.");
        return Ok(());
    }

    let path = save_news(&config.data_dir, &args.output, &batch, &params)?;
    println!("News data saved to {}", path.display());

    print_sample(&batch.articles);
    Ok(())
}

pub(crate) async fn run_headlines(config: &AppConfig, args: &HeadlinesArgs) -> anyhow::Result<()> {
    let client = NewsApiClient::new(&config.news_api_key, config.request_timeout_secs)?;
    let tracker = UsageTracker::new(JsonFileStore::in_data_dir(&config.data_dir));

    let result = client
        .top_headlines(
            &args.country,
            args.category.as_deref(),
            args.sources.as_deref(),
        )
        .await;
    if let Err(e) = tracker.record_call() {
        tracing::warn!(error = %e, "failed to persist usage ledger");
    }
    let response = result?;

    println!(
        "Top headlines for '{}': {} articles",
        args.country,
        response.articles.len()
    );
    print_sample(&response.articles);
    Ok(())
}

pub(crate) fn run_usage(config: &AppConfig) -> anyhow::Result<()> {
    let tracker = UsageTracker::new(JsonFileStore::in_data_dir(&config.data_dir));

    println!("API calls today: {}", tracker.calls_today());
    let ledger = tracker.ledger();
    if !ledger.is_empty() {
        println!("Last {} days:", ledger.len());
        for (date, count) in &ledger {
            println!("  {date}: {count}");
        }
    }
    Ok(())
}

/// Print up to the first 3 articles as a human-readable sample.
fn print_sample(articles: &[Article]) {
    for (i, article) in articles.iter().take(3).enumerate() {
        println!("\n{}. {}", i + 1, article.title.as_deref().unwrap_or("(untitled)"));
        if let Some(name) = article.source.name.as_deref() {
            println!("   Source: {name}");
        }
        if let Some(published) = article.published_at.as_deref() {
            println!("   Published: {published}");
        }
        if let Some(trigger) = article.trigger_type.as_deref() {
            println!("   Trigger Type: {trigger}");
        }
        if let Some(url) = article.url.as_deref() {
            println!("   URL: {url}");
        }
    }
}
