pub mod client;
pub mod dedupe;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod types;
pub mod usage;

pub use client::{EverythingRequest, NewsApiClient};
pub use dedupe::dedupe;
pub use error::NewsApiError;
pub use fetch::{fetch_news_by_query, fetch_sales_triggers, TriggerBatch, TriggerFailure};
pub use persist::{save_news, DocumentMetadata, PersistError, ResultDocument};
pub use types::{Article, ArticleSource, FetchParams, NewsResponse, SortBy};
pub use usage::{JsonFileStore, MemoryStore, UsageLedger, UsageStore, UsageTracker};
