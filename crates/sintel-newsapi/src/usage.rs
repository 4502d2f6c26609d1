//! Local best-effort tracking of daily API call counts.
//!
//! NewsAPI meters calls per day; this module keeps a small ledger of
//! date → count so the caller can estimate quota usage without another
//! API round-trip. Storage is an injected [`UsageStore`] so tests run
//! against an in-memory store instead of the real file.
//!
//! The ledger is read-modify-write with no locking: two concurrent
//! `record_call`s may race and lose an increment. The pipeline is
//! single-process and sequential, so this is an accepted limitation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use thiserror::Error;

/// Calendar date → number of API calls made that day.
pub type UsageLedger = BTreeMap<NaiveDate, u64>;

/// Days of history retained in the ledger. Entries older than
/// `today - RETENTION_DAYS` are dropped on every write.
const RETENTION_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum UsageStoreError {
    #[error("failed to write usage ledger {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize usage ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage backend for the usage ledger.
///
/// `load` never fails: a missing, unreadable, or corrupt store reads as an
/// empty ledger. Losing the local call estimate is never worth aborting a
/// fetch over.
pub trait UsageStore {
    fn load(&self) -> UsageLedger;

    /// # Errors
    ///
    /// Returns [`UsageStoreError`] if the ledger cannot be persisted.
    fn save(&self, ledger: &UsageLedger) -> Result<(), UsageStoreError>;
}

/// Production store: a JSON object at a fixed path mapping ISO date
/// strings to integer counts.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// The ledger lives at `<data_dir>/.api_usage.json`.
    #[must_use]
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(".api_usage.json"),
        }
    }

    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UsageStore for JsonFileStore {
    fn load(&self) -> UsageLedger {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return UsageLedger::new();
        };
        match serde_json::from_str(&content) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "unreadable usage ledger, treating as empty");
                UsageLedger::new()
            }
        }
    }

    fn save(&self, ledger: &UsageLedger) -> Result<(), UsageStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| UsageStoreError::Io {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(ledger)?;
        std::fs::write(&self.path, content).map_err(|e| UsageStoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    ledger: RefCell<UsageLedger>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ledger(ledger: UsageLedger) -> Self {
        Self {
            ledger: RefCell::new(ledger),
        }
    }
}

impl UsageStore for MemoryStore {
    fn load(&self) -> UsageLedger {
        self.ledger.borrow().clone()
    }

    fn save(&self, ledger: &UsageLedger) -> Result<(), UsageStoreError> {
        *self.ledger.borrow_mut() = ledger.clone();
        Ok(())
    }
}

/// Records API calls against the daily ledger and answers quota queries.
///
/// Every operation is load-modify-store against the backing [`UsageStore`];
/// nothing is cached in memory across invocations.
pub struct UsageTracker<S> {
    store: S,
}

impl<S: UsageStore> UsageTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records one API call against today's bucket and prunes entries
    /// older than the retention window.
    ///
    /// # Errors
    ///
    /// Returns [`UsageStoreError`] if the updated ledger cannot be saved.
    /// Callers treat this as best-effort and log rather than abort.
    pub fn record_call(&self) -> Result<u64, UsageStoreError> {
        self.record_call_on(Local::now().date_naive())
    }

    /// Returns the number of API calls recorded for today, or 0 if the
    /// store is absent or unreadable.
    #[must_use]
    pub fn calls_today(&self) -> u64 {
        self.calls_on(Local::now().date_naive())
    }

    /// Returns the full retained ledger.
    #[must_use]
    pub fn ledger(&self) -> UsageLedger {
        self.store.load()
    }

    fn record_call_on(&self, today: NaiveDate) -> Result<u64, UsageStoreError> {
        let mut ledger = self.store.load();
        let count = ledger.entry(today).or_insert(0);
        *count += 1;
        let count = *count;

        let cutoff = today - Duration::days(RETENTION_DAYS);
        ledger.retain(|date, _| *date >= cutoff);

        self.store.save(&ledger)?;
        Ok(count)
    }

    fn calls_on(&self, date: NaiveDate) -> u64 {
        self.store.load().get(&date).copied().unwrap_or(0)
    }
}
