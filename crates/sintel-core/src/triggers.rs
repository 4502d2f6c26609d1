//! The trigger catalog: named boolean search queries for sales-relevant
//! news events (patent filings, product launches, market expansions).
//!
//! The catalog is ordered — queries execute in definition order — and
//! labels are unique. It can be loaded from a user-editable YAML file or
//! fall back to the built-in defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A labeled boolean search expression. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerQuery {
    pub label: String,
    pub query: String,
}

/// Ordered collection of [`TriggerQuery`], unique by label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerCatalog {
    pub triggers: Vec<TriggerQuery>,
}

impl TriggerCatalog {
    /// The built-in trigger set used when no catalog file is provided.
    #[must_use]
    pub fn default_catalog() -> Self {
        let triggers = vec![
            TriggerQuery {
                label: "Patent & IP".to_string(),
                query: "(company OR startup OR firm OR corporation) AND (patent OR \"intellectual property\" OR \"IP portfolio\" OR trademark) AND (granted OR filed OR awarded OR secures)".to_string(),
            },
            TriggerQuery {
                label: "Product Launch".to_string(),
                query: "(company OR startup OR firm) AND (\"product launch\" OR \"launches\" OR \"unveils\" OR \"announces\" OR \"introduces\" OR \"new product\")".to_string(),
            },
            TriggerQuery {
                label: "Expansion".to_string(),
                query: "(company OR startup OR firm) AND (expansion OR \"opens office\" OR \"opening\" OR \"expands into\" OR \"enters market\" OR \"new location\")".to_string(),
            },
        ];
        Self { triggers }
    }

    /// Returns a catalog whose queries are scoped to a region: each query
    /// `Q` becomes `(Q) AND region`. Labels are unchanged.
    #[must_use]
    pub fn with_region(&self, region: &str) -> Self {
        let triggers = self
            .triggers
            .iter()
            .map(|t| TriggerQuery {
                label: t.label.clone(),
                query: format!("({}) AND {region}", t.query),
            })
            .collect();
        Self { triggers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggerQuery> {
        self.triggers.iter()
    }
}

impl<'a> IntoIterator for &'a TriggerCatalog {
    type Item = &'a TriggerQuery;
    type IntoIter = std::slice::Iter<'a, TriggerQuery>;

    fn into_iter(self) -> Self::IntoIter {
        self.triggers.iter()
    }
}

/// Load and validate the trigger catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_triggers(path: &Path) -> Result<TriggerCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TriggersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: TriggerCatalog = serde_yaml::from_str(&content)?;
    validate_triggers(&catalog)?;

    Ok(catalog)
}

fn validate_triggers(catalog: &TriggerCatalog) -> Result<(), ConfigError> {
    let mut seen_labels = HashSet::new();

    for trigger in &catalog.triggers {
        if trigger.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "trigger label must be non-empty".to_string(),
            ));
        }

        if trigger.query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "trigger '{}' has an empty query",
                trigger.label
            )));
        }

        if !seen_labels.insert(trigger.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate trigger label: '{}'",
                trigger.label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(entries: &[(&str, &str)]) -> TriggerCatalog {
        TriggerCatalog {
            triggers: entries
                .iter()
                .map(|(label, query)| TriggerQuery {
                    label: (*label).to_string(),
                    query: (*query).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn default_catalog_has_three_ordered_triggers() {
        let catalog = TriggerCatalog::default_catalog();
        let labels: Vec<&str> = catalog.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Patent & IP", "Product Launch", "Expansion"]);
    }

    #[test]
    fn with_region_wraps_each_query() {
        let catalog = catalog_of(&[("A", "foo OR bar")]);
        let scoped = catalog.with_region("Singapore");
        assert_eq!(scoped.triggers[0].query, "(foo OR bar) AND Singapore");
        assert_eq!(scoped.triggers[0].label, "A");
    }

    #[test]
    fn with_region_preserves_order() {
        let catalog = catalog_of(&[("A", "foo"), ("B", "bar"), ("C", "baz")]);
        let scoped = catalog.with_region("Asia");
        let labels: Vec<&str> = scoped.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn validation_rejects_duplicate_labels() {
        let catalog = catalog_of(&[("Patent & IP", "foo"), ("patent & ip", "bar")]);
        let err = validate_triggers(&catalog).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
            "expected duplicate-label error, got: {err:?}"
        );
    }

    #[test]
    fn validation_rejects_empty_query() {
        let catalog = catalog_of(&[("A", "   ")]);
        let err = validate_triggers(&catalog).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn validation_rejects_empty_label() {
        let catalog = catalog_of(&[("", "foo")]);
        let err = validate_triggers(&catalog).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r#"
triggers:
  - label: "Funding"
    query: '(company OR startup) AND ("funding round" OR "Series A")'
  - label: "Acquisition"
    query: '(company OR firm) AND (acquisition OR merger)'
"#;
        let catalog: TriggerCatalog = serde_yaml::from_str(yaml).expect("yaml should parse");
        validate_triggers(&catalog).expect("catalog should validate");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.triggers[0].label, "Funding");
    }
}
