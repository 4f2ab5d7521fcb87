use docsmith_model::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One logical column addressed under two spellings: the short internal key
/// the interactive surface uses, and the long key the template dialect uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasPair {
    pub internal: String,
    pub export: String,
}

impl AliasPair {
    pub fn new(internal: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            internal: internal.into(),
            export: export.into(),
        }
    }
}

/// Bidirectional alias table reconciling the two spellings.
///
/// Reconciliation rules:
/// - `normalize_row` populates both spellings from whichever is present;
/// - when both are present and disagree, the internal spelling wins and is
///   propagated to the alias slot;
/// - a logical column absent under both spellings stays absent — no value
///   is ever invented;
/// - idempotent: normalizing an already-normalized row changes nothing.
#[derive(Debug, Clone)]
pub struct KeyNormalizer {
    internal_to_export: HashMap<String, String>,
    export_to_internal: HashMap<String, String>,
}

impl KeyNormalizer {
    pub fn new(pairs: Vec<AliasPair>) -> Self {
        let mut internal_to_export = HashMap::new();
        let mut export_to_internal = HashMap::new();
        for pair in pairs {
            internal_to_export.insert(pair.internal.clone(), pair.export.clone());
            export_to_internal.insert(pair.export, pair.internal);
        }
        Self {
            internal_to_export,
            export_to_internal,
        }
    }

    /// Alias table for the standard line-items columns
    pub fn line_items() -> Self {
        Self::new(vec![
            AliasPair::new("qty", "quantity"),
            AliasPair::new("rate", "unitPrice"),
            AliasPair::new("amount", "total"),
        ])
    }

    /// Translate a key to its export spelling (identity when unaliased)
    pub fn export_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.internal_to_export
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Translate a key to its internal spelling (identity when unaliased)
    pub fn internal_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.export_to_internal
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn is_aliased(&self, key: &str) -> bool {
        self.internal_to_export.contains_key(key) || self.export_to_internal.contains_key(key)
    }

    /// Populate both spellings of every aliased key present in the row
    pub fn normalize_row(&self, row: &Row) -> Row {
        let mut normalized = row.clone();
        for (internal, export) in &self.internal_to_export {
            match (row.get(internal), row.get(export)) {
                // internal wins, propagated to the alias slot
                (Some(value), _) => {
                    let value = value.to_string();
                    normalized.set(export.clone(), value);
                }
                (None, Some(value)) => {
                    let value = value.to_string();
                    normalized.set(internal.clone(), value);
                }
                (None, None) => {}
            }
        }
        normalized
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::line_items()
    }
}
