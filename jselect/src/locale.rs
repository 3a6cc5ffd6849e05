//! Localised strings, looked up once per instance at construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{JselectError, Result};

/// The four strings a dropdown shows to the user.
///
/// Serialised with the field names page scripts use: `SEARCH`, `NO_RESULT`,
/// `PLACEHOLDER_SINGLE` and `PLACEHOLDER_MULTI`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Locale {
    pub search: String,
    pub no_result: String,
    pub placeholder_single: String,
    pub placeholder_multi: String,
}

impl Locale {
    pub fn english() -> Self {
        Self {
            search: "Search".to_string(),
            no_result: "No results found".to_string(),
            placeholder_single: "Select an option".to_string(),
            placeholder_multi: "Select one or more options".to_string(),
        }
    }

    /// Placeholder for a single- or multi-select widget.
    pub fn placeholder(&self, multiple: bool) -> &str {
        if multiple {
            &self.placeholder_multi
        } else {
            &self.placeholder_single
        }
    }
}

/// Mapping from locale identifier to [`Locale`], supplied by the embedding
/// page before any widget is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTable {
    entries: HashMap<String, Locale>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with the built-in `en` entry.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("en", Locale::english());
        table
    }

    /// Parse a table from a JSON object keyed by locale id.
    ///
    /// ```ignore
    /// let table = LocaleTable::from_json(r#"{"it": {"SEARCH": "Cerca", ...}}"#)?;
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, id: impl Into<String>, locale: Locale) -> Option<Locale> {
        self.entries.insert(id.into(), locale)
    }

    pub fn get(&self, id: &str) -> Option<&Locale> {
        self.entries.get(id)
    }

    /// Look up a locale, failing when it was never registered.
    pub fn require(&self, id: &str) -> Result<&Locale> {
        self.get(id)
            .ok_or_else(|| JselectError::UnknownLocale(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
