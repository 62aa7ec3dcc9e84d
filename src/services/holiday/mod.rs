//! Holiday table loading and date-key resolution.
//!
//! The table is a JSON object mapping `MM-DD` keys to either a bare image
//! filename or an `{ "image": ..., "text": ... }` object. It is parsed once
//! on the first lookup and never mutated afterwards; changing the file
//! requires an application restart.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::models::holiday::HolidayEntry;

/// Directory prefix for holiday backgrounds inside the asset catalog.
pub const HOLIDAY_DIR: &str = "holidays";

/// Background used whenever no holiday image applies for the day.
pub const DEFAULT_BACKGROUND: &str = "images/default_flag.png";

enum TableSource {
    File(PathBuf),
    Inline(String),
}

/// Answers point queries against the lazily loaded holiday table.
pub struct HolidayResolver {
    source: TableSource,
    table: OnceLock<HashMap<String, HolidayEntry>>,
}

impl HolidayResolver {
    /// Resolver backed by a JSON file. The file is not touched until the
    /// first lookup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TableSource::File(path.into()),
            table: OnceLock::new(),
        }
    }

    /// Resolver backed by an in-memory JSON document.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            source: TableSource::Inline(json.into()),
            table: OnceLock::new(),
        }
    }

    /// Looks up the entry for a `MM-DD` key. Keys are not validated; an
    /// invalid key simply misses.
    pub fn lookup(&self, date_key: &str) -> Option<&HolidayEntry> {
        self.table().get(date_key)
    }

    /// Relative asset path of the background for a `MM-DD` key. Falls back
    /// to [`DEFAULT_BACKGROUND`] when the day has no holiday or the entry
    /// has no image.
    pub fn resolve_background_path(&self, date_key: &str) -> Arc<str> {
        match self.lookup(date_key) {
            Some(entry) if entry.has_image() => {
                Arc::from(format!("{}/{}", HOLIDAY_DIR, entry.image))
            }
            _ => Arc::from(DEFAULT_BACKGROUND),
        }
    }

    fn table(&self) -> &HashMap<String, HolidayEntry> {
        self.table.get_or_init(|| match &self.source {
            TableSource::File(path) => match fs::read_to_string(path) {
                Ok(data) => parse_table(&data),
                Err(err) => {
                    log::warn!(
                        "failed to read holiday table {}: {}; every day will use the default background",
                        path.display(),
                        err
                    );
                    HashMap::new()
                }
            },
            TableSource::Inline(json) => parse_table(json),
        })
    }
}

/// Parses the table document. A malformed document yields an empty table;
/// a malformed individual value degrades to an imageless entry so one bad
/// key never poisons the rest.
fn parse_table(data: &str) -> HashMap<String, HolidayEntry> {
    let root: Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("malformed holiday table: {}", err);
            return HashMap::new();
        }
    };

    let Value::Object(entries) = root else {
        log::warn!("holiday table root is not a JSON object");
        return HashMap::new();
    };

    let table: HashMap<String, HolidayEntry> = entries
        .into_iter()
        .map(|(key, value)| (key, entry_from_value(value)))
        .collect();
    log::info!("loaded holiday table with {} entries", table.len());
    table
}

fn entry_from_value(value: Value) -> HolidayEntry {
    match value {
        Value::String(image) => HolidayEntry { image, text: None },
        Value::Object(fields) => {
            let image = fields
                .get("image")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let text = fields
                .get("text")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string);
            HolidayEntry { image, text }
        }
        _ => HolidayEntry {
            image: String::new(),
            text: None,
        },
    }
}
