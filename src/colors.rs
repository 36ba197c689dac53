//! Language display colors, in the linguist `colors.json` layout.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::Result;

/// Used for any language the table has no color for.
pub const FALLBACK_COLOR: &str = "#cccccc";
/// Used for the aggregated "Other" bucket; never looked up.
pub const OTHER_COLOR: &str = "#000000";

const BUNDLED: &str = include_str!("../assets/lang_colors.json");

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
struct ColorEntry {
    color: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColorTable {
    entries: HashMap<String, ColorEntry>,
}

impl ColorTable {
    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn lookup(&self, language: &str) -> Option<&str> {
        self.entries.get(language)?.color.as_deref()
    }

    /// Table color for `language`, or [`FALLBACK_COLOR`] with a warning.
    #[must_use]
    pub fn resolve(&self, language: &str) -> &str {
        self.lookup(language).unwrap_or_else(|| {
            warn!("No color for {language}, using {FALLBACK_COLOR}");
            FALLBACK_COLOR
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
