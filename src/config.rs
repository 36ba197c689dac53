use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::chart::{ChartKind, DEFAULT_DONUT_HOLE_WIDTH};
use crate::error::{Result, TopLangsError};
use crate::fetch::DEFAULT_API_BASE;
use crate::output::OutputOption;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.toml";
pub const DEFAULT_MINIMUM_PERCENTAGE: f64 = 0.015;
pub const DEFAULT_IMAGE_PATH: &str = "lang_chart.svg";

/// Fetch fresh totals from the API, or reuse a saved snapshot.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    New,
    Old,
}

#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct Settings {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub use_data: DataSource,
    /// Snapshot written after a `new` fetch and read by an `old` run.
    #[serde(default)]
    pub json_save_path: Option<PathBuf>,
    /// Fraction of the total below which a language is folded into "Other".
    #[serde(default = "default_minimum_percentage")]
    pub minimum_percentage: f64,
    #[serde(default)]
    pub chart_type: ChartKind,
    #[serde(default = "default_donut_hole_width")]
    pub donut_hole_width: f64,
    #[serde(default)]
    pub output_option: OutputOption,
    #[serde(default = "default_image_save_path")]
    pub image_save_path: PathBuf,
    /// Replaces the bundled language color table.
    #[serde(default)]
    pub color_table_path: Option<PathBuf>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_minimum_percentage() -> f64 {
    DEFAULT_MINIMUM_PERCENTAGE
}

fn default_donut_hole_width() -> f64 {
    DEFAULT_DONUT_HOLE_WIDTH
}

fn default_image_save_path() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_PATH)
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_workers() -> usize {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: None,
            use_data: DataSource::default(),
            json_save_path: None,
            minimum_percentage: DEFAULT_MINIMUM_PERCENTAGE,
            chart_type: ChartKind::default(),
            donut_hole_width: DEFAULT_DONUT_HOLE_WIDTH,
            output_option: OutputOption::default(),
            image_save_path: default_image_save_path(),
            color_table_path: None,
            api_base: default_api_base(),
            workers: default_workers(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TopLangsError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The token, unless it is missing or blank.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.use_data == DataSource::New && self.username.trim().is_empty() {
            return Err(TopLangsError::Config(
                "username is required when use_data = \"new\"".to_string(),
            ));
        }
        if self.minimum_percentage.is_nan() || self.minimum_percentage < 0.0 {
            return Err(TopLangsError::InvalidThreshold(self.minimum_percentage));
        }
        if self.chart_type == ChartKind::Donut
            && !(self.donut_hole_width > 0.0 && self.donut_hole_width < 1.0)
        {
            return Err(TopLangsError::Config(format!(
                "donut_hole_width must be between 0 and 1, got {}",
                self.donut_hole_width
            )));
        }
        if self.workers == 0 {
            return Err(TopLangsError::Config("workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
