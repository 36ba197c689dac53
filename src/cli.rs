use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::chart::ChartKind;
use crate::config::{DEFAULT_SETTINGS_PATH, DataSource, Settings};
use crate::output::OutputOption;

#[derive(Parser, Debug)]
#[command(name = "top_langs")]
#[command(version, about = "Chart the languages used across a GitHub user's repositories")]
pub struct Cli {
    /// Settings file
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,

    #[arg(long)]
    pub username: Option<String>,

    /// API token; falls back to the settings file
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fetch new data or reuse the saved snapshot
    #[arg(long, value_enum)]
    pub use_data: Option<DataSource>,

    /// Snapshot file to write (new) or read (old)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Languages below this fraction of the total are grouped as "Other"
    #[arg(long, allow_negative_numbers = true)]
    pub min_pct: Option<f64>,

    #[arg(long, value_enum)]
    pub chart_type: Option<ChartKind>,

    #[arg(long, value_enum)]
    pub output: Option<OutputOption>,

    /// Where `save` writes the chart
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Parallel language requests per page
    #[arg(long)]
    pub workers: Option<usize>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command line values win over the settings file.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(username) = &self.username {
            settings.username.clone_from(username);
        }
        if let Some(token) = &self.token {
            settings.token = Some(token.clone());
        }
        if let Some(use_data) = self.use_data {
            settings.use_data = use_data;
        }
        if let Some(json) = &self.json {
            settings.json_save_path = Some(json.clone());
        }
        if let Some(min_pct) = self.min_pct {
            settings.minimum_percentage = min_pct;
        }
        if let Some(chart_type) = self.chart_type {
            settings.chart_type = chart_type;
        }
        if let Some(output) = self.output {
            settings.output_option = output;
        }
        if let Some(image) = &self.image {
            settings.image_save_path.clone_from(image);
        }
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
    }

    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
