//! Wires the pipeline together: data source, statistics, renderer, sink.

use std::io::Write;

use log::info;

use crate::colors::ColorTable;
use crate::config::{DataSource, Settings};
use crate::error::Result;
use crate::fetch::{Fetcher, HttpTransport, Transport};
use crate::output::{self, OutputOption};
use crate::snapshot;
use crate::stats;
use crate::totals::RawTotals;

pub fn run(settings: &Settings, stdout: &mut impl Write) -> Result<()> {
    run_with(settings, HttpTransport::new(), stdout)
}

pub fn run_with<T: Transport>(
    settings: &Settings,
    transport: T,
    stdout: &mut impl Write,
) -> Result<()> {
    settings.validate()?;

    let totals = load_totals(settings, transport)?;
    let colors = match &settings.color_table_path {
        Some(path) => ColorTable::load(path)?,
        None => ColorTable::bundled()?,
    };

    info!("Creating {:?} chart", settings.chart_type);
    let dataset = stats::process(&totals, settings.minimum_percentage, &colors)?;
    let svg = settings
        .chart_type
        .renderer(settings.donut_hole_width)
        .render(&dataset, &chart_title(&settings.username));

    match settings.output_option {
        OutputOption::Save => output::save_chart(&svg, &settings.image_save_path),
        OutputOption::Show => output::show_chart(&svg, stdout),
    }
}

fn load_totals<T: Transport>(settings: &Settings, transport: T) -> Result<RawTotals> {
    match settings.use_data {
        DataSource::New => {
            info!("Getting new data for {}", settings.username);
            let totals = Fetcher::new(transport)
                .with_api_base(settings.api_base.as_str())
                .with_workers(settings.workers)
                .fetch_totals(&settings.username, settings.credential())?;
            if let Some(path) = &settings.json_save_path {
                snapshot::save(&totals, path)?;
            }
            Ok(totals)
        }
        DataSource::Old => {
            info!("Using old data");
            snapshot::load(settings.json_save_path.as_deref())
        }
    }
}

#[must_use]
pub fn chart_title(username: &str) -> String {
    let username = username.trim();
    if username.is_empty() {
        "Most Used Languages".to_string()
    } else {
        format!("{username}'s Most Used Languages")
    }
}
