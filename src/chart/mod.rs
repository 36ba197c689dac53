//! SVG renderers for a [`ChartDataset`].
//!
//! Renderers draw exactly what they are given: one slice or bar and one
//! label per dataset entry, in dataset order, with the dataset's colors.

mod bar;
mod pie;

use std::fmt::Write;

use clap::ValueEnum;
use serde::Deserialize;

use crate::stats::ChartDataset;

pub use bar::BarChart;
pub use pie::{DonutChart, PieChart};

pub const DEFAULT_DONUT_HOLE_WIDTH: f64 = 0.4;

const FONT_FAMILY: &str = "Segoe UI, Helvetica, Arial, sans-serif";
const TEXT_COLOR: &str = "#24292f";
const TITLE_SIZE: f64 = 18.0;
const LABEL_SIZE: f64 = 13.0;
const LEGEND_ROW: f64 = 22.0;
const SWATCH: f64 = 14.0;

pub trait Renderer {
    /// Render a complete standalone SVG document.
    fn render(&self, dataset: &ChartDataset, title: &str) -> String;
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
    Donut,
    Bar,
}

impl ChartKind {
    #[must_use]
    pub fn renderer(self, donut_hole_width: f64) -> Box<dyn Renderer> {
        match self {
            Self::Pie => Box::new(PieChart::default()),
            Self::Donut => Box::new(DonutChart::new(donut_hole_width)),
            Self::Bar => Box::new(BarChart::default()),
        }
    }
}

/// Escape text for SVG content and attribute values.
pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Opening `<svg>` tag, background, accessible title and visible heading.
fn open_document(output: &mut String, width: f64, height: f64, title: &str) {
    let title = xml_escape(title);
    let _ = writeln!(
        output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img" font-family="{FONT_FAMILY}">"#
    );
    let _ = writeln!(output, "  <title>{title}</title>");
    let _ = writeln!(
        output,
        r##"  <rect width="{width}" height="{height}" fill="#ffffff"/>"##
    );
    let _ = writeln!(
        output,
        r#"  <text x="{:.2}" y="32" text-anchor="middle" fill="{TEXT_COLOR}" font-size="{TITLE_SIZE}" font-weight="600">{title}</text>"#,
        width / 2.0
    );
}

fn close_document(output: &mut String) {
    output.push_str("</svg>\n");
}

fn empty_state(output: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        output,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{TEXT_COLOR}" font-size="{LABEL_SIZE}">No language data</text>"#,
        width / 2.0,
        height / 2.0
    );
}

/// Color swatch plus percentage label for each entry, top to bottom.
fn write_legend(output: &mut String, dataset: &ChartDataset, x: f64, y: f64) {
    let _ = writeln!(output, r#"  <g class="legend">"#);
    for (i, entry) in dataset.entries().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let row_y = LEGEND_ROW.mul_add(i as f64, y);
        let _ = writeln!(
            output,
            r#"    <rect x="{x:.2}" y="{row_y:.2}" width="{SWATCH}" height="{SWATCH}" fill="{}"/>"#,
            xml_escape(entry.color)
        );
        let _ = writeln!(
            output,
            r#"    <text x="{:.2}" y="{:.2}" fill="{TEXT_COLOR}" font-size="{LABEL_SIZE}">{}</text>"#,
            x + SWATCH + 8.0,
            row_y + SWATCH - 2.0,
            xml_escape(entry.percentage)
        );
    }
    let _ = writeln!(output, "  </g>");
}

/// Height needed for a legend of `rows` entries starting at `top`.
#[allow(clippy::cast_precision_loss)]
fn legend_height(rows: usize, top: f64) -> f64 {
    LEGEND_ROW.mul_add(rows as f64, top) + 20.0
}
