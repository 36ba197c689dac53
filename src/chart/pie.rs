//! Pie and donut charts with a legend to the right.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

use super::{
    DEFAULT_DONUT_HOLE_WIDTH, Renderer, close_document, empty_state, legend_height,
    open_document, write_legend, xml_escape,
};
use crate::stats::ChartDataset;

const RADIUS: f64 = 150.0;
const CENTER_X: f64 = 200.0;
const CENTER_Y: f64 = 220.0;
const LEGEND_X: f64 = 390.0;
const LEGEND_TOP: f64 = 70.0;
const WIDTH: f64 = 640.0;
const MIN_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct PieChart;

/// A pie with its center cut out.
#[derive(Debug, Clone, Copy)]
pub struct DonutChart {
    /// Radius of the hole as a fraction of the outer radius.
    hole_width: f64,
}

impl DonutChart {
    #[must_use]
    pub fn new(hole_width: f64) -> Self {
        let hole_width = if hole_width > 0.0 && hole_width < 1.0 {
            hole_width
        } else {
            DEFAULT_DONUT_HOLE_WIDTH
        };
        Self { hole_width }
    }

    #[must_use]
    pub const fn hole_width(&self) -> f64 {
        self.hole_width
    }
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new(DEFAULT_DONUT_HOLE_WIDTH)
    }
}

impl Renderer for PieChart {
    fn render(&self, dataset: &ChartDataset, title: &str) -> String {
        render_round(dataset, title, 0.0)
    }
}

impl Renderer for DonutChart {
    fn render(&self, dataset: &ChartDataset, title: &str) -> String {
        render_round(dataset, title, RADIUS * self.hole_width)
    }
}

/// Slices run clockwise from twelve o'clock in dataset order.
#[allow(clippy::cast_precision_loss)]
fn render_round(dataset: &ChartDataset, title: &str, inner: f64) -> String {
    let height = legend_height(dataset.len(), LEGEND_TOP).max(MIN_HEIGHT);
    let mut output = String::new();
    open_document(&mut output, WIDTH, height, title);

    if dataset.is_empty() || dataset.total == 0 {
        empty_state(&mut output, WIDTH, height);
        close_document(&mut output);
        return output;
    }

    let _ = writeln!(output, r#"  <g class="slices">"#);
    let total = dataset.total as f64;
    let mut start = -FRAC_PI_2;
    for entry in dataset.entries() {
        let sweep = entry.size as f64 / total * TAU;
        let d = if dataset.len() == 1 {
            full_ring_path(inner)
        } else {
            slice_path(start, start + sweep, inner)
        };
        let _ = writeln!(
            output,
            r##"    <path d="{d}" fill="{}" fill-rule="evenodd" stroke="#ffffff" stroke-width="1"><title>{}</title></path>"##,
            xml_escape(entry.color),
            xml_escape(entry.percentage)
        );
        start += sweep;
    }
    let _ = writeln!(output, "  </g>");

    write_legend(&mut output, dataset, LEGEND_X, LEGEND_TOP);
    close_document(&mut output);
    output
}

fn point(angle: f64, radius: f64) -> (f64, f64) {
    (
        radius.mul_add(angle.cos(), CENTER_X),
        radius.mul_add(angle.sin(), CENTER_Y),
    )
}

fn slice_path(start: f64, end: f64, inner: f64) -> String {
    let large_arc = u8::from(end - start > std::f64::consts::PI);
    let (x0, y0) = point(start, RADIUS);
    let (x1, y1) = point(end, RADIUS);

    if inner <= 0.0 {
        return format!(
            "M {CENTER_X:.2} {CENTER_Y:.2} L {x0:.2} {y0:.2} A {RADIUS:.2} {RADIUS:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
        );
    }

    let (ix1, iy1) = point(end, inner);
    let (ix0, iy0) = point(start, inner);
    format!(
        "M {x0:.2} {y0:.2} A {RADIUS:.2} {RADIUS:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} L {ix1:.2} {iy1:.2} A {inner:.2} {inner:.2} 0 {large_arc} 0 {ix0:.2} {iy0:.2} Z"
    )
}

/// An arc cannot start and end on the same point, so a lone entry is drawn
/// as two half circles (and a hole, for donuts).
fn full_ring_path(inner: f64) -> String {
    let mut d = circle_path(RADIUS);
    if inner > 0.0 {
        d.push(' ');
        d.push_str(&circle_path(inner));
    }
    d
}

fn circle_path(r: f64) -> String {
    let left = CENTER_X - r;
    let right = CENTER_X + r;
    format!(
        "M {right:.2} {CENTER_Y:.2} A {r:.2} {r:.2} 0 1 1 {left:.2} {CENTER_Y:.2} A {r:.2} {r:.2} 0 1 1 {right:.2} {CENTER_Y:.2} Z"
    )
}
