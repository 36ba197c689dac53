//! Horizontal bar chart, one bar per entry with its label beside it.

use std::fmt::Write;

use super::{
    LABEL_SIZE, Renderer, TEXT_COLOR, close_document, empty_state, open_document, xml_escape,
};
use crate::stats::ChartDataset;

#[derive(Debug, Clone, Copy)]
pub struct BarChart {
    pub width: f64,
    pub bar_height: f64,
    pub bar_gap: f64,
    pub padding_left: f64,
    pub padding_top: f64,
    /// Space reserved right of the longest bar for its label.
    pub label_width: f64,
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            width: 640.0,
            bar_height: 22.0,
            bar_gap: 10.0,
            padding_left: 24.0,
            padding_top: 60.0,
            label_width: 180.0,
        }
    }
}

impl BarChart {
    #[allow(clippy::cast_precision_loss)]
    fn height(&self, rows: usize) -> f64 {
        (self.bar_height + self.bar_gap).mul_add(rows.max(1) as f64, self.padding_top) + 20.0
    }
}

impl Renderer for BarChart {
    /// Bars are scaled against the largest entry, which spans the full track.
    #[allow(clippy::cast_precision_loss)]
    fn render(&self, dataset: &ChartDataset, title: &str) -> String {
        let height = self.height(dataset.len());
        let mut output = String::new();
        open_document(&mut output, self.width, height, title);

        let max = dataset.sizes.iter().copied().max().unwrap_or(0);
        if max == 0 {
            empty_state(&mut output, self.width, height);
            close_document(&mut output);
            return output;
        }

        let track = self.width - self.padding_left - self.label_width;
        let _ = writeln!(output, r#"  <g class="bars">"#);
        for (i, entry) in dataset.entries().enumerate() {
            let y = (self.bar_height + self.bar_gap).mul_add(i as f64, self.padding_top);
            // Keep tiny entries visible.
            let length = (entry.size as f64 / max as f64 * track).max(1.0);
            let _ = writeln!(
                output,
                r#"    <rect x="{:.2}" y="{y:.2}" width="{length:.2}" height="{:.2}" fill="{}" rx="2"><title>{}</title></rect>"#,
                self.padding_left,
                self.bar_height,
                xml_escape(entry.color),
                xml_escape(entry.percentage)
            );
            let _ = writeln!(
                output,
                r#"    <text x="{:.2}" y="{:.2}" fill="{TEXT_COLOR}" font-size="{LABEL_SIZE}">{}</text>"#,
                self.padding_left + length + 8.0,
                y + self.bar_height / 2.0 + LABEL_SIZE / 3.0,
                xml_escape(entry.percentage)
            );
        }
        let _ = writeln!(output, "  </g>");

        close_document(&mut output);
        output
    }
}
