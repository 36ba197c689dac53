use std::fs;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use log::info;
use serde::Deserialize;

use crate::error::Result;

/// Where the rendered chart goes.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputOption {
    /// Write the SVG to `image_save_path`.
    #[default]
    Save,
    /// Print the SVG to stdout.
    Show,
}

pub fn save_chart(svg: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    info!("Chart saved to {}", path.display());
    Ok(())
}

pub fn show_chart(svg: &str, out: &mut impl Write) -> Result<()> {
    out.write_all(svg.as_bytes())?;
    out.flush()?;
    Ok(())
}
