//! Reading and writing raw language totals as a flat JSON object.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use serde_json::{Map, Number, Value};
use tempfile::NamedTempFile;

use crate::error::{Result, TopLangsError};
use crate::totals::RawTotals;

/// Write `totals` to `path`, replacing whatever was there.
///
/// The JSON is written to a sibling temporary file first and then renamed
/// over `path`, so readers never observe a half-written snapshot.
pub fn save(totals: &RawTotals, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, totals)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| TopLangsError::Io(e.error))?;

    info!("Saved {} languages to {}", totals.len(), path.display());
    Ok(())
}

/// Read a snapshot written by [`save`] (or by hand).
///
/// No path means no data: the caller decides whether that is an error.
/// Every value is coerced to a whole byte count.
pub fn load(path: Option<&Path>) -> Result<RawTotals> {
    let Some(path) = path else {
        return Ok(RawTotals::new());
    };

    let contents = fs::read_to_string(path)?;
    let raw: Map<String, Value> =
        serde_json::from_str(&contents).map_err(|e| TopLangsError::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut totals = RawTotals::new();
    for (language, value) in raw {
        let count = coerce_count(&value).ok_or_else(|| TopLangsError::Snapshot {
            path: path.to_path_buf(),
            message: format!("{language}: {value} is not a byte count"),
        })?;
        totals.add(language, count);
    }
    if totals.checked_total().is_none() {
        return Err(TopLangsError::Snapshot {
            path: path.to_path_buf(),
            message: "byte counts add up to more than a u64 can hold".to_string(),
        });
    }

    info!("Loaded {} languages from {}", totals.len(), path.display());
    Ok(totals)
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => number_to_count(n),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_count))
        }
        _ => None,
    }
}

fn number_to_count(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| n.as_f64().and_then(float_to_count))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_count(f: f64) -> Option<u64> {
    // Truncate toward zero; -0.5 truncates to a valid 0.
    let whole = f.trunc();
    if whole.is_finite() && whole >= 0.0 && whole <= u64::MAX as f64 {
        Some(whole as u64)
    } else {
        None
    }
}
