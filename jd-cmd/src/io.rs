//! Reading datasets from disk and writing command output.

use jd_dataset::Dataset;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Input formats, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// `.json` files hold records, everything else is read as CSV.
    pub fn of(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Csv,
        }
    }
}

pub fn load_dataset(path: &str) -> anyhow::Result<Dataset> {
    let path = Path::new(path);
    let data = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let dataset = match Format::of(path) {
        Format::Json => Dataset::from_json_str(&data),
        Format::Csv => Dataset::from_csv_str(&data),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;

    info!(
        "Loaded {} ({} junctions, {} dates)",
        path.display(),
        dataset.junctions().len(),
        dataset.len()
    );
    Ok(dataset)
}

/// Write to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&str>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
            info!("Wrote {}", path);
        }
        None => println!("{}", contents.trim_end()),
    }
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
