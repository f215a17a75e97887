//! Build the dependable-yield dataset from per-junction year sheets.

use crate::io::{load_dataset, to_json, write_output};
use jd_data::dependable::{dependable_yield, DependableOptions, JunctionSheet};
use log::info;
use std::path::Path;

/// A sheet's junction is named after its file, e.g. `sheets/Nikhop.csv`.
pub fn junction_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn run_dependable(
    sheet_paths: &[String],
    options: &DependableOptions,
    output: &str,
    details: Option<&str>,
) -> anyhow::Result<()> {
    if sheet_paths.is_empty() {
        anyhow::bail!("at least one --sheet is required");
    }

    let sheets = sheet_paths
        .iter()
        .map(|path| -> anyhow::Result<JunctionSheet> {
            Ok(JunctionSheet {
                junction: junction_name(path),
                years: load_dataset(path)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    info!(
        "Computing {:.0}% dependable yield for {} junctions",
        options.dependability * 100.0,
        sheets.len()
    );
    let result = dependable_yield(&sheets, options)?;

    write_output(Some(output), &result.dataset.to_csv_string()?)?;
    if let Some(path) = details {
        write_output(Some(path), &to_json(&result.details)?)?;
    }
    Ok(())
}
