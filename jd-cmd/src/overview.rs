//! Catalog listing and the all-junctions overview.

use crate::io::{load_dataset, to_json, write_output};
use jd_data::summary::{summarize, Overview};
use jd_data::StatisticMode;
use jd_dataset::Dataset;
use log::info;

pub fn run_junctions(dataset_path: &str) -> anyhow::Result<()> {
    let dataset = load_dataset(dataset_path)?;
    for junction in dataset.junctions() {
        println!("{}", junction);
    }
    Ok(())
}

/// Summarise `dataset`; with `strict`, a junction without samples is an error
/// instead of being listed as empty.
pub fn build_overview(
    dataset: &Dataset,
    mode: StatisticMode,
    strict: bool,
) -> anyhow::Result<Overview> {
    let overview = summarize(dataset, mode);
    if strict {
        return Ok(overview.require_complete()?);
    }
    Ok(overview)
}

pub fn run_overview(
    dataset_path: &str,
    mode: StatisticMode,
    strict: bool,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let dataset = load_dataset(dataset_path)?;
    let overview = build_overview(&dataset, mode, strict)?;
    info!(
        "Overview ({}): {} junctions summarised, {} empty",
        mode,
        overview.entries.len(),
        overview.empty.len()
    );
    write_output(output, &to_json(&overview)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YIELD_CSV: &str = "Date,Nikhop,Karjan\n01-Jun,1.0,\n02-Jun,3.0,NaN\n";

    #[test]
    fn lenient_overview_lists_empty_junctions() {
        let dataset = Dataset::from_csv_str(YIELD_CSV).unwrap();
        let overview = build_overview(&dataset, StatisticMode::Average, false).unwrap();
        assert_eq!(overview.get("Nikhop"), Some(2.0));
        assert_eq!(overview.empty, vec!["Karjan".to_string()]);
    }

    #[test]
    fn strict_overview_fails_on_empty_junction() {
        let dataset = Dataset::from_csv_str(YIELD_CSV).unwrap();
        let err = build_overview(&dataset, StatisticMode::Max, true).unwrap_err();
        assert!(err.to_string().contains("Karjan"));
    }
}
