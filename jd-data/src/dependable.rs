//! Dependable yield: the flow a junction delivers in a given share of years.
//!
//! Each junction comes as a "sheet" whose columns are historical years and
//! whose rows are the dates of the season. For every date the `p`-dependable
//! value is the `(1 - p)` quantile of that date's readings across the years,
//! so 75% dependable yield is the 25th percentile. Collecting the result of
//! every sheet gives the yield dataset the overview chart is drawn from.

use jd_dataset::{Dataset, Error, LoadError, Row};
use serde::Serialize;
use thiserror::Error;

/// Default dependability, i.e. 75% dependable yield.
pub const DEFAULT_DEPENDABILITY: f64 = 0.75;

#[derive(Debug, Error)]
pub enum DependableError {
    #[error(transparent)]
    Alignment(#[from] Error),

    #[error(transparent)]
    Dataset(#[from] LoadError),

    #[error("dependability must be between 0 and 1, got {0}")]
    InvalidDependability(f64),
}

/// One junction's per-year history.
#[derive(Debug, Clone)]
pub struct JunctionSheet {
    pub junction: String,
    /// Columns are years, rows are dates.
    pub years: Dataset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DependableOptions {
    pub dependability: f64,
    /// Use only the first `n` year columns of each sheet.
    pub num_years: Option<usize>,
    /// Process only the first `n` dates.
    pub num_days: Option<usize>,
}

impl Default for DependableOptions {
    fn default() -> Self {
        DependableOptions {
            dependability: DEFAULT_DEPENDABILITY,
            num_years: None,
            num_days: None,
        }
    }
}

/// Per-date statistics across the years of one junction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateDetail {
    pub date: String,
    pub dependable: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunctionDetail {
    pub junction: String,
    /// The year columns that went into the computation.
    pub years: Vec<String>,
    pub rows: Vec<DateDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependableYield {
    /// Dates x junctions.
    pub dataset: Dataset,
    pub details: Vec<JunctionDetail>,
}

/// Quantile of sorted samples with linear interpolation between the two
/// nearest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

fn date_detail(row: &Row, year_count: usize, q: f64) -> DateDetail {
    let mut samples: Vec<f64> = row.values()[..year_count]
        .iter()
        .flatten()
        .copied()
        .collect();
    samples.sort_by(|a, b| a.total_cmp(b));

    let mean = if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    };
    DateDetail {
        date: row.date.clone(),
        dependable: quantile(&samples, q),
        min: samples.first().copied(),
        max: samples.last().copied(),
        mean,
    }
}

/// Compute the dependable yield of every sheet.
///
/// The dates of the first sheet label the result; all sheets must share its
/// row count (after the `num_days` limit).
pub fn dependable_yield(
    sheets: &[JunctionSheet],
    options: &DependableOptions,
) -> Result<DependableYield, DependableError> {
    if !(0.0..=1.0).contains(&options.dependability) {
        return Err(DependableError::InvalidDependability(options.dependability));
    }
    let q = 1.0 - options.dependability;

    let day_count = |sheet: &JunctionSheet| {
        options
            .num_days
            .map_or(sheet.years.len(), |n| n.min(sheet.years.len()))
    };
    let expected = sheets.first().map(day_count).unwrap_or(0);

    let mut details = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let found = day_count(sheet);
        if found != expected {
            return Err(Error::DatasetLengthMismatch { expected, found }.into());
        }
        let year_count = options
            .num_years
            .map_or(sheet.years.junctions().len(), |n| {
                n.min(sheet.years.junctions().len())
            });
        let years = sheet.years.junctions()[..year_count].to_vec();
        log::info!(
            "dependable: {} using {} years over {} dates",
            sheet.junction,
            years.len(),
            found
        );

        let rows = sheet.years.rows()[..found]
            .iter()
            .map(|row| date_detail(row, year_count, q))
            .collect();
        details.push(JunctionDetail {
            junction: sheet.junction.clone(),
            years,
            rows,
        });
    }

    let dates: Vec<String> = details
        .first()
        .map(|detail| detail.rows.iter().map(|r| r.date.clone()).collect())
        .unwrap_or_default();
    for detail in details.iter().skip(1) {
        if let Some((index, row)) = detail
            .rows
            .iter()
            .enumerate()
            .find(|(index, row)| row.date != dates[*index])
        {
            log::warn!(
                "dependable: {} row {} is dated {}, expected {}",
                detail.junction,
                index,
                row.date,
                dates[index]
            );
        }
    }

    let rows = dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let values = details.iter().map(|d| d.rows[index].dependable).collect();
            Row::new(date.clone(), values)
        })
        .collect();
    let junctions = details.iter().map(|d| d.junction.clone()).collect();
    let dataset = Dataset::from_rows(junctions, rows)?;

    Ok(DependableYield { dataset, details })
}
