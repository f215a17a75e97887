//! Cross-junction summary statistics for the all-junctions overview chart.

use jd_dataset::{Dataset, Error};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which statistic the overview reduces each junction's series to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticMode {
    Max,
    Min,
    Average,
}

impl StatisticMode {
    /// Axis and tooltip label.
    pub fn label(&self) -> &'static str {
        match self {
            StatisticMode::Max => "Maximum",
            StatisticMode::Min => "Minimum",
            StatisticMode::Average => "Average",
        }
    }

    /// Bar colour used by the overview chart for this mode.
    pub fn color(&self) -> &'static str {
        match self {
            StatisticMode::Max => "#2E86AB",
            StatisticMode::Min => "#A23B72",
            StatisticMode::Average => "#F18F01",
        }
    }

    /// Reduce a series to this statistic. `None` when there are no samples.
    pub fn reduce(&self, samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        match self {
            StatisticMode::Max => samples.iter().copied().max_by(|a, b| a.total_cmp(b)),
            StatisticMode::Min => samples.iter().copied().min_by(|a, b| a.total_cmp(b)),
            StatisticMode::Average => {
                Some(samples.iter().sum::<f64>() / samples.len() as f64)
            }
        }
    }
}

impl fmt::Display for StatisticMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticMode::Max => write!(f, "max"),
            StatisticMode::Min => write!(f, "min"),
            StatisticMode::Average => write!(f, "avg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown statistic mode {0:?}, expected one of max, min, avg")]
pub struct ParseModeError(pub String);

impl FromStr for StatisticMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximum" => Ok(StatisticMode::Max),
            "min" | "minimum" => Ok(StatisticMode::Min),
            "avg" | "average" | "mean" => Ok(StatisticMode::Average),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// One bar of the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub junction: String,
    pub value: f64,
}

/// The overview: one value per junction, in catalog order.
///
/// Junctions without a single valid sample cannot be summarised; they are
/// listed in `empty` instead of being given a placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub mode: StatisticMode,
    pub label: &'static str,
    pub color: &'static str,
    pub entries: Vec<SummaryEntry>,
    pub empty: Vec<String>,
}

impl Overview {
    /// Fail with `EmptySeries` for the first junction that had no samples.
    pub fn require_complete(self) -> Result<Self, Error> {
        match self.empty.first() {
            Some(junction) => Err(Error::EmptySeries(junction.clone())),
            None => Ok(self),
        }
    }

    /// Value for one junction, if it was summarised.
    pub fn get(&self, junction: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.junction == junction)
            .map(|entry| entry.value)
    }
}

/// Present samples of a junction; absent readings are ignored, not zeroed.
fn samples_of(dataset: &Dataset, position: usize) -> Vec<f64> {
    dataset
        .rows()
        .iter()
        .filter_map(|row| row.get(position))
        .collect()
}

/// Summarise a single junction across every date of the dataset.
pub fn summarize_junction(
    dataset: &Dataset,
    junction: &str,
    mode: StatisticMode,
) -> Result<f64, Error> {
    let position = dataset.position(junction)?;
    mode.reduce(&samples_of(dataset, position))
        .ok_or_else(|| Error::EmptySeries(junction.to_string()))
}

/// Summarise every junction of the dataset, in catalog order.
pub fn summarize(dataset: &Dataset, mode: StatisticMode) -> Overview {
    let mut entries = Vec::with_capacity(dataset.junctions().len());
    let mut empty = Vec::new();

    for (position, junction) in dataset.junctions().iter().enumerate() {
        match mode.reduce(&samples_of(dataset, position)) {
            Some(value) => entries.push(SummaryEntry {
                junction: junction.clone(),
                value,
            }),
            None => empty.push(junction.clone()),
        }
    }

    if !empty.is_empty() {
        log::warn!(
            "summary: {} junctions have no samples: {}",
            empty.len(),
            empty.join(", ")
        );
    }
    log::debug!(
        "summary: {} over {} junctions and {} dates",
        mode,
        entries.len(),
        dataset.len()
    );

    Overview {
        mode,
        label: mode.label(),
        color: mode.color(),
        entries,
        empty,
    }
}
