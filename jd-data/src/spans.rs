//! Contiguous runs of dates where a flow satisfies a condition.

use crate::bands::CEILING;
use jd_dataset::{Dataset, Error};
use serde::Serialize;

/// Thresholds of the threshold-period view are the tenths 0.1 ..= 3.0.
const THRESHOLD_STEPS: usize = 30;

/// One colour per threshold, light blue at 0.1 MCM to navy at 3.0 MCM.
pub static THRESHOLD_COLORS: [&str; THRESHOLD_STEPS] = [
    "#ADD8E6", "#9FD3E6", "#91CBE6", "#83C3E6", "#75BBE6",
    "#67B3E6", "#59ABE6", "#4BA3E6", "#3D9BE6", "#2F93E6",
    "#218BE6", "#1383E6", "#1375D6", "#1367C6", "#1359B6",
    "#134BA6", "#133D96", "#132F86", "#132176", "#131366",
    "#100F5E", "#0E0B56", "#0C074E", "#0A0446", "#08003E",
    "#060036", "#04002E", "#020026", "#00001E", "#00008B",
];

/// An inclusive run of date indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub start: usize,
    pub end: usize,
    pub start_date: String,
    pub end_date: String,
}

impl DateSpan {
    /// Number of dates covered.
    pub fn days(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Every maximal run of present values satisfying `predicate`. Absent values
/// always end a run.
pub fn runs_where<F>(values: &[Option<f64>], predicate: F) -> Vec<(usize, usize)>
where
    F: Fn(f64) -> bool,
{
    let mut runs = Vec::new();
    let mut start = None;
    for (index, value) in values.iter().enumerate() {
        let hit = value.is_some_and(&predicate);
        match (hit, start) {
            (true, None) => start = Some(index),
            (false, Some(s)) => {
                runs.push((s, index - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, values.len() - 1));
    }
    runs
}

/// Runs of values at or above `threshold`. Absent values neither start nor
/// end a run, so a run continues across a gap and may begin or end on one.
pub fn runs_at_or_above(values: &[Option<f64>], threshold: f64) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (index, value) in values.iter().enumerate() {
        match (*value, start) {
            (Some(v), None) if v >= threshold => start = Some(index),
            (Some(v), Some(s)) if v < threshold => {
                runs.push((s, index - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, values.len() - 1));
    }
    runs
}

fn to_spans(runs: Vec<(usize, usize)>, dates: &[String]) -> Vec<DateSpan> {
    runs.into_iter()
        .map(|(start, end)| DateSpan {
            start,
            end,
            start_date: dates[start].clone(),
            end_date: dates[end].clone(),
        })
        .collect()
}

/// Periods where the junction's reduced flow is above the maximum pickup.
pub fn above_ceiling_spans(reduced: &Dataset, junction: &str) -> Result<Vec<DateSpan>, Error> {
    let values = reduced.values_of(junction)?;
    let dates = reduced.dates_of();
    Ok(to_spans(runs_where(&values, |v| v > CEILING), &dates))
}

/// The periods in which flow stayed at or above one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdPeriods {
    pub threshold: f64,
    pub color: &'static str,
    pub spans: Vec<DateSpan>,
}

/// For each threshold 0.1, 0.2, ..., 3.0 MCM, the periods in which the
/// junction's reduced flow was at or above it, bridging missing readings.
/// Thresholds that were never reached are left out.
pub fn threshold_periods(
    reduced: &Dataset,
    junction: &str,
) -> Result<Vec<ThresholdPeriods>, Error> {
    let values = reduced.values_of(junction)?;
    let dates = reduced.dates_of();

    let periods = THRESHOLD_COLORS
        .iter()
        .enumerate()
        .filter_map(|(index, &color)| {
            let threshold = (index + 1) as f64 / 10.0;
            let runs = runs_at_or_above(&values, threshold);
            if runs.is_empty() {
                return None;
            }
            Some(ThresholdPeriods {
                threshold,
                color,
                spans: to_spans(runs, &dates),
            })
        })
        .collect();
    Ok(periods)
}
