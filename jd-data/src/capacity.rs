//! The capacity summary table shown next to the availability chart.
//!
//! For every capacity level (the upper edge of each band, highest first) the
//! table counts the dates on which the junction's reduced flow reached that
//! level and describes when that happened ("Early Jun – Late Sep").

use crate::bands::CAPACITY_BANDS;
use jd_dataset::{Dataset, Error};
use jd_utils::dates::{describe_range, parse_label};
use serde::Serialize;

/// Period text for levels that were never reached.
pub const NOT_REACHED: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityRow {
    pub capacity: f64,
    pub color: &'static str,
    pub days: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    /// Period as printed in the table, [`NOT_REACHED`] when `days` is 0.
    pub period: String,
}

fn describe(first: &str, last: &str) -> String {
    match (parse_label(first), parse_label(last)) {
        (Some(first), Some(last)) => describe_range(&first, &last),
        _ if first == last => first.to_string(),
        _ => format!("{first} – {last}"),
    }
}

/// Build the capacity table for one junction, highest capacity first.
///
/// Absent readings never count towards a level.
pub fn capacity_table(reduced: &Dataset, junction: &str) -> Result<Vec<CapacityRow>, Error> {
    let position = reduced.position(junction)?;

    let rows = CAPACITY_BANDS
        .iter()
        .rev()
        .map(|band| {
            let reached: Vec<&str> = reduced
                .rows()
                .iter()
                .filter(|row| row.get(position).is_some_and(|v| v >= band.end))
                .map(|row| row.date.as_str())
                .collect();

            let first_date = reached.first().map(|d| d.to_string());
            let last_date = reached.last().map(|d| d.to_string());
            let period = match (reached.first(), reached.last()) {
                (Some(first), Some(last)) => describe(first, last),
                _ => NOT_REACHED.to_string(),
            };
            CapacityRow {
                capacity: band.end,
                color: band.color,
                days: reached.len(),
                first_date,
                last_date,
                period,
            }
        })
        .collect();
    Ok(rows)
}
