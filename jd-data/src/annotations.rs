//! Per-band annotations written across the availability chart.
//!
//! For each capacity band, the dates whose reduced flow (capped at the
//! ceiling) falls inside the band, the calendar span from the first to the
//! last of them, and the average reduced flow over those dates, e.g.
//! `0.31 MCM (1st Jun - 12th Jun) = 12 days`.

use crate::bands::{CAPACITY_BANDS, CEILING};
use jd_dataset::{Dataset, Error};
use jd_utils::dates::{days_inclusive, format_ordinal_day, parse_label};
use serde::Serialize;

/// Annotations spanning fewer days than this are not drawn on the chart.
pub const MIN_LABEL_DAYS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandAnnotation {
    pub label: &'static str,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
    pub first_date: String,
    pub last_date: String,
    /// Calendar days from the first to the last date, both included.
    pub days: usize,
    /// Mean of the uncapped reduced flow over the dates in the band.
    pub average: f64,
    pub text: String,
}

impl BandAnnotation {
    pub fn is_labelled(&self) -> bool {
        self.days >= MIN_LABEL_DAYS
    }
}

/// Day count and printed dates. Labels that do not parse as dates (or run
/// backwards, as day-month labels crossing new year do) count rows instead.
fn span(first: (usize, &str), last: (usize, &str)) -> (usize, String, String) {
    match (parse_label(first.1), parse_label(last.1)) {
        (Some(a), Some(b)) if b >= a => (
            days_inclusive(&a, &b) as usize,
            format_ordinal_day(&a),
            format_ordinal_day(&b),
        ),
        _ => (last.0 - first.0 + 1, first.1.to_string(), last.1.to_string()),
    }
}

/// Annotate every band the junction's reduced flow visits, in band order.
/// Absent and negative readings belong to no band.
pub fn band_annotations(reduced: &Dataset, junction: &str) -> Result<Vec<BandAnnotation>, Error> {
    let position = reduced.position(junction)?;
    let rows = reduced.rows();

    let annotations = CAPACITY_BANDS
        .iter()
        .filter_map(|band| {
            let hits: Vec<(usize, f64)> = rows
                .iter()
                .enumerate()
                .filter_map(|(index, row)| row.get(position).map(|v| (index, v)))
                .filter(|(_, v)| band.covers(v.min(CEILING)))
                .collect();
            let (first, last) = (hits.first()?.0, hits.last()?.0);

            let average = hits.iter().map(|(_, v)| v).sum::<f64>() / hits.len() as f64;
            let (days, from, to) = span(
                (first, rows[first].date.as_str()),
                (last, rows[last].date.as_str()),
            );
            Some(BandAnnotation {
                label: band.label,
                color: band.color,
                start: band.start,
                end: band.end,
                first_date: rows[first].date.clone(),
                last_date: rows[last].date.clone(),
                days,
                average,
                text: format!("{:.2} MCM ({} - {}) = {} days", average, from, to, days),
            })
        })
        .collect();
    Ok(annotations)
}
