//! Stacked capacity-band decomposition of one junction's flows.
//!
//! Bars and lines treat missing readings differently. A missing reduced-flow
//! value adds nothing to the stacked bar for that date, while the flow lines
//! show a gap there.

use crate::bands::{
    clamp_to_ceiling, decompose, floor_for_line, AXIS_PADDING, CAPACITY_BANDS, CEILING,
};
use jd_dataset::{Dataset, Error};
use serde::Serialize;

pub const REDUCED_FLOW_LABEL: &str = "Reduced Flow";
pub const BASE_FLOW_LABEL: &str = "Base Flow";
pub const CEILING_LABEL: &str = "Maximum Pickup";

/// One stacked-bar series: a capacity band's contribution per date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
    pub values: Vec<f64>,
}

/// A line overlaid on the bars. `None` is a break in the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
}

impl LineSeries {
    /// Largest plotted value, ignoring gaps.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .flatten()
            .copied()
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Everything the availability chart draws for one junction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    pub junction: String,
    pub dates: Vec<String>,
    /// In band order, bottom of the stack first.
    pub bands: Vec<BandSeries>,
    pub reduced_flow: LineSeries,
    pub base_flow: LineSeries,
    pub ceiling: LineSeries,
    pub axis_max: f64,
}

impl Availability {
    /// Height of the stacked bar at a date index.
    pub fn stack_height(&self, index: usize) -> f64 {
        self.bands
            .iter()
            .filter_map(|band| band.values.get(index))
            .sum()
    }
}

/// Decompose `junction`'s reduced flows into the capacity bands and prepare
/// the companion lines and the axis bound.
///
/// Row `i` of `reduced` and row `i` of `base` must describe the same date;
/// datasets of different lengths are rejected.
pub fn bucket(reduced: &Dataset, base: &Dataset, junction: &str) -> Result<Availability, Error> {
    reduced.ensure_aligned(base)?;
    let reduced_values = reduced.values_of(junction)?;
    let base_values = base.values_of(junction)?;

    let mut bands: Vec<BandSeries> = CAPACITY_BANDS
        .iter()
        .map(|band| BandSeries {
            label: band.label,
            color: band.color,
            start: band.start,
            end: band.end,
            values: Vec::with_capacity(reduced_values.len()),
        })
        .collect();
    for value in &reduced_values {
        let parts = decompose(clamp_to_ceiling(*value));
        for (series, part) in bands.iter_mut().zip(parts) {
            series.values.push(part);
        }
    }

    let reduced_flow = LineSeries {
        label: REDUCED_FLOW_LABEL,
        color: "#0066CC",
        values: reduced_values.iter().map(|v| floor_for_line(*v)).collect(),
    };
    let base_flow = LineSeries {
        label: BASE_FLOW_LABEL,
        color: "#FF6600",
        values: base_values.iter().map(|v| floor_for_line(*v)).collect(),
    };
    let ceiling = LineSeries {
        label: CEILING_LABEL,
        color: "#FF6F00",
        values: vec![Some(CEILING); reduced.len()],
    };

    let axis_max = [reduced_flow.max(), base_flow.max()]
        .into_iter()
        .flatten()
        .fold(CEILING, f64::max)
        + AXIS_PADDING;

    log::debug!(
        "availability: {} over {} dates, axis max {}",
        junction,
        reduced.len(),
        axis_max
    );

    Ok(Availability {
        junction: junction.to_string(),
        dates: reduced.dates_of(),
        bands,
        reduced_flow,
        base_flow,
        ceiling,
        axis_max,
    })
}
