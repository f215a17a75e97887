use crate::summary::StatisticMode;
use jd_dataset::{Dataset, Error};
use serde::Serialize;

/// A single junction's time series, for the individual-junction line chart.
/// Missing readings stay `None` so the chart shows a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunctionSeries {
    pub junction: String,
    pub dates: Vec<String>,
    pub values: Vec<Option<f64>>,
    /// Range box printed on the chart; `None` when there are no readings.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

pub fn junction_series(dataset: &Dataset, junction: &str) -> Result<JunctionSeries, Error> {
    let values = dataset.values_of(junction)?;
    let samples: Vec<f64> = values.iter().flatten().copied().collect();
    Ok(JunctionSeries {
        junction: junction.to_string(),
        dates: dataset.dates_of(),
        min: StatisticMode::Min.reduce(&samples),
        max: StatisticMode::Max.reduce(&samples),
        mean: StatisticMode::Average.reduce(&samples),
        values,
    })
}
