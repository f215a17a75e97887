//! The three datasets behind the dashboard, and the per-junction views
//! derived from them.

use crate::annotations::{band_annotations, BandAnnotation};
use crate::availability::{bucket, Availability};
use crate::capacity::{capacity_table, CapacityRow};
use crate::series::{junction_series, JunctionSeries};
use crate::spans::{above_ceiling_spans, threshold_periods, DateSpan, ThresholdPeriods};
use crate::summary::{summarize, Overview, StatisticMode};
use jd_dataset::{Dataset, Error};
use serde::Serialize;

/// Dependable yield, reduced flow and base flow, loaded once.
///
/// Reduced and base flow are read positionally against each other and must
/// have the same number of dates. The yield dataset stands on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBundle {
    dependable_yield: Dataset,
    reduced_flow: Dataset,
    base_flow: Dataset,
}

impl DatasetBundle {
    pub fn new(
        dependable_yield: Dataset,
        reduced_flow: Dataset,
        base_flow: Dataset,
    ) -> Result<Self, Error> {
        reduced_flow.ensure_aligned(&base_flow)?;
        log::info!(
            "dashboard: yield {}x{}, reduced {}x{}, base {}x{}",
            dependable_yield.len(),
            dependable_yield.junctions().len(),
            reduced_flow.len(),
            reduced_flow.junctions().len(),
            base_flow.len(),
            base_flow.junctions().len()
        );
        Ok(DatasetBundle {
            dependable_yield,
            reduced_flow,
            base_flow,
        })
    }

    pub fn dependable_yield(&self) -> &Dataset {
        &self.dependable_yield
    }

    pub fn reduced_flow(&self) -> &Dataset {
        &self.reduced_flow
    }

    pub fn base_flow(&self) -> &Dataset {
        &self.base_flow
    }

    /// Junctions selectable in the availability view: those present in both
    /// flow datasets, in reduced-flow catalog order.
    pub fn flow_junctions(&self) -> Vec<String> {
        self.reduced_flow
            .junctions()
            .iter()
            .filter(|j| self.base_flow.contains(j))
            .cloned()
            .collect()
    }

    pub fn overview(&self, mode: StatisticMode) -> Overview {
        summarize(&self.dependable_yield, mode)
    }

    pub fn yield_series(&self, junction: &str) -> Result<JunctionSeries, Error> {
        junction_series(&self.dependable_yield, junction)
    }

    pub fn availability(&self, junction: &str) -> Result<Availability, Error> {
        bucket(&self.reduced_flow, &self.base_flow, junction)
    }

    pub fn availability_report(&self, junction: &str) -> Result<AvailabilityReport, Error> {
        availability_report(&self.reduced_flow, &self.base_flow, junction)
    }

    /// Everything the dashboard shows at once. Selections default to the
    /// first junction of the relevant catalog.
    pub fn snapshot(
        &self,
        mode: StatisticMode,
        yield_junction: Option<&str>,
        flow_junction: Option<&str>,
    ) -> Result<DashboardSnapshot, Error> {
        let yield_junction = yield_junction
            .map(str::to_string)
            .or_else(|| self.dependable_yield.junctions().first().cloned());
        let flow_junction = flow_junction
            .map(str::to_string)
            .or_else(|| self.flow_junctions().into_iter().next());

        let series = yield_junction
            .as_deref()
            .map(|j| self.yield_series(j))
            .transpose()?;
        let availability = flow_junction
            .as_deref()
            .map(|j| self.availability_report(j))
            .transpose()?;

        Ok(DashboardSnapshot {
            overview: self.overview(mode),
            series,
            availability,
        })
    }
}

/// The availability chart, its band annotations, and the tables and periods
/// shown beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    pub availability: Availability,
    pub band_annotations: Vec<BandAnnotation>,
    pub capacity_table: Vec<CapacityRow>,
    pub above_ceiling: Vec<DateSpan>,
    pub threshold_periods: Vec<ThresholdPeriods>,
}

pub fn availability_report(
    reduced: &Dataset,
    base: &Dataset,
    junction: &str,
) -> Result<AvailabilityReport, Error> {
    Ok(AvailabilityReport {
        availability: bucket(reduced, base, junction)?,
        band_annotations: band_annotations(reduced, junction)?,
        capacity_table: capacity_table(reduced, junction)?,
        above_ceiling: above_ceiling_spans(reduced, junction)?,
        threshold_periods: threshold_periods(reduced, junction)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub overview: Overview,
    pub series: Option<JunctionSeries>,
    pub availability: Option<AvailabilityReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_dataset::Row;

    fn dataset(junctions: &[&str], rows: &[(&str, Vec<Option<f64>>)]) -> Dataset {
        Dataset::from_rows(
            junctions.iter().map(|j| j.to_string()).collect(),
            rows.iter()
                .map(|(date, values)| Row::new(*date, values.clone()))
                .collect(),
        )
        .unwrap()
    }

    fn bundle() -> DatasetBundle {
        let dependable_yield = dataset(
            &["Nikhop", "Dhadhar"],
            &[
                ("01-Jun", vec![Some(1.0), Some(0.2)]),
                ("02-Jun", vec![Some(3.0), None]),
                ("03-Jun", vec![None, Some(0.4)]),
                ("04-Jun", vec![Some(2.0), Some(0.6)]),
                ("05-Jun", vec![Some(2.0), Some(0.6)]),
            ],
        );
        let reduced = dataset(
            &["Dhadhar", "Nikhop"],
            &[
                ("01-Jun", vec![Some(0.7), Some(3.4)]),
                ("02-Jun", vec![Some(1.2), Some(1.7)]),
            ],
        );
        let base = dataset(
            &["Nikhop"],
            &[("01-Jun", vec![Some(4.0)]), ("02-Jun", vec![Some(2.0)])],
        );
        DatasetBundle::new(dependable_yield, reduced, base).unwrap()
    }

    #[test]
    fn yield_may_cover_a_different_date_range() {
        let bundle = bundle();
        assert_eq!(bundle.dependable_yield().len(), 5);
        assert_eq!(bundle.reduced_flow().len(), 2);
    }

    #[test]
    fn flow_datasets_must_align() {
        let reduced = dataset(&["Nikhop"], &[("01-Jun", vec![Some(1.0)])]);
        let base = dataset(&["Nikhop"], &[]);
        assert_eq!(
            DatasetBundle::new(Dataset::default(), reduced, base),
            Err(Error::DatasetLengthMismatch {
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn flow_junctions_need_both_datasets() {
        assert_eq!(bundle().flow_junctions(), vec!["Nikhop".to_string()]);
    }

    #[test]
    fn report_combines_chart_and_tables() {
        let report = bundle().availability_report("Nikhop").unwrap();
        assert_eq!(report.availability.dates, vec!["01-Jun", "02-Jun"]);
        assert_eq!(report.capacity_table.len(), 6);
        // 3.4 caps into the top band, 1.7 sits in 1.5-2.0
        let bands: Vec<&str> = report.band_annotations.iter().map(|a| a.label).collect();
        assert_eq!(bands, vec!["1.5-2.0 MCM", "2.5-3.0 MCM"]);
        assert_eq!(report.capacity_table[0].days, 1);
        assert_eq!(report.above_ceiling.len(), 1);
        assert_eq!(report.above_ceiling[0].start_date, "01-Jun");
        assert_eq!(report.threshold_periods.len(), 30);
    }

    #[test]
    fn report_for_junction_missing_from_base_fails() {
        assert_eq!(
            bundle().availability_report("Dhadhar"),
            Err(Error::UnknownJunction("Dhadhar".to_string()))
        );
    }

    #[test]
    fn snapshot_defaults_to_first_junctions() {
        let snapshot = bundle().snapshot(StatisticMode::Max, None, None).unwrap();
        assert_eq!(snapshot.overview.get("Nikhop"), Some(3.0));
        assert_eq!(snapshot.series.unwrap().junction, "Nikhop");
        assert_eq!(snapshot.availability.unwrap().availability.junction, "Nikhop");
    }

    #[test]
    fn snapshot_honours_selection() {
        let snapshot = bundle()
            .snapshot(StatisticMode::Average, Some("Dhadhar"), Some("Nikhop"))
            .unwrap();
        let series = snapshot.series.unwrap();
        assert_eq!(series.junction, "Dhadhar");
        assert_eq!(series.values[1], None);
        assert!(bundle()
            .snapshot(StatisticMode::Average, Some("Karjan"), None)
            .is_err());
    }

    #[test]
    fn bundle_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DatasetBundle>();
        assert_send_sync::<DashboardSnapshot>();
    }

    #[test]
    fn empty_bundle_has_no_selections() {
        let snapshot = DatasetBundle::new(Dataset::default(), Dataset::default(), Dataset::default())
            .unwrap()
            .snapshot(StatisticMode::Min, None, None)
            .unwrap();
        assert!(snapshot.overview.entries.is_empty());
        assert!(snapshot.series.is_none());
        assert!(snapshot.availability.is_none());
    }
}
