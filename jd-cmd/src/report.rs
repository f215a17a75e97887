//! Availability report and full dashboard snapshot.

use crate::io::{load_dataset, to_json, write_output};
use jd_data::dashboard::availability_report;
use jd_data::{DatasetBundle, StatisticMode};
use log::info;

pub fn run_availability(
    reduced_path: &str,
    base_path: &str,
    junction: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let reduced = load_dataset(reduced_path)?;
    let base = load_dataset(base_path)?;

    let report = availability_report(&reduced, &base, junction)?;
    info!(
        "Availability for {}: {} dates, {} above-ceiling periods, axis max {}",
        junction,
        report.availability.dates.len(),
        report.above_ceiling.len(),
        report.availability.axis_max
    );
    write_output(output, &to_json(&report)?)
}

pub struct DashboardArgs<'a> {
    pub yield_path: &'a str,
    pub reduced_path: &'a str,
    pub base_path: &'a str,
    pub mode: StatisticMode,
    pub yield_junction: Option<&'a str>,
    pub flow_junction: Option<&'a str>,
    pub output: Option<&'a str>,
}

pub fn run_dashboard(args: DashboardArgs<'_>) -> anyhow::Result<()> {
    let bundle = DatasetBundle::new(
        load_dataset(args.yield_path)?,
        load_dataset(args.reduced_path)?,
        load_dataset(args.base_path)?,
    )?;
    let snapshot = bundle.snapshot(args.mode, args.yield_junction, args.flow_junction)?;
    write_output(args.output, &to_json(&snapshot)?)
}
