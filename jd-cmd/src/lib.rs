//! Command implementations for the junction dashboard CLI.
//!
//! Each subcommand loads its datasets (CSV, or JSON records for `.json`
//! files), runs one of the `jd-data` computations and writes JSON or CSV to
//! a file or stdout.

use clap::Subcommand;
use jd_data::dependable::{DependableOptions, DEFAULT_DEPENDABILITY};
use jd_data::StatisticMode;

pub mod dependable;
pub mod io;
pub mod overview;
pub mod report;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the junctions of a dataset, in catalog order
    Junctions {
        /// Dataset file (CSV, or JSON records)
        #[arg(short, long)]
        dataset: String,
    },

    /// Summarise every junction of the dependable-yield dataset
    Overview {
        /// Dependable-yield dataset file
        #[arg(short, long)]
        dataset: String,

        /// Statistic: max, min or avg
        #[arg(short, long, default_value = "max")]
        mode: StatisticMode,

        /// Fail if any junction has no valid samples
        #[arg(long)]
        strict: bool,

        /// Output path for the JSON overview (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Capacity-band availability report for one junction
    Availability {
        /// Reduced-flow dataset file
        #[arg(short, long)]
        reduced: String,

        /// Base-flow dataset file
        #[arg(short, long)]
        base: String,

        #[arg(short, long)]
        junction: String,

        /// Output path for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Everything the dashboard shows, as one JSON document
    Dashboard {
        /// Dependable-yield dataset file
        #[arg(short = 'y', long = "yield")]
        yield_path: String,

        /// Reduced-flow dataset file
        #[arg(short, long)]
        reduced: String,

        /// Base-flow dataset file
        #[arg(short, long)]
        base: String,

        /// Statistic for the overview: max, min or avg
        #[arg(short, long, default_value = "max")]
        mode: StatisticMode,

        /// Junction for the yield line chart (first junction when omitted)
        #[arg(long)]
        yield_junction: Option<String>,

        /// Junction for the availability chart (first junction when omitted)
        #[arg(long)]
        flow_junction: Option<String>,

        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compute dependable yield from per-junction year sheets
    Dependable {
        /// Year sheet per junction; the file stem names the junction
        #[arg(short, long = "sheet", required = true)]
        sheets: Vec<String>,

        /// Share of years in which the yield must be met
        #[arg(long, default_value_t = DEFAULT_DEPENDABILITY)]
        dependability: f64,

        /// Use only the first N year columns of each sheet
        #[arg(long)]
        num_years: Option<usize>,

        /// Process only the first N dates
        #[arg(long)]
        num_days: Option<usize>,

        /// Output path for the yield dataset CSV
        #[arg(short, long)]
        output: String,

        /// Optional output path for per-junction statistics JSON
        #[arg(long)]
        details: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Junctions { dataset } => overview::run_junctions(&dataset),
        Command::Overview {
            dataset,
            mode,
            strict,
            output,
        } => overview::run_overview(&dataset, mode, strict, output.as_deref()),
        Command::Availability {
            reduced,
            base,
            junction,
            output,
        } => report::run_availability(&reduced, &base, &junction, output.as_deref()),
        Command::Dashboard {
            yield_path,
            reduced,
            base,
            mode,
            yield_junction,
            flow_junction,
            output,
        } => report::run_dashboard(report::DashboardArgs {
            yield_path: &yield_path,
            reduced_path: &reduced,
            base_path: &base,
            mode,
            yield_junction: yield_junction.as_deref(),
            flow_junction: flow_junction.as_deref(),
            output: output.as_deref(),
        }),
        Command::Dependable {
            sheets,
            dependability,
            num_years,
            num_days,
            output,
            details,
        } => {
            let options = DependableOptions {
                dependability,
                num_years,
                num_days,
            };
            dependable::run_dependable(&sheets, &options, &output, details.as_deref())
        }
    }
}
