//! Chart-ready computations over junction datasets.
//!
//! This crate turns loaded [`jd_dataset::Dataset`]s into what the dashboard
//! draws: per-junction summary statistics for the overview, the stacked
//! capacity-band decomposition of reduced flows, and the tables and periods
//! shown beside it. It also derives the dependable-yield dataset itself from
//! per-year history sheets.
//!
//! ```rust
//! use jd_data::availability::bucket;
//! use jd_data::summary::{summarize, StatisticMode};
//! use jd_dataset::Dataset;
//!
//! let reduced = Dataset::from_csv_str("Date,Nikhop\n01-Jun,1.7\n02-Jun,\n").unwrap();
//! let base = Dataset::from_csv_str("Date,Nikhop\n01-Jun,2.0\n02-Jun,2.5\n").unwrap();
//!
//! let availability = bucket(&reduced, &base, "Nikhop").unwrap();
//! assert_eq!(availability.bands.len(), 6);
//! assert_eq!(availability.reduced_flow.values, vec![Some(1.7), None]);
//! assert!((availability.axis_max - 3.5).abs() < 1e-9);
//!
//! let overview = summarize(&base, StatisticMode::Average);
//! assert_eq!(overview.get("Nikhop"), Some(2.25));
//! ```

pub mod annotations;
pub mod availability;
pub mod bands;
pub mod capacity;
pub mod dashboard;
pub mod dependable;
pub mod series;
pub mod spans;
pub mod summary;

pub use dashboard::{AvailabilityReport, DashboardSnapshot, DatasetBundle};
pub use summary::StatisticMode;
