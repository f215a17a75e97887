//! In-memory time series datasets keyed by date and junction.
//!
//! A [`Dataset`] is an ordered sequence of rows. Each row carries a date label
//! and one numeric-or-absent value per junction in the dataset's catalog. The
//! catalog is fixed when the dataset is built, so every row is aligned to it.
//!
//! The dashboard holds three of these at once (dependable yield, reduced
//! flow, base flow). They are loaded once from CSV or JSON and only read
//! afterwards.
//!
//! # Usage
//!
//! ```rust
//! use jd_dataset::Dataset;
//!
//! let csv = "Date,Nikhop,Dhadhar\n01-Jun,1.5,\n02-Jun,2.0,0.4\n";
//! let dataset = Dataset::from_csv_str(csv).unwrap();
//!
//! assert_eq!(dataset.junctions(), ["Nikhop", "Dhadhar"]);
//! assert_eq!(dataset.dates_of(), ["01-Jun", "02-Jun"]);
//! assert_eq!(dataset.values_of("Dhadhar").unwrap(), vec![None, Some(0.4)]);
//! assert!(dataset.values_of("Unknown").is_err());
//! ```

pub mod dataset;
pub mod error;
mod loader;

pub use dataset::{Dataset, Row};
pub use error::{Error, LoadError};

/// Header of the date column in dashboard sheets (matched case-insensitively).
pub const DATE_COLUMN: &str = "Date";
