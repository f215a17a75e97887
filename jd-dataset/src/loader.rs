//! CSV and JSON loading for dashboard datasets.
//!
//! # Formats
//!
//! - **CSV** (has headers): `Date,<junction>,<junction>,...`, one row per date.
//!   This is the shape of the "Reduced Flows" / "Base Flows" sheets and of the
//!   per-junction year sheets.
//! - **JSON**: an array of records `{"Date": "...", "<junction>": 1.23, ...}`,
//!   the shape of the dashboard's `data.json`. The catalog is taken from the
//!   first record's keys, in document order.
//!
//! In both formats empty cells, `null`, `NaN`, `---` and any other text that
//! is not a finite number load as absent values.

use crate::dataset::{Dataset, Row};
use crate::error::LoadError;
use crate::DATE_COLUMN;
use serde_json::Value;
use std::collections::HashSet;
use std::io;

/// Parse a single cell into a finite number, or absent.
fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn json_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_cell(s),
        _ => None,
    }
}

fn json_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_date_column(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(DATE_COLUMN)
}

impl Dataset {
    /// Load a dataset from CSV with a header row.
    ///
    /// # Example CSV
    /// ```text
    /// Date,Nikhop,Dhadhar
    /// 01-Jun,1.52,0.31
    /// 02-Jun,,0.29
    /// ```
    pub fn from_csv_str(csv_data: &str) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(LoadError::EmptyHeader);
        }
        let date_index = headers
            .iter()
            .position(is_date_column)
            .ok_or(LoadError::MissingDateColumn)?;

        // (csv column, junction name) for every non-date, non-blank header
        let mut columns: Vec<(usize, String)> = Vec::new();
        for (index, name) in headers.iter().enumerate() {
            let name = name.trim();
            if index == date_index {
                continue;
            }
            if name.is_empty() {
                log::warn!("loader: ignoring unnamed column {}", index);
                continue;
            }
            columns.push((index, name.to_string()));
        }

        let mut rows = Vec::new();
        let mut absent = 0u32;
        for (row_index, result) in rdr.records().enumerate() {
            let record = result?;
            if record.iter().all(|field| field.trim().is_empty()) {
                log::warn!("loader: skipping blank row {}", row_index);
                continue;
            }
            let date = record.get(date_index).unwrap_or("").trim();
            if date.is_empty() {
                return Err(LoadError::MissingDate(row_index));
            }
            let values: Vec<Option<f64>> = columns
                .iter()
                .map(|(index, _)| record.get(*index).and_then(parse_cell))
                .collect();
            absent += values.iter().filter(|v| v.is_none()).count() as u32;
            rows.push(Row::new(date, values));
        }

        let junctions = columns.into_iter().map(|(_, name)| name).collect();
        let dataset = Dataset::from_rows(junctions, rows)?;
        log::info!(
            "loader: loaded {} rows x {} junctions from csv, {} absent cells",
            dataset.len(),
            dataset.junctions().len(),
            absent
        );
        Ok(dataset)
    }

    /// Load a dataset from a JSON array of records.
    ///
    /// A later record that lacks one of the first record's junctions gets an
    /// absent value there; keys that are not in the catalog are ignored.
    ///
    /// # Example JSON
    /// ```text
    /// [{"Date": "2024-06-01", "Nikhop": 1.52, "Dhadhar": null}]
    /// ```
    pub fn from_json_str(json_data: &str) -> Result<Self, LoadError> {
        let parsed: Value = serde_json::from_str(json_data)?;
        let records = parsed.as_array().ok_or(LoadError::NotAnArray)?;

        let junctions: Vec<String> = match records.first() {
            Some(first) => first
                .as_object()
                .ok_or(LoadError::NotARecord(0))?
                .keys()
                .filter(|key| !is_date_column(key))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let mut ignored: HashSet<&str> = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or(LoadError::NotARecord(index))?;
            let date = object
                .iter()
                .find(|(key, _)| is_date_column(key))
                .and_then(|(_, value)| json_date(value))
                .ok_or(LoadError::MissingDate(index))?;

            let values = junctions
                .iter()
                .map(|junction| object.get(junction).and_then(json_value))
                .collect();

            for key in object.keys() {
                if !is_date_column(key)
                    && !junctions.contains(key)
                    && ignored.insert(key.as_str())
                {
                    log::warn!("loader: record {} has junction {} outside the catalog, ignoring it", index, key);
                }
            }
            rows.push(Row::new(date, values));
        }

        let dataset = Dataset::from_rows(junctions, rows)?;
        log::info!(
            "loader: loaded {} rows x {} junctions from json",
            dataset.len(),
            dataset.junctions().len()
        );
        Ok(dataset)
    }

    /// Write the dataset back out as CSV with a `Date` header; absent values
    /// become empty cells.
    pub fn to_csv_string(&self) -> Result<String, LoadError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(self.junctions().len() + 1);
        header.push(DATE_COLUMN);
        header.extend(self.junctions().iter().map(String::as_str));
        wtr.write_record(&header)?;

        for row in self.rows() {
            let mut record = Vec::with_capacity(row.values().len() + 1);
            record.push(row.date.clone());
            record.extend(
                row.values()
                    .iter()
                    .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes).map_err(|e| LoadError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dataset, LoadError};

    #[test]
    fn load_csv_dataset() {
        let csv = "\
Date,Nikhop,Dhadhar,Karjan
01-Jun,1.52,0.31,2.8
02-Jun,1.61,,3.4
03-Jun,NaN,---,ART
";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.junctions(), ["Nikhop", "Dhadhar", "Karjan"]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(
            dataset.values_of("Dhadhar").unwrap(),
            vec![Some(0.31), None, None]
        );
        assert_eq!(
            dataset.values_of("Karjan").unwrap(),
            vec![Some(2.8), Some(3.4), None]
        );
        assert_eq!(dataset.values_of("Nikhop").unwrap()[2], None);
    }

    #[test]
    fn load_csv_date_column_anywhere() {
        let csv = "\
Nikhop,date,Dhadhar
1.0,01-Jun,2.0
";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.junctions(), ["Nikhop", "Dhadhar"]);
        assert_eq!(dataset.dates_of(), vec!["01-Jun"]);
        assert_eq!(dataset.values_of("Dhadhar").unwrap(), vec![Some(2.0)]);
    }

    #[test]
    fn load_csv_pads_short_rows() {
        let csv = "\
Date,A,B
01-Jun,1.0
";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.values_of("B").unwrap(), vec![None]);
    }

    #[test]
    fn load_csv_without_date_column() {
        let csv = "Station,A\nX,1.0\n";
        assert!(matches!(
            Dataset::from_csv_str(csv),
            Err(LoadError::MissingDateColumn)
        ));
    }

    #[test]
    fn load_csv_duplicate_junction() {
        let csv = "Date,A,A\n01-Jun,1.0,2.0\n";
        assert!(matches!(
            Dataset::from_csv_str(csv),
            Err(LoadError::DuplicateJunction(j)) if j == "A"
        ));
    }

    #[test]
    fn load_csv_row_without_date() {
        let csv = "Date,A\n01-Jun,1.0\n,2.0\n";
        assert!(matches!(
            Dataset::from_csv_str(csv),
            Err(LoadError::MissingDate(1))
        ));
    }

    #[test]
    fn load_csv_skips_blank_rows() {
        let csv = "Date,A,B\n01-Jun,1.0,2.0\n,,\n02-Jun,1.5,\n , ,\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.dates_of(), vec!["01-Jun", "02-Jun"]);
        assert_eq!(dataset.values_of("A").unwrap(), vec![Some(1.0), Some(1.5)]);
    }

    #[test]
    fn load_json_dataset_keeps_key_order() {
        let json = r#"[
            {"Date": "2024-06-01", "Zeta": 1.0, "Alpha": null, "Mid": "0.5"},
            {"Date": "2024-06-02", "Zeta": 2.0, "Alpha": 3.0, "Mid": "n/a"}
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.junctions(), ["Zeta", "Alpha", "Mid"]);
        assert_eq!(dataset.values_of("Alpha").unwrap(), vec![None, Some(3.0)]);
        assert_eq!(dataset.values_of("Mid").unwrap(), vec![Some(0.5), None]);
    }

    #[test]
    fn load_json_fixed_catalog() {
        let json = r#"[
            {"Date": "2024-06-01", "A": 1.0, "B": 2.0},
            {"Date": "2024-06-02", "A": 1.5, "C": 9.0}
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.junctions(), ["A", "B"]);
        assert_eq!(dataset.values_of("B").unwrap(), vec![Some(2.0), None]);
        assert!(dataset.values_of("C").is_err());
    }

    #[test]
    fn load_json_empty_array() {
        let dataset = Dataset::from_json_str("[]").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.junctions().is_empty());
    }

    #[test]
    fn load_json_shape_errors() {
        assert!(matches!(
            Dataset::from_json_str(r#"{"Date": "x"}"#),
            Err(LoadError::NotAnArray)
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"[{"Date": "x", "A": 1}, 5]"#),
            Err(LoadError::NotARecord(1))
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"[{"A": 1}]"#),
            Err(LoadError::MissingDate(0))
        ));
        assert!(matches!(
            Dataset::from_json_str("not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn csv_output_matches_input_shape() {
        let csv = "\
Date,Nikhop,Dhadhar
01-Jun,1.5,
02-Jun,2.25,0.4
";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.to_csv_string().unwrap(), csv);
    }
}
