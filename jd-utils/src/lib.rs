//! Shared utility functions for the junction dashboard crates.

/// Date label utility functions.
///
/// Dashboard datasets carry their dates as plain labels. Depending on where
/// the sheet came from these are ISO dates ("2024-06-01"), timestamps
/// ("2024-06-01T00:00:00"), compact dates ("20240601") or bare day-month
/// labels ("01-Jun").
pub mod dates {
    use chrono::{Datelike, NaiveDate};
    use std::fmt;

    /// Year used to anchor bare day-month labels such as "01-Jun".
    /// A leap year, so "29-Feb" still parses.
    pub const LABEL_ANCHOR_YEAR: i32 = 2000;

    /// Parse any of the date label shapes found in dashboard sheets.
    ///
    /// Returns `None` when the label matches none of them.
    pub fn parse_label(label: &str) -> Option<NaiveDate> {
        let label = label.trim();
        // drop a time component ("2024-06-01T00:00:00", "2024-06-01 00:00:00")
        let date_part = label.split(['T', ' ']).next().unwrap_or(label);

        for format in ["%Y-%m-%d", "%Y%m%d", "%d-%b-%Y", "%d/%m/%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
                return Some(date);
            }
        }
        let anchored = format!("{date_part}-{LABEL_ANCHOR_YEAR}");
        NaiveDate::parse_from_str(&anchored, "%d-%b-%Y").ok()
    }

    /// Which third of the month a day falls in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MonthPart {
        Early,
        Mid,
        Late,
    }

    impl MonthPart {
        /// Days 1-10 are early, 11-20 mid, the rest late.
        pub fn of(date: &NaiveDate) -> Self {
            match date.day() {
                1..=10 => MonthPart::Early,
                11..=20 => MonthPart::Mid,
                _ => MonthPart::Late,
            }
        }
    }

    impl fmt::Display for MonthPart {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                MonthPart::Early => write!(f, "Early"),
                MonthPart::Mid => write!(f, "Mid"),
                MonthPart::Late => write!(f, "Late"),
            }
        }
    }

    /// Describe a date by its part of the month, e.g. "Mid Jun".
    pub fn describe_period(date: &NaiveDate) -> String {
        format!("{} {}", MonthPart::of(date), date.format("%b"))
    }

    /// Describe the period between two dates, e.g. "Early Jun – Late Sep".
    ///
    /// Collapses to a single description when both ends fall in the same
    /// part of the same month.
    pub fn describe_range(first: &NaiveDate, last: &NaiveDate) -> String {
        let start = describe_period(first);
        let end = describe_period(last);
        if start == end {
            start
        } else {
            format!("{start} – {end}")
        }
    }

    /// Calendar days from `first` to `last`, both included.
    pub fn days_inclusive(first: &NaiveDate, last: &NaiveDate) -> i64 {
        (*last - *first).num_days() + 1
    }

    /// Day with its English ordinal suffix and the abbreviated month, e.g. "21st Jun".
    pub fn format_ordinal_day(date: &NaiveDate) -> String {
        let day = date.day();
        let suffix = match day {
            1 | 21 | 31 => "st",
            2 | 22 => "nd",
            3 | 23 => "rd",
            _ => "th",
        };
        format!("{}{} {}", day, suffix, date.format("%b"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_parse_label_shapes() {
            let jun1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            assert_eq!(parse_label("2024-06-01"), Some(jun1));
            assert_eq!(parse_label("2024-06-01T00:00:00"), Some(jun1));
            assert_eq!(parse_label("2024-06-01 00:00:00"), Some(jun1));
            assert_eq!(parse_label("20240601"), Some(jun1));
            assert_eq!(parse_label("01-Jun-2024"), Some(jun1));
            assert_eq!(parse_label(" 01/06/2024 "), Some(jun1));
        }

        #[test]
        fn test_parse_day_month_label() {
            let parsed = parse_label("15-Oct").unwrap();
            assert_eq!(parsed.year(), LABEL_ANCHOR_YEAR);
            assert_eq!(parsed.month(), 10);
            assert_eq!(parsed.day(), 15);

            // Anchored to a leap year
            assert!(parse_label("29-Feb").is_some());
        }

        #[test]
        fn test_parse_label_rejects_garbage() {
            assert!(parse_label("").is_none());
            assert!(parse_label("not a date").is_none());
            assert!(parse_label("2024-13-01").is_none());
        }

        #[test]
        fn test_month_part_boundaries() {
            let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
            assert_eq!(MonthPart::of(&day(1)), MonthPart::Early);
            assert_eq!(MonthPart::of(&day(10)), MonthPart::Early);
            assert_eq!(MonthPart::of(&day(11)), MonthPart::Mid);
            assert_eq!(MonthPart::of(&day(20)), MonthPart::Mid);
            assert_eq!(MonthPart::of(&day(21)), MonthPart::Late);
            assert_eq!(MonthPart::of(&day(30)), MonthPart::Late);
        }

        #[test]
        fn test_describe_range() {
            let jun3 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
            let jun8 = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
            let sep25 = NaiveDate::from_ymd_opt(2024, 9, 25).unwrap();
            assert_eq!(describe_range(&jun3, &jun8), "Early Jun");
            assert_eq!(describe_range(&jun3, &sep25), "Early Jun – Late Sep");
        }

        #[test]
        fn test_days_inclusive() {
            let jun1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            let jun30 = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
            assert_eq!(days_inclusive(&jun1, &jun30), 30);
            assert_eq!(days_inclusive(&jun1, &jun1), 1);
        }

        #[test]
        fn test_format_ordinal_day() {
            let day = |d| NaiveDate::from_ymd_opt(2024, 7, d).unwrap();
            assert_eq!(format_ordinal_day(&day(1)), "1st Jul");
            assert_eq!(format_ordinal_day(&day(2)), "2nd Jul");
            assert_eq!(format_ordinal_day(&day(3)), "3rd Jul");
            assert_eq!(format_ordinal_day(&day(11)), "11th Jul");
            assert_eq!(format_ordinal_day(&day(12)), "12th Jul");
            assert_eq!(format_ordinal_day(&day(22)), "22nd Jul");
            assert_eq!(format_ordinal_day(&day(31)), "31st Jul");
        }

        #[test]
        fn test_describe_period() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            assert_eq!(describe_period(&date), "Mid Jun");
        }
    }
}
