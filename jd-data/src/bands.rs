//! The fixed capacity band table and the clamp/decompose policy built on it.

use serde::Serialize;

/// Maximum pickup capacity in MCM.
pub const CEILING: f64 = 3.0;

/// Headroom added above the tallest series when sizing the vertical axis.
pub const AXIS_PADDING: f64 = 0.5;

/// Number of rows in the band table.
pub const BAND_COUNT: usize = 6;

/// A half-open interval `[start, end)` of the 0-3.0 MCM operating range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityBand {
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
    pub label: &'static str,
}

/// Capacity bands in stacking order, light (low flow) to dark (high flow).
pub static CAPACITY_BANDS: [CapacityBand; BAND_COUNT] = [
    CapacityBand { start: 0.0, end: 0.5, color: "#ADD8E6", label: "0.0-0.5 MCM" },
    CapacityBand { start: 0.5, end: 1.0, color: "#87CEEB", label: "0.5-1.0 MCM" },
    CapacityBand { start: 1.0, end: 1.5, color: "#1E90FF", label: "1.0-1.5 MCM" },
    CapacityBand { start: 1.5, end: 2.0, color: "#4169E1", label: "1.5-2.0 MCM" },
    CapacityBand { start: 2.0, end: 2.5, color: "#0000CD", label: "2.0-2.5 MCM" },
    CapacityBand { start: 2.5, end: 3.0, color: "#00008B", label: "2.5-3.0 MCM" },
];

impl CapacityBand {
    /// The part of an already clamped value that falls inside this band.
    pub fn contribution(&self, clamped: f64) -> f64 {
        (clamped.min(self.end) - self.start).max(0.0)
    }

    /// Whether a capped level lies in `[start, end)`. The top band is closed
    /// so that a flow at the ceiling belongs to it.
    pub fn covers(&self, capped: f64) -> bool {
        self.start <= capped && (capped < self.end || (self.end == CEILING && capped <= CEILING))
    }
}

/// Bar input for one date: absent readings count as zero, then the value is
/// floored at zero and capped at the ceiling.
pub fn clamp_to_ceiling(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, CEILING),
        _ => 0.0,
    }
}

/// Line input for one date: absent readings stay absent (a gap), present
/// ones are floored at zero but never capped.
pub fn floor_for_line(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v.max(0.0))
}

/// Split a clamped value across the band table. The contributions sum back
/// to the clamped value.
pub fn decompose(clamped: f64) -> [f64; BAND_COUNT] {
    CAPACITY_BANDS.map(|band| band.contribution(clamped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_contributions(actual: [f64; 6], expected: [f64; 6]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn band_table_covers_zero_to_ceiling() {
        assert_eq!(CAPACITY_BANDS[0].start, 0.0);
        assert_eq!(CAPACITY_BANDS[CAPACITY_BANDS.len() - 1].end, CEILING);
        for pair in CAPACITY_BANDS.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!((pair[0].end - pair[0].start - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn decompose_partial_band() {
        let parts = decompose(clamp_to_ceiling(Some(1.7)));
        assert_contributions(parts, [0.5, 0.5, 0.5, 0.2, 0.0, 0.0]);
        assert!((parts.iter().sum::<f64>() - 1.7).abs() < EPSILON);
    }

    #[test]
    fn decompose_above_ceiling() {
        let clamped = clamp_to_ceiling(Some(4.2));
        assert_eq!(clamped, CEILING);
        let parts = decompose(clamped);
        assert_contributions(parts, [0.5; 6]);
        assert!((parts.iter().sum::<f64>() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn decompose_sums_to_clamped_value() {
        for tenths in -10..=45 {
            let raw = tenths as f64 / 10.0 + 0.03;
            let clamped = clamp_to_ceiling(Some(raw));
            let total: f64 = decompose(clamped).iter().sum();
            assert!((total - clamped).abs() < EPSILON, "raw {raw}");
        }
    }

    #[test]
    fn clamp_is_idempotent() {
        for raw in [-2.0, 0.0, 0.4, 1.7, 3.0, 4.2, 100.0] {
            let once = clamp_to_ceiling(Some(raw));
            assert_eq!(clamp_to_ceiling(Some(once)), once);
        }
    }

    #[test]
    fn clamp_treats_missing_and_negative_as_zero() {
        assert_eq!(clamp_to_ceiling(None), 0.0);
        assert_eq!(clamp_to_ceiling(Some(f64::NAN)), 0.0);
        assert_eq!(clamp_to_ceiling(Some(-0.8)), 0.0);
        assert_eq!(decompose(0.0), [0.0; 6]);
    }

    #[test]
    fn bands_cover_half_open_ranges() {
        assert!(CAPACITY_BANDS[0].covers(0.0));
        assert!(!CAPACITY_BANDS[0].covers(0.5));
        assert!(CAPACITY_BANDS[1].covers(0.5));
        assert!(CAPACITY_BANDS[5].covers(CEILING));
        assert!(!CAPACITY_BANDS[5].covers(3.2));
        assert!(CAPACITY_BANDS.iter().all(|band| !band.covers(-0.1)));
    }

    #[test]
    fn line_policy_keeps_gaps_and_high_values() {
        assert_eq!(floor_for_line(None), None);
        assert_eq!(floor_for_line(Some(f64::NAN)), None);
        assert_eq!(floor_for_line(Some(-0.3)), Some(0.0));
        assert_eq!(floor_for_line(Some(4.2)), Some(4.2));
    }
}
