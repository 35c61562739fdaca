//! UTC calendar date/time with sub-second precision.
//!
//! `UtcTime` is the canonical user-facing time representation: parsing
//! produces one, presentation consumes one. Conversion to/from JD TDB
//! goes through the embedded leap-second chain in [`crate::scales`].

use crate::julian::{calendar_to_jd, jd_to_calendar, jd_to_tdb_seconds, tdb_seconds_to_jd};
use crate::scales::{tdb_to_utc, utc_to_tdb};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Convert to a Julian Date in TDB.
    pub fn to_jd_tdb(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        let jd_utc = calendar_to_jd(self.year, self.month, day_frac);
        let utc_s = jd_to_tdb_seconds(jd_utc);
        tdb_seconds_to_jd(utc_to_tdb(utc_s))
    }

    /// Convert from a Julian Date in TDB.
    pub fn from_jd_tdb(jd_tdb: f64) -> Self {
        let utc_s = tdb_to_utc(jd_to_tdb_seconds(jd_tdb));
        Self::from_jd_utc(tdb_seconds_to_jd(utc_s))
    }

    /// Split a UTC Julian Date into calendar fields.
    fn from_jd_utc(jd_utc: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd_utc);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * 86_400.0;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Round to the nearest minute, carrying across hour/day/month
    /// boundaries.
    pub fn rounded_to_minute(&self) -> Self {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        let jd_utc = calendar_to_jd(self.year, self.month, day_frac);
        // Round the whole timestamp to a minute count, then re-split.
        let rounded = (jd_utc * 1440.0).round() / 1440.0;
        let mut t = Self::from_jd_utc(rounded);
        // Snap float residue from the division.
        t.second = 0.0;
        t
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, whole
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_fields() {
        let t = UtcTime::new(2025, 9, 8, 18, 9, 12.5);
        assert_eq!(t.year, 2025);
        assert_eq!(t.month, 9);
        assert_eq!(t.day, 8);
        assert_eq!(t.hour, 18);
        assert_eq!(t.minute, 9);
        assert!((t.second - 12.5).abs() < 1e-12);
    }

    #[test]
    fn display_iso_z() {
        let t = UtcTime::new(2025, 10, 28, 20, 5, 0.0);
        assert_eq!(t.to_string(), "2025-10-28T20:05:00Z");
    }

    #[test]
    fn jd_roundtrip() {
        let t = UtcTime::new(2025, 9, 18, 15, 30, 0.0);
        let back = UtcTime::from_jd_tdb(t.to_jd_tdb());
        assert_eq!((back.year, back.month, back.day), (2025, 9, 18));
        assert_eq!((back.hour, back.minute), (15, 30));
        assert!(back.second.abs() < 1e-3);
    }

    #[test]
    fn tdb_is_ahead_of_utc() {
        // 2025-01-01T00:00 UTC is ~69.184 s later in TDB.
        let t = UtcTime::new(2025, 1, 1, 0, 0, 0.0);
        let jd = t.to_jd_tdb();
        let expected = calendar_to_jd(2025, 1, 1.0) + 69.184 / 86_400.0;
        assert!((jd - expected).abs() < 0.01 / 86_400.0);
    }

    #[test]
    fn rounding_up() {
        let t = UtcTime::new(2025, 9, 8, 18, 8, 41.0);
        let r = t.rounded_to_minute();
        assert_eq!((r.hour, r.minute), (18, 9));
        assert_eq!(r.second, 0.0);
    }

    #[test]
    fn rounding_down() {
        let t = UtcTime::new(2025, 9, 8, 18, 9, 11.0);
        let r = t.rounded_to_minute();
        assert_eq!((r.hour, r.minute), (18, 9));
    }

    #[test]
    fn rounding_carries_over_midnight() {
        let t = UtcTime::new(2025, 12, 31, 23, 59, 45.0);
        let r = t.rounded_to_minute();
        assert_eq!((r.year, r.month, r.day), (2026, 1, 1));
        assert_eq!((r.hour, r.minute), (0, 0));
    }
}
