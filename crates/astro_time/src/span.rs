//! Ordered time spans over TDB Julian Dates.

use crate::error::TimeError;

/// An absolute time span `[start, end]` in TDB Julian Dates.
///
/// Invariant: `start_jd_tdb <= end_jd_tdb`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    start_jd_tdb: f64,
    end_jd_tdb: f64,
}

impl TimeSpan {
    /// Create a span; rejects reversed or non-finite bounds.
    pub fn new(start_jd_tdb: f64, end_jd_tdb: f64) -> Result<Self, TimeError> {
        if !start_jd_tdb.is_finite() || !end_jd_tdb.is_finite() {
            return Err(TimeError::InvalidSpan("bounds must be finite"));
        }
        if start_jd_tdb > end_jd_tdb {
            return Err(TimeError::InvalidSpan("start is after end"));
        }
        Ok(Self {
            start_jd_tdb,
            end_jd_tdb,
        })
    }

    /// A span centered on `jd_tdb`, extending `half_width_days` each way.
    pub fn centered(jd_tdb: f64, half_width_days: f64) -> Result<Self, TimeError> {
        if !(half_width_days.is_finite() && half_width_days >= 0.0) {
            return Err(TimeError::InvalidSpan("half width must be non-negative"));
        }
        Self::new(jd_tdb - half_width_days, jd_tdb + half_width_days)
    }

    pub fn start_jd_tdb(&self) -> f64 {
        self.start_jd_tdb
    }

    pub fn end_jd_tdb(&self) -> f64 {
        self.end_jd_tdb
    }

    /// Span length in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd_tdb - self.start_jd_tdb
    }

    pub fn contains(&self, jd_tdb: f64) -> bool {
        jd_tdb >= self.start_jd_tdb && jd_tdb <= self.end_jd_tdb
    }

    /// Overlap with another span, if any.
    pub fn intersect(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let start = self.start_jd_tdb.max(other.start_jd_tdb);
        let end = self.end_jd_tdb.min(other.end_jd_tdb);
        if start <= end {
            Some(Self {
                start_jd_tdb: start,
                end_jd_tdb: end,
            })
        } else {
            None
        }
    }
}
