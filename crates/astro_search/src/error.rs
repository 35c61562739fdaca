//! Search error types.

use std::error::Error;
use std::fmt::{Display, Formatter};

use astro_core::EngineError;

/// Errors from event search and query planning.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// A search configuration parameter is out of range.
    InvalidConfig(&'static str),
    /// The requested body cannot be searched (sun self-alignment,
    /// earth as target).
    InvalidTarget(&'static str),
    /// The requested span lies entirely outside the ephemeris coverage.
    OutOfEphemerisRange {
        requested_start_jd_tdb: f64,
        requested_end_jd_tdb: f64,
        coverage_start_jd_tdb: f64,
        coverage_end_jd_tdb: f64,
    },
    /// An ephemeris query failed mid-search.
    Engine(EngineError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid search config: {msg}"),
            Self::InvalidTarget(msg) => write!(f, "invalid target: {msg}"),
            Self::OutOfEphemerisRange {
                requested_start_jd_tdb,
                requested_end_jd_tdb,
                coverage_start_jd_tdb,
                coverage_end_jd_tdb,
            } => write!(
                f,
                "span JD {requested_start_jd_tdb:.2}..{requested_end_jd_tdb:.2} lies outside \
                 ephemeris coverage JD {coverage_start_jd_tdb:.2}..{coverage_end_jd_tdb:.2}"
            ),
            Self::Engine(e) => write!(f, "engine error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for SearchError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
