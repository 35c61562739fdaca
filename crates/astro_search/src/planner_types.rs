//! Types for the query planner.

use astro_core::Body;
use astro_time::TimeSpan;

use crate::alignment_types::AlignmentEvent;
use crate::discrete_types::SearchConfig;
use crate::moon_phase_types::MoonPhaseEvent;

/// Half-width of the window expanded around a single-date query.
pub const SINGLE_DATE_WINDOW_DAYS: f64 = 365.25;

/// Observer site on Earth.
///
/// Event instants here are geocentric, so the site does not shift any
/// reported time; it is carried as explicit configuration rather than
/// hidden global state, and is where a topocentric extension would hook
/// in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverSite {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl ObserverSite {
    pub const EQUATOR_PRIME_MERIDIAN: Self = Self {
        latitude_deg: 0.0,
        longitude_deg: 0.0,
    };
}

/// Planner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlannerConfig {
    pub site: ObserverSite,
    pub search: SearchConfig,
}

impl Default for ObserverSite {
    fn default() -> Self {
        Self::EQUATOR_PRIME_MERIDIAN
    }
}

/// Everything one query produces, bundled for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlmanacReport {
    pub body: Body,
    /// The span the user asked for.
    pub requested: TimeSpan,
    /// The span actually searched after clamping to ephemeris coverage.
    pub searched: TimeSpan,
    /// True when `searched` is narrower than `requested`.
    pub clipped: bool,
    pub moon_phases: Vec<MoonPhaseEvent>,
    pub alignments: Vec<AlignmentEvent>,
}
