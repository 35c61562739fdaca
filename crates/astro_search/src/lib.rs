//! Astronomical event search: moon phases, conjunctions, oppositions.
//!
//! This crate provides:
//! - A general discrete-event search engine (coarse scan + bisection on
//!   integer-valued classification functions)
//! - Moon-phase search (quadrants of Moon−Sun elongation)
//! - Conjunction/opposition search for planets and the Moon
//! - A query planner that turns a date or date range into both event
//!   series, clamped to ephemeris coverage
//!
//! Everything is generic over [`astro_core::Ephemeris`], so searches run
//! identically against SPK-backed engines and synthetic test providers.

pub mod alignment;
pub mod alignment_types;
pub mod discrete;
pub mod discrete_types;
pub mod error;
pub mod moon_phase;
pub mod moon_phase_types;
pub mod planner;
pub mod planner_types;

pub use alignment::search_alignments;
pub use alignment_types::{Alignment, AlignmentEvent};
pub use discrete::find_discrete;
pub use discrete_types::{DiscreteEvent, SearchConfig};
pub use error::SearchError;
pub use moon_phase::search_moon_phases;
pub use moon_phase_types::{MoonPhase, MoonPhaseEvent};
pub use planner::{plan_range, plan_single_date};
pub use planner_types::{
    AlmanacReport, ObserverSite, PlannerConfig, SINGLE_DATE_WINDOW_DAYS,
};
