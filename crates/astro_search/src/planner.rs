//! Query planner.
//!
//! Turns a user request (single date or explicit range) into the span
//! to search and runs both series over it: moon phases always, plus
//! Sun-relative alignments for the chosen target. Spans reaching past
//! the ephemeris coverage are clamped and flagged; spans entirely
//! outside it are a distinct error, not an empty result.

use astro_core::{Body, Ephemeris};
use astro_time::TimeSpan;

use crate::alignment::search_alignments;
use crate::error::SearchError;
use crate::moon_phase::search_moon_phases;
use crate::planner_types::{AlmanacReport, PlannerConfig, SINGLE_DATE_WINDOW_DAYS};

/// Expand a single date into a ±[`SINGLE_DATE_WINDOW_DAYS`] window and
/// search it.
pub fn plan_single_date<E: Ephemeris>(
    eph: &E,
    body: Body,
    date_jd_tdb: f64,
    config: &PlannerConfig,
) -> Result<AlmanacReport, SearchError> {
    let requested = TimeSpan::centered(date_jd_tdb, SINGLE_DATE_WINDOW_DAYS)
        .map_err(|_| SearchError::InvalidConfig("date must be a finite instant"))?;
    plan_range(eph, body, requested, config)
}

/// Search an explicit span for both event series.
pub fn plan_range<E: Ephemeris>(
    eph: &E,
    body: Body,
    requested: TimeSpan,
    config: &PlannerConfig,
) -> Result<AlmanacReport, SearchError> {
    if body == Body::Sun {
        return Err(SearchError::InvalidTarget(
            "the sun cannot be in alignment with itself",
        ));
    }
    if body == Body::Earth {
        return Err(SearchError::InvalidTarget(
            "earth is the observer, not a searchable target",
        ));
    }

    let (coverage_start, coverage_end) = eph.coverage_jd_tdb();
    let coverage = TimeSpan::new(coverage_start, coverage_end)
        .map_err(|_| SearchError::InvalidConfig("provider reported an invalid coverage span"))?;

    let searched = requested
        .intersect(&coverage)
        .ok_or(SearchError::OutOfEphemerisRange {
            requested_start_jd_tdb: requested.start_jd_tdb(),
            requested_end_jd_tdb: requested.end_jd_tdb(),
            coverage_start_jd_tdb: coverage_start,
            coverage_end_jd_tdb: coverage_end,
        })?;
    let clipped = searched != requested;

    let moon_phases = search_moon_phases(eph, &searched, &config.search)?;
    let alignments = search_alignments(eph, body, &searched, &config.search)?;

    Ok(AlmanacReport {
        body,
        requested,
        searched,
        clipped,
        moon_phases,
        alignments,
    })
}
