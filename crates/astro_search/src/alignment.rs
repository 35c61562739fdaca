//! Conjunction/opposition search.
//!
//! The classifier is the hemisphere of the target−Sun ecliptic
//! longitude difference (0 for [0°, 180°), 1 for [180°, 360°)). Every
//! hemisphere flip is a crossing of either 0° or 180°, so each refined
//! transition is labeled by the elongation at the instant itself rather
//! than by the raw hemisphere code. Inner planets oscillate around 0°
//! and therefore only ever produce conjunctions; a hemisphere-code
//! labeling would misreport half their conjunctions as oppositions.

use astro_core::{Body, Ephemeris};
use astro_time::TimeSpan;

use crate::alignment_types::{Alignment, AlignmentEvent};
use crate::discrete::find_discrete;
use crate::discrete_types::SearchConfig;
use crate::error::SearchError;
use crate::moon_phase::body_ecliptic_lon;

/// Target−Sun longitude difference, normalized to [0, 360).
fn elongation<E: Ephemeris>(eph: &E, target: Body, jd_tdb: f64) -> Result<f64, SearchError> {
    let target_lon = body_ecliptic_lon(eph, target, jd_tdb)?;
    let sun_lon = body_ecliptic_lon(eph, Body::Sun, jd_tdb)?;
    let mut diff = (target_lon - sun_lon).rem_euclid(360.0);
    if diff >= 360.0 {
        diff = 0.0;
    }
    Ok(diff)
}

fn hemisphere<E: Ephemeris>(eph: &E, target: Body, jd_tdb: f64) -> Result<i32, SearchError> {
    Ok(if elongation(eph, target, jd_tdb)? < 180.0 {
        0
    } else {
        1
    })
}

/// Classify a refined crossing by which boundary was crossed.
fn label(elongation_deg: f64) -> Alignment {
    let separation = elongation_deg.min(360.0 - elongation_deg);
    if separation < 90.0 {
        Alignment::Conjunction
    } else {
        Alignment::Opposition
    }
}

/// Find all conjunctions and oppositions of `target` within `span`.
///
/// The Sun cannot be aligned against itself and Earth is the observer;
/// both are rejected as invalid targets.
pub fn search_alignments<E: Ephemeris>(
    eph: &E,
    target: Body,
    span: &TimeSpan,
    config: &SearchConfig,
) -> Result<Vec<AlignmentEvent>, SearchError> {
    if target == Body::Sun {
        return Err(SearchError::InvalidTarget(
            "the sun cannot be in alignment with itself",
        ));
    }
    if target == Body::Earth {
        return Err(SearchError::InvalidTarget(
            "earth is the observer, not a searchable target",
        ));
    }

    let transitions = find_discrete(span, config, |t| hemisphere(eph, target, t))?;

    let mut events = Vec::with_capacity(transitions.len());
    for transition in transitions {
        let elongation_deg = elongation(eph, target, transition.jd_tdb)?;
        events.push(AlignmentEvent {
            jd_tdb: transition.jd_tdb,
            alignment: label(elongation_deg),
            body: target,
            elongation_deg,
        });
    }
    Ok(events)
}
