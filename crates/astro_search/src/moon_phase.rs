//! Moon-phase search.
//!
//! Phase is the quadrant of the Moon−Sun ecliptic longitude difference
//! as seen from Earth: a new moon begins when the difference crosses
//! 0°, first quarter at 90°, full at 180°, last quarter at 270°. The
//! quadrant changes every ~7.38 days, so the default one-day step
//! resolution catches every transition.

use astro_core::{Body, Ephemeris, Frame, Observer, Query};
use astro_frames::cartesian_to_spherical;
use astro_time::TimeSpan;

use crate::discrete::find_discrete;
use crate::discrete_types::SearchConfig;
use crate::error::SearchError;
use crate::moon_phase_types::{MoonPhase, MoonPhaseEvent};

/// Query a body's geocentric ecliptic longitude in degrees, [0, 360).
pub(crate) fn body_ecliptic_lon<E: Ephemeris>(
    eph: &E,
    body: Body,
    jd_tdb: f64,
) -> Result<f64, SearchError> {
    let query = Query {
        target: body,
        observer: Observer::Body(Body::Earth),
        frame: Frame::EclipticJ2000,
        epoch_tdb_jd: jd_tdb,
    };
    let state = eph.state(query)?;
    Ok(cartesian_to_spherical(&state.position_km).lon_deg)
}

/// Moon−Sun longitude difference, normalized to [0, 360).
pub(crate) fn moon_sun_elongation<E: Ephemeris>(
    eph: &E,
    jd_tdb: f64,
) -> Result<f64, SearchError> {
    let moon = body_ecliptic_lon(eph, Body::Moon, jd_tdb)?;
    let sun = body_ecliptic_lon(eph, Body::Sun, jd_tdb)?;
    let mut diff = (moon - sun).rem_euclid(360.0);
    // rem_euclid of a tiny negative angle can round up to exactly 360.
    if diff >= 360.0 {
        diff = 0.0;
    }
    Ok(diff)
}

fn phase_quadrant<E: Ephemeris>(eph: &E, jd_tdb: f64) -> Result<i32, SearchError> {
    Ok((moon_sun_elongation(eph, jd_tdb)? / 90.0) as i32)
}

/// Find all moon-phase transitions within `span`.
pub fn search_moon_phases<E: Ephemeris>(
    eph: &E,
    span: &TimeSpan,
    config: &SearchConfig,
) -> Result<Vec<MoonPhaseEvent>, SearchError> {
    let transitions = find_discrete(span, config, |t| phase_quadrant(eph, t))?;

    let mut events = Vec::with_capacity(transitions.len());
    for transition in transitions {
        let moon = body_ecliptic_lon(eph, Body::Moon, transition.jd_tdb)?;
        let sun = body_ecliptic_lon(eph, Body::Sun, transition.jd_tdb)?;
        events.push(MoonPhaseEvent {
            jd_tdb: transition.jd_tdb,
            phase: MoonPhase::from_quadrant(transition.code),
            moon_longitude_deg: moon,
            sun_longitude_deg: sun,
        });
    }
    Ok(events)
}
