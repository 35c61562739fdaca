//! Event-search tests against a synthetic sky.
//!
//! A small analytic model stands in for the SPK-backed engine: each
//! body moves at a fixed (or sinusoidal) geocentric ecliptic longitude
//! rate. Event structure — cycling, cadence, alignment labeling — is
//! exact in this model, so assertions can be tight without kernel data.

use std::f64::consts::TAU;

use astro_core::{Body, EngineError, Ephemeris, Frame, Observer, Query, StateVector};
use astro_search::{
    Alignment, MoonPhase, PlannerConfig, SearchConfig, SearchError, plan_range, plan_single_date,
    search_alignments, search_moon_phases,
};
use astro_time::{J2000_JD, TimeSpan};

/// Mean longitude rates, deg/day. Lunation in this model is
/// 360 / (13.1763966 - 0.9856474) = 29.5306 days.
const SUN_RATE: f64 = 0.985_647_4;
const MOON_RATE: f64 = 13.176_396_6;
const LUNATION_DAYS: f64 = 29.5306;

struct SyntheticSky;

impl SyntheticSky {
    /// Geocentric ecliptic longitude in degrees at `days` past J2000.
    fn longitude_deg(&self, body: Body, days: f64) -> Result<f64, EngineError> {
        let sun = 280.46 + SUN_RATE * days;
        let lon = match body {
            Body::Sun => sun,
            Body::Moon => 218.316 + MOON_RATE * days,
            // Outer planets: elongation shrinks through a full synodic
            // cycle (Mars 779.94 d, Jupiter 398.88 d).
            Body::Mars => sun + 170.0 - (360.0 / 779.94) * days,
            Body::Jupiter => sun + 10.0 - (360.0 / 398.88) * days,
            // Inner planets: elongation oscillates, never reaching 180.
            Body::Venus => sun + 46.0 * (TAU * days / 583.92).sin(),
            Body::Mercury => sun + 28.0 * (TAU * days / 115.88).sin(),
            _ => {
                return Err(EngineError::UnsupportedQuery(
                    "body not modeled by the synthetic sky",
                ));
            }
        };
        Ok(lon.rem_euclid(360.0))
    }
}

impl Ephemeris for SyntheticSky {
    fn state(&self, query: Query) -> Result<StateVector, EngineError> {
        assert_eq!(query.observer, Observer::Body(Body::Earth));
        assert_eq!(query.frame, Frame::EclipticJ2000);
        let days = query.epoch_tdb_jd - J2000_JD;
        let lon = self.longitude_deg(query.target, days)?.to_radians();
        let distance_km = 1.5e8;
        Ok(StateVector {
            position_km: [distance_km * lon.cos(), distance_km * lon.sin(), 0.0],
            velocity_km_s: [0.0, 0.0, 0.0],
        })
    }

    fn coverage_jd_tdb(&self) -> (f64, f64) {
        (J2000_JD - 36525.0, J2000_JD + 36525.0)
    }
}

fn span_days(start_days: f64, end_days: f64) -> TimeSpan {
    TimeSpan::new(J2000_JD + start_days, J2000_JD + end_days).unwrap()
}

#[test]
fn moon_phase_codes_cycle_in_order() {
    let events = search_moon_phases(
        &SyntheticSky,
        &span_days(0.0, 400.0),
        &SearchConfig::default(),
    )
    .unwrap();
    assert!(events.len() > 40, "got {}", events.len());

    for w in events.windows(2) {
        assert_eq!(
            w[1].phase.code(),
            (w[0].phase.code() + 1) % 4,
            "skipped or repeated phase at JD {}",
            w[1].jd_tdb
        );
    }
}

#[test]
fn same_phase_spacing_is_one_lunation() {
    let events = search_moon_phases(
        &SyntheticSky,
        &span_days(0.0, 200.0),
        &SearchConfig::default(),
    )
    .unwrap();

    let full: Vec<f64> = events
        .iter()
        .filter(|e| e.phase == MoonPhase::Full)
        .map(|e| e.jd_tdb)
        .collect();
    assert!(full.len() >= 5);
    for w in full.windows(2) {
        let spacing = w[1] - w[0];
        assert!(
            (spacing - LUNATION_DAYS).abs() < 0.01,
            "lunation spacing {spacing:.4}"
        );
    }
}

#[test]
fn event_count_tracks_quarter_cadence() {
    let length_days = 365.25;
    let events = search_moon_phases(
        &SyntheticSky,
        &span_days(0.0, length_days),
        &SearchConfig::default(),
    )
    .unwrap();

    let expected = length_days / (LUNATION_DAYS / 4.0);
    let count = events.len() as f64;
    assert!(
        (count - expected).abs() <= 1.0,
        "expected ~{expected:.1} events, got {count}"
    );
}

#[test]
fn search_is_deterministic() {
    let span = span_days(10.0, 310.0);
    let config = SearchConfig::default();
    let first = search_moon_phases(&SyntheticSky, &span, &config).unwrap();
    let second = search_moon_phases(&SyntheticSky, &span, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn span_between_transitions_is_empty() {
    // Anchor on a detected event, then search inside the quiet gap
    // before the next one (quarter cadence is ~7.38 days).
    let events = search_moon_phases(
        &SyntheticSky,
        &span_days(0.0, 40.0),
        &SearchConfig::default(),
    )
    .unwrap();
    let anchor = events[0].jd_tdb - J2000_JD;

    let quiet = search_moon_phases(
        &SyntheticSky,
        &span_days(anchor + 0.1, anchor + 7.0),
        &SearchConfig::default(),
    )
    .unwrap();
    assert!(quiet.is_empty(), "expected quiet gap, got {quiet:?}");
}

#[test]
fn event_longitudes_match_phase_quadrant() {
    let events = search_moon_phases(
        &SyntheticSky,
        &span_days(0.0, 100.0),
        &SearchConfig::default(),
    )
    .unwrap();
    for event in events {
        let diff = (event.moon_longitude_deg - event.sun_longitude_deg).rem_euclid(360.0);
        let boundary = 90.0 * event.phase.code() as f64;
        let off = (diff - boundary).abs().min((diff - boundary - 360.0).abs());
        assert!(off < 0.01, "phase {:?} at elongation {diff:.4}", event.phase);
    }
}

#[test]
fn mars_alternates_conjunction_and_opposition() {
    // Relative longitude starts at 170° and falls 0.4616°/day:
    // conjunction near day 368, opposition near 758, then repeats.
    let events = search_alignments(
        &SyntheticSky,
        Body::Mars,
        &span_days(0.0, 1600.0),
        &SearchConfig::default(),
    )
    .unwrap();

    let kinds: Vec<Alignment> = events.iter().map(|e| e.alignment).collect();
    assert_eq!(
        kinds,
        vec![
            Alignment::Conjunction,
            Alignment::Opposition,
            Alignment::Conjunction,
            Alignment::Opposition,
        ]
    );
    assert!((events[0].jd_tdb - J2000_JD - 368.3).abs() < 1.0);
    assert!((events[1].jd_tdb - J2000_JD - 758.3).abs() < 1.0);
}

#[test]
fn inner_planets_never_oppose() {
    for body in [Body::Mercury, Body::Venus] {
        let events = search_alignments(
            &SyntheticSky,
            body,
            &span_days(0.0, 1200.0),
            &SearchConfig::default(),
        )
        .unwrap();
        assert!(events.len() >= 3, "{body:?}: got {}", events.len());
        assert!(
            events.iter().all(|e| e.alignment == Alignment::Conjunction),
            "{body:?} produced an opposition"
        );
    }
}

#[test]
fn sun_target_is_rejected() {
    let err = search_alignments(
        &SyntheticSky,
        Body::Sun,
        &span_days(0.0, 10.0),
        &SearchConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidTarget(_)));

    let err = plan_range(
        &SyntheticSky,
        Body::Sun,
        span_days(0.0, 10.0),
        &PlannerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidTarget(_)));
}

#[test]
fn earth_target_is_rejected() {
    let err = plan_range(
        &SyntheticSky,
        Body::Earth,
        span_days(0.0, 10.0),
        &PlannerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidTarget(_)));
}

#[test]
fn fully_out_of_coverage_is_a_distinct_error() {
    let err = plan_range(
        &SyntheticSky,
        Body::Mars,
        span_days(40000.0, 40010.0),
        &PlannerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::OutOfEphemerisRange { .. }));
}

#[test]
fn overhanging_span_is_clamped_and_flagged() {
    let report = plan_range(
        &SyntheticSky,
        Body::Mars,
        span_days(36400.0, 37000.0),
        &PlannerConfig::default(),
    )
    .unwrap();

    assert!(report.clipped);
    assert_eq!(report.searched.end_jd_tdb(), J2000_JD + 36525.0);
    assert_eq!(report.searched.start_jd_tdb(), J2000_JD + 36400.0);
    assert!(!report.moon_phases.is_empty());
}

#[test]
fn in_coverage_span_is_not_flagged() {
    let report = plan_range(
        &SyntheticSky,
        Body::Jupiter,
        span_days(0.0, 380.0),
        &PlannerConfig::default(),
    )
    .unwrap();
    assert!(!report.clipped);
    assert_eq!(report.searched, report.requested);
    assert_eq!(report.body, Body::Jupiter);
    // Jupiter's conjunction lands near day 11 and its opposition near
    // day 210; the next conjunction (day ~410) is past the span.
    assert_eq!(report.alignments.len(), 2);
    assert_eq!(report.alignments[0].alignment, Alignment::Conjunction);
    assert_eq!(report.alignments[1].alignment, Alignment::Opposition);
}

#[test]
fn single_date_expands_to_two_year_window() {
    let report = plan_single_date(
        &SyntheticSky,
        Body::Moon,
        J2000_JD + 1000.0,
        &PlannerConfig::default(),
    )
    .unwrap();

    assert!((report.requested.duration_days() - 730.5).abs() < 1e-9);
    assert!(!report.clipped);

    // Moon target yields both series: phases plus its own
    // conjunctions (new) and oppositions (full).
    assert!(!report.moon_phases.is_empty());
    let conj = report
        .alignments
        .iter()
        .filter(|e| e.alignment == Alignment::Conjunction)
        .count();
    let opp = report
        .alignments
        .iter()
        .filter(|e| e.alignment == Alignment::Opposition)
        .count();
    assert!(conj >= 20 && opp >= 20, "conj {conj}, opp {opp}");
}

#[test]
fn moon_alignments_coincide_with_syzygy_phases() {
    let report = plan_range(
        &SyntheticSky,
        Body::Moon,
        span_days(0.0, 120.0),
        &PlannerConfig::default(),
    )
    .unwrap();

    for alignment in &report.alignments {
        let phase = match alignment.alignment {
            Alignment::Conjunction => MoonPhase::New,
            Alignment::Opposition => MoonPhase::Full,
        };
        let matched = report
            .moon_phases
            .iter()
            .any(|p| p.phase == phase && (p.jd_tdb - alignment.jd_tdb).abs() < 0.01);
        assert!(
            matched,
            "{:?} at JD {} has no matching phase event",
            alignment.alignment, alignment.jd_tdb
        );
    }
}
