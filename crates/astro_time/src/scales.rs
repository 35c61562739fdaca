//! UTC → TAI → TT → TDB conversion chain (and inverse).
//!
//! Leap seconds come from an embedded table rather than a parsed LSK
//! file, so the tool needs no second data download. The table is the
//! complete IERS record since the 1972 reform; entries are
//! `(UTC Julian Date the offset takes effect, TAI − UTC in seconds)`.
//! Before 1972 the first offset is used as an approximation — the error
//! (under ten seconds) is far below the minute precision reported
//! downstream.

use crate::julian::{SECONDS_PER_DAY, tdb_seconds_to_jd};

/// TT − TAI, a defined constant.
const TT_MINUS_TAI: f64 = 32.184;

/// IERS leap-second table: (UTC JD, TAI − UTC seconds).
const LEAP_SECONDS: &[(f64, f64)] = &[
    (2_441_317.5, 10.0), // 1972-01-01
    (2_441_499.5, 11.0), // 1972-07-01
    (2_441_683.5, 12.0), // 1973-01-01
    (2_442_048.5, 13.0), // 1974-01-01
    (2_442_413.5, 14.0), // 1975-01-01
    (2_442_778.5, 15.0), // 1976-01-01
    (2_443_144.5, 16.0), // 1977-01-01
    (2_443_509.5, 17.0), // 1978-01-01
    (2_443_874.5, 18.0), // 1979-01-01
    (2_444_239.5, 19.0), // 1980-01-01
    (2_444_786.5, 20.0), // 1981-07-01
    (2_445_151.5, 21.0), // 1982-07-01
    (2_445_516.5, 22.0), // 1983-07-01
    (2_446_247.5, 23.0), // 1985-07-01
    (2_447_161.5, 24.0), // 1988-01-01
    (2_447_892.5, 25.0), // 1990-01-01
    (2_448_257.5, 26.0), // 1991-01-01
    (2_448_804.5, 27.0), // 1992-07-01
    (2_449_169.5, 28.0), // 1993-07-01
    (2_449_534.5, 29.0), // 1994-07-01
    (2_450_083.5, 30.0), // 1996-01-01
    (2_450_630.5, 31.0), // 1997-07-01
    (2_451_179.5, 32.0), // 1999-01-01
    (2_453_736.5, 33.0), // 2006-01-01
    (2_454_832.5, 34.0), // 2009-01-01
    (2_456_109.5, 35.0), // 2012-07-01
    (2_457_204.5, 36.0), // 2015-07-01
    (2_457_754.5, 37.0), // 2017-01-01
];

/// TAI − UTC at a UTC Julian Date.
fn delta_at(jd_utc: f64) -> f64 {
    let mut offset = LEAP_SECONDS[0].1;
    for &(jd, dat) in LEAP_SECONDS {
        if jd_utc >= jd {
            offset = dat;
        } else {
            break;
        }
    }
    offset
}

/// TDB − TT periodic term (USNO approximation, good to ~30 µs).
fn tdb_minus_tt(t_s: f64) -> f64 {
    let d = t_s / SECONDS_PER_DAY;
    let g = (357.528 + 0.985_600_3 * d).to_radians();
    0.001_657 * (g + 0.016_71 * g.sin()).sin()
}

/// Convert UTC seconds past J2000 to TDB seconds past J2000.
pub fn utc_to_tdb(utc_s: f64) -> f64 {
    let jd_utc = tdb_seconds_to_jd(utc_s);
    let tai_s = utc_s + delta_at(jd_utc);
    let tt_s = tai_s + TT_MINUS_TAI;
    tt_s + tdb_minus_tt(tt_s)
}

/// Convert TDB seconds past J2000 to UTC seconds past J2000.
pub fn tdb_to_utc(tdb_s: f64) -> f64 {
    // TDB − TT varies by microseconds over the ~minute the inverse could
    // be off, so evaluating the periodic term at TDB is exact enough.
    let tt_s = tdb_s - tdb_minus_tt(tdb_s);
    let tai_s = tt_s - TT_MINUS_TAI;
    // First guess for the leap-second lookup, then refine once in case
    // the guess lands on the other side of an insertion.
    let guess = tai_s - delta_at(tdb_seconds_to_jd(tai_s));
    tai_s - delta_at(tdb_seconds_to_jd(guess))
}
