//! Julian Date ↔ Gregorian calendar conversion.
//!
//! Calendar algorithms follow Meeus, "Astronomical Algorithms", ch. 7.
//! All conversions here are scale-agnostic: a JD in UTC converts to a UTC
//! calendar date, a JD in TDB to a TDB calendar date.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a Julian Date to seconds past J2000.0 (same time scale).
pub fn jd_to_tdb_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Convert seconds past J2000.0 to a Julian Date (same time scale).
pub fn tdb_seconds_to_jd(seconds: f64) -> f64 {
    J2000_JD + seconds / SECONDS_PER_DAY
}

/// Gregorian calendar date to Julian Date.
///
/// `day` carries the time of day as a fraction (e.g. 15.5 = the 15th,
/// 12:00).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Julian Date to Gregorian calendar date `(year, month, day_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}
