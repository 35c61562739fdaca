//! Time-scale conversions (UTC/TAI/TT/TDB) and calendar arithmetic.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - UTC → TAI → TT → TDB conversion chain (and inverse) with an embedded
//!   leap-second table
//! - `UtcTime`, the calendar type used for input parsing and display
//! - `TimeSpan`, an ordered pair of TDB Julian Dates

pub mod error;
pub mod julian;
pub mod scales;
pub mod span;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, jd_to_tdb_seconds,
    tdb_seconds_to_jd,
};
pub use scales::{tdb_to_utc, utc_to_tdb};
pub use span::TimeSpan;
pub use utc_time::UtcTime;
