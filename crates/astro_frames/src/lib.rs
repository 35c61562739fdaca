//! Reference-frame rotation and coordinate conversion.
//!
//! Two frames only: ICRF/J2000 (the kernel's native frame) and the mean
//! ecliptic of J2000. Anything fancier is out of scope for minute-level
//! event times.

pub mod ecliptic;
pub mod spherical;

pub use ecliptic::{ecliptic_to_icrf, icrf_to_ecliptic};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
