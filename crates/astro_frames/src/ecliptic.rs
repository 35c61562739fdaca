//! Rotation between ICRF/J2000 and the mean ecliptic of J2000.

/// J2000 mean obliquity of the ecliptic (IAU 1976), degrees.
const OBLIQUITY_J2000_DEG: f64 = 23.439_291_111;

/// Rotate an ICRF/J2000 vector into the mean ecliptic frame of J2000.
///
/// A fixed rotation about the +x axis by the mean obliquity.
pub fn icrf_to_ecliptic(xyz: &[f64; 3]) -> [f64; 3] {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_e, cos_e) = eps.sin_cos();
    [
        xyz[0],
        cos_e * xyz[1] + sin_e * xyz[2],
        -sin_e * xyz[1] + cos_e * xyz[2],
    ]
}

/// Inverse of [`icrf_to_ecliptic`].
pub fn ecliptic_to_icrf(xyz: &[f64; 3]) -> [f64; 3] {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_e, cos_e) = eps.sin_cos();
    [
        xyz[0],
        cos_e * xyz[1] - sin_e * xyz[2],
        sin_e * xyz[1] + cos_e * xyz[2],
    ]
}
