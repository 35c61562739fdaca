//! Reader and evaluator for NAIF DAF/SPK planetary ephemeris files.
//!
//! This crate provides:
//! - DAF container parsing (file record, summary record chain)
//! - SPK Type 2 and Type 3 segment evaluation (Chebyshev polynomials)
//! - Per-(target, center) coverage lookup with a distinguishable
//!   out-of-range error
//!
//! The kernel file (`de421.bsp`, `de440s.bsp`, ...) is treated as an
//! opaque, versioned, read-only resource: this crate reads the tabulated
//! polynomials, it does not compute orbits.

pub mod chebyshev;
mod daf;
pub mod error;
pub mod segment;

use std::path::Path;

pub use error::KernelError;
pub use segment::{SegmentSummary, SpkSegment};

/// Result of evaluating one SPK segment at an epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpkEvaluation {
    /// Position of target relative to center in km.
    pub position_km: [f64; 3],
    /// Velocity of target relative to center in km/s.
    pub velocity_km_s: [f64; 3],
}

/// Map an SPK planet body code (x99) to its barycenter code (x).
///
/// DE kernels carry Mercury..Pluto as barycenters (1..9) relative to the
/// solar-system barycenter; the x99 planet codes only exist as separate
/// segments where the planet is distinct from its barycenter (Earth).
/// Codes that are not planet codes are returned unchanged.
pub const fn planet_body_to_barycenter(code: i32) -> i32 {
    if code >= 199 && code <= 999 && code % 100 == 99 {
        code / 100
    } else {
        code
    }
}

/// A loaded SPK kernel: all Type 2/3 segments, ready for evaluation.
pub struct SpkKernel {
    segments: Vec<SpkSegment>,
}

impl std::fmt::Debug for SpkKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpkKernel")
            .field("segment_count", &self.segments.len())
            .finish()
    }
}

impl SpkKernel {
    /// Load an SPK kernel from a file path.
    pub fn load(path: &Path) -> Result<Self, KernelError> {
        let bytes = std::fs::read(path).map_err(|e| KernelError::Io(e.to_string()))?;
        Self::parse(&bytes)
    }

    /// Parse an SPK kernel from its raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, KernelError> {
        let segments = daf::parse_segments(bytes)?;
        if segments.is_empty() {
            return Err(KernelError::Format(
                "kernel contains no usable SPK segments".into(),
            ));
        }
        Ok(Self { segments })
    }

    /// All loaded segments.
    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    /// The center body for a target, from the first matching segment.
    pub fn center_for(&self, target: i32) -> Option<i32> {
        self.segments
            .iter()
            .find(|s| s.summary.target == target)
            .map(|s| s.summary.center)
    }

    /// Epoch coverage common to every segment, in TDB seconds past J2000.
    ///
    /// The intersection is the range over which any body chain can be
    /// resolved. DE kernels use identical coverage for all segments, so
    /// in practice this equals each segment's own range.
    pub fn coverage_et(&self) -> (f64, f64) {
        let mut start = f64::NEG_INFINITY;
        let mut end = f64::INFINITY;
        for seg in &self.segments {
            start = start.max(seg.summary.start_et);
            end = end.min(seg.summary.end_et);
        }
        (start, end)
    }

    /// Evaluate (target relative to center) at `epoch_tdb_s`.
    ///
    /// Returns [`KernelError::SegmentNotFound`] when no segment carries the
    /// pair at all, and [`KernelError::EpochOutOfRange`] when a segment
    /// exists but does not cover the epoch.
    pub fn evaluate(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let mut pair_seen = false;
        for seg in &self.segments {
            if seg.summary.target != target || seg.summary.center != center {
                continue;
            }
            pair_seen = true;
            if epoch_tdb_s >= seg.summary.start_et && epoch_tdb_s <= seg.summary.end_et {
                return seg.evaluate(epoch_tdb_s);
            }
        }
        if pair_seen {
            Err(KernelError::EpochOutOfRange {
                target,
                center,
                epoch_tdb_s,
            })
        } else {
            Err(KernelError::SegmentNotFound { target, center })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycenter_mapping() {
        assert_eq!(planet_body_to_barycenter(199), 1);
        assert_eq!(planet_body_to_barycenter(499), 4);
        assert_eq!(planet_body_to_barycenter(999), 9);
        // Non-planet codes pass through
        assert_eq!(planet_body_to_barycenter(301), 301);
        assert_eq!(planet_body_to_barycenter(10), 10);
        assert_eq!(planet_body_to_barycenter(0), 0);
        assert_eq!(planet_body_to_barycenter(399), 3);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(SpkKernel::parse(&[0u8; 16]).is_err());
        assert!(SpkKernel::parse(&[0u8; 2048]).is_err());
    }

    #[test]
    fn kernel_lookup_and_coverage() {
        let bytes = crate::daf::tests::synthetic_kernel_le();
        let kernel = SpkKernel::parse(&bytes).unwrap();

        assert_eq!(kernel.segments().len(), 1);
        assert_eq!(kernel.center_for(301), Some(3));
        assert_eq!(kernel.center_for(499), None);
        assert_eq!(kernel.coverage_et(), (0.0, 100.0));

        assert!(kernel.evaluate(301, 3, 50.0).is_ok());
        assert!(matches!(
            kernel.evaluate(301, 3, 500.0),
            Err(KernelError::EpochOutOfRange { target: 301, .. })
        ));
        assert!(matches!(
            kernel.evaluate(499, 4, 50.0),
            Err(KernelError::SegmentNotFound {
                target: 499,
                center: 4
            })
        ));
    }
}
