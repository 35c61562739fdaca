//! SPK segment storage and Chebyshev record evaluation.

use crate::chebyshev::{clenshaw, clenshaw_derivative};
use crate::error::KernelError;
use crate::SpkEvaluation;

/// Descriptor parsed from a DAF summary (ND=2, NI=6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSummary {
    /// Segment start, TDB seconds past J2000.
    pub start_et: f64,
    /// Segment end, TDB seconds past J2000.
    pub end_et: f64,
    /// NAIF target body code.
    pub target: i32,
    /// NAIF center body code.
    pub center: i32,
    /// NAIF frame id (1 = J2000).
    pub frame: i32,
    /// SPK data type (2 or 3 here).
    pub seg_type: i32,
}

/// One SPK segment with its Chebyshev records decoded into host doubles.
#[derive(Debug, Clone)]
pub struct SpkSegment {
    pub summary: SegmentSummary,
    /// First record's start epoch, TDB seconds past J2000.
    pub init: f64,
    /// Record span in seconds.
    pub intlen: f64,
    /// Doubles per record.
    pub rsize: usize,
    /// Record count.
    pub n: usize,
    /// `n * rsize` doubles: [MID, RADIUS, coefficient sets...] per record.
    data: Vec<f64>,
}

impl SpkSegment {
    /// Assemble a segment from its decoded word range.
    ///
    /// `words` is the full segment payload including the 4-double trailer
    /// `[INIT, INTLEN, RSIZE, N]`.
    pub(crate) fn from_words(
        summary: SegmentSummary,
        mut words: Vec<f64>,
    ) -> Result<Self, KernelError> {
        if summary.seg_type != 2 && summary.seg_type != 3 {
            return Err(KernelError::UnsupportedSegment {
                seg_type: summary.seg_type,
            });
        }
        if words.len() < 4 {
            return Err(KernelError::Format("segment shorter than its trailer".into()));
        }
        let n = words[words.len() - 1] as usize;
        let rsize = words[words.len() - 2] as usize;
        let intlen = words[words.len() - 3];
        let init = words[words.len() - 4];

        if rsize < 5 || n == 0 {
            return Err(KernelError::Format(format!(
                "implausible segment directory: rsize={rsize} n={n}"
            )));
        }
        if !(intlen.is_finite() && intlen > 0.0) {
            return Err(KernelError::Format("non-positive record span".into()));
        }
        if words.len() != n * rsize + 4 {
            return Err(KernelError::Format(format!(
                "segment payload is {} doubles, directory implies {}",
                words.len(),
                n * rsize + 4
            )));
        }
        // Type 2 packs 3 coefficient sets per record, type 3 packs 6.
        let set_count = if summary.seg_type == 2 { 3 } else { 6 };
        if (rsize - 2) % set_count != 0 {
            return Err(KernelError::Format(format!(
                "record size {rsize} does not fit {set_count} coefficient sets"
            )));
        }

        words.truncate(n * rsize);
        Ok(Self {
            summary,
            init,
            intlen,
            rsize,
            n,
            data: words,
        })
    }

    /// Number of Chebyshev coefficients per component.
    fn coeff_count(&self) -> usize {
        let set_count = if self.summary.seg_type == 2 { 3 } else { 6 };
        (self.rsize - 2) / set_count
    }

    /// Evaluate the segment at `epoch_tdb_s` (caller checks coverage).
    pub fn evaluate(&self, epoch_tdb_s: f64) -> Result<SpkEvaluation, KernelError> {
        // Record selection: epochs exactly at a record boundary belong to
        // the later record, except the final end epoch.
        let mut idx = ((epoch_tdb_s - self.init) / self.intlen).floor() as i64;
        if idx < 0 {
            idx = 0;
        }
        if idx as usize >= self.n {
            idx = self.n as i64 - 1;
        }
        let record = &self.data[idx as usize * self.rsize..(idx as usize + 1) * self.rsize];

        let mid = record[0];
        let radius = record[1];
        if !(radius.is_finite() && radius > 0.0) {
            return Err(KernelError::Format("non-positive record radius".into()));
        }
        let s = (epoch_tdb_s - mid) / radius;

        let nc = self.coeff_count();
        let coeffs = &record[2..];

        let mut position_km = [0.0f64; 3];
        let mut velocity_km_s = [0.0f64; 3];
        for axis in 0..3 {
            let c = &coeffs[axis * nc..(axis + 1) * nc];
            position_km[axis] = clenshaw(c, s);
            if self.summary.seg_type == 2 {
                // d/dt = d/ds * ds/dt, ds/dt = 1/radius
                velocity_km_s[axis] = clenshaw_derivative(c, s) / radius;
            }
        }
        if self.summary.seg_type == 3 {
            for axis in 0..3 {
                let c = &coeffs[(3 + axis) * nc..(4 + axis) * nc];
                velocity_km_s[axis] = clenshaw(c, s);
            }
        }

        Ok(SpkEvaluation {
            position_km,
            velocity_km_s,
        })
    }
}
