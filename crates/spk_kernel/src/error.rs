//! Error types for kernel loading and evaluation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from DAF parsing or SPK segment evaluation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum KernelError {
    /// I/O error while reading the kernel file.
    Io(String),
    /// The file is not a DAF/SPK file or its structure is inconsistent.
    Format(String),
    /// The segment's data type is not Type 2 or Type 3.
    UnsupportedSegment { seg_type: i32 },
    /// No segment carries the (target, center) pair.
    SegmentNotFound { target: i32, center: i32 },
    /// A segment exists for the pair but does not cover the epoch.
    EpochOutOfRange {
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    },
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Format(msg) => write!(f, "kernel format error: {msg}"),
            Self::UnsupportedSegment { seg_type } => {
                write!(f, "unsupported SPK segment type {seg_type}")
            }
            Self::SegmentNotFound { target, center } => {
                write!(f, "no segment for target {target} relative to {center}")
            }
            Self::EpochOutOfRange {
                target,
                center,
                epoch_tdb_s,
            } => write!(
                f,
                "epoch {epoch_tdb_s} outside segment coverage for target {target} relative to {center}"
            ),
        }
    }
}

impl Error for KernelError {}
