//! DAF (Double precision Array File) container parsing.
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record
//! (identification word, ND/NI, summary chain head, binary format tag).
//! Summary records form a doubly-linked list; each holds up to 25 SPK
//! summaries of 5 doubles (2 doubles + 6 packed ints). Segment payloads
//! are addressed as 1-based double-precision words over the whole file.

use crate::error::KernelError;
use crate::segment::{SegmentSummary, SpkSegment};

const RECORD_BYTES: usize = 1024;
/// SPK descriptor shape.
const ND: i32 = 2;
const NI: i32 = 6;
/// Doubles per packed summary: ND + (NI + 1) / 2.
const SUMMARY_WORDS: usize = 5;

/// Endianness of the kernel's numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

fn read_f64(bytes: &[u8], offset: usize, order: ByteOrder) -> Result<f64, KernelError> {
    let raw: [u8; 8] = bytes
        .get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KernelError::Format("truncated file: double read past end".into()))?;
    Ok(match order {
        ByteOrder::Little => f64::from_le_bytes(raw),
        ByteOrder::Big => f64::from_be_bytes(raw),
    })
}

fn read_i32(bytes: &[u8], offset: usize, order: ByteOrder) -> Result<i32, KernelError> {
    let raw: [u8; 4] = bytes
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KernelError::Format("truncated file: integer read past end".into()))?;
    Ok(match order {
        ByteOrder::Little => i32::from_le_bytes(raw),
        ByteOrder::Big => i32::from_be_bytes(raw),
    })
}

/// Byte offset of a 1-based word index.
fn word_offset(word: usize) -> usize {
    (word - 1) * 8
}

/// Copy a 1-based inclusive word range, converting to host doubles.
fn read_words(
    bytes: &[u8],
    first: usize,
    last: usize,
    order: ByteOrder,
) -> Result<Vec<f64>, KernelError> {
    if first == 0 || last < first {
        return Err(KernelError::Format(format!(
            "invalid segment word range {first}..{last}"
        )));
    }
    let mut words = Vec::with_capacity(last - first + 1);
    for w in first..=last {
        words.push(read_f64(bytes, word_offset(w), order)?);
    }
    Ok(words)
}

/// Parse the file record and return (byte order, first summary record).
fn parse_file_record(bytes: &[u8]) -> Result<(ByteOrder, usize), KernelError> {
    if bytes.len() < RECORD_BYTES {
        return Err(KernelError::Format(
            "file shorter than one DAF record".into(),
        ));
    }
    let idword = &bytes[0..8];
    if &idword[0..4] != b"DAF/" {
        return Err(KernelError::Format(
            "missing DAF identification word".into(),
        ));
    }

    // The binary format tag is byte text, readable before we know the
    // integer byte order.
    let order = match &bytes[88..96] {
        b"LTL-IEEE" => ByteOrder::Little,
        b"BIG-IEEE" => ByteOrder::Big,
        other => {
            return Err(KernelError::Format(format!(
                "unrecognised binary format tag {:?}",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let nd = read_i32(bytes, 8, order)?;
    let ni = read_i32(bytes, 12, order)?;
    if nd != ND || ni != NI {
        return Err(KernelError::Format(format!(
            "descriptor shape ND={nd} NI={ni}, expected SPK's ND={ND} NI={NI}"
        )));
    }

    let fward = read_i32(bytes, 76, order)?;
    if fward < 2 {
        return Err(KernelError::Format(format!(
            "implausible first summary record {fward}"
        )));
    }
    Ok((order, fward as usize))
}

/// Decode one packed summary starting at `offset`.
fn parse_summary(
    bytes: &[u8],
    offset: usize,
    order: ByteOrder,
) -> Result<(SegmentSummary, usize, usize), KernelError> {
    let start_et = read_f64(bytes, offset, order)?;
    let end_et = read_f64(bytes, offset + 8, order)?;
    let target = read_i32(bytes, offset + 16, order)?;
    let center = read_i32(bytes, offset + 20, order)?;
    let frame = read_i32(bytes, offset + 24, order)?;
    let seg_type = read_i32(bytes, offset + 28, order)?;
    let first_word = read_i32(bytes, offset + 32, order)?;
    let last_word = read_i32(bytes, offset + 36, order)?;

    if first_word <= 0 || last_word < first_word {
        return Err(KernelError::Format(format!(
            "segment for target {target} has invalid word range {first_word}..{last_word}"
        )));
    }
    Ok((
        SegmentSummary {
            start_et,
            end_et,
            target,
            center,
            frame,
            seg_type,
        },
        first_word as usize,
        last_word as usize,
    ))
}

/// Walk the summary record chain and decode every Type 2/3 segment.
///
/// Segments of other types are skipped: DE planetary kernels only carry
/// Chebyshev segments, and a skipped segment simply never answers a
/// (target, center) lookup.
pub(crate) fn parse_segments(bytes: &[u8]) -> Result<Vec<SpkSegment>, KernelError> {
    let (order, fward) = parse_file_record(bytes)?;

    let mut segments = Vec::new();
    let mut record = fward;
    let mut visited = 0usize;

    while record != 0 {
        // A cycle in the chain would loop forever; the record count is a
        // hard upper bound on chain length.
        visited += 1;
        if visited > bytes.len() / RECORD_BYTES {
            return Err(KernelError::Format("summary record chain cycles".into()));
        }

        let base = (record - 1) * RECORD_BYTES;
        if base + RECORD_BYTES > bytes.len() {
            return Err(KernelError::Format(format!(
                "summary record {record} past end of file"
            )));
        }
        let next = read_f64(bytes, base, order)? as usize;
        let nsum = read_f64(bytes, base + 16, order)? as usize;
        if nsum > 25 {
            return Err(KernelError::Format(format!(
                "summary record {record} claims {nsum} summaries"
            )));
        }

        for i in 0..nsum {
            let offset = base + 24 + i * SUMMARY_WORDS * 8;
            let (summary, first_word, last_word) = parse_summary(bytes, offset, order)?;
            if summary.seg_type != 2 && summary.seg_type != 3 {
                continue;
            }
            let words = read_words(bytes, first_word, last_word, order)?;
            segments.push(SpkSegment::from_words(summary, words)?);
        }

        record = next;
    }

    Ok(segments)
}
