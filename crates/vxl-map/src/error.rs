//! Error types for decoding, encoding and mutating maps.

use std::collections::TryReserveError;

/// Errors reported by the map engine.
///
/// Out-of-bounds coordinates are never an error: queries report air and
/// mutations are ignored.
#[derive(Debug, thiserror::Error)]
pub enum VxlError {
    /// The requested map dimensions cannot be represented.
    #[error("invalid map layout {width}x{height}x{depth} (chunk size {chunk_size})")]
    InvalidLayout {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Requested depth.
        depth: u32,
        /// Requested chunk footprint.
        chunk_size: u32,
    },

    /// The compressed data ended in the middle of a span.
    #[error("data truncated at offset {offset}: need {needed} bytes, have {len}")]
    Truncated {
        /// Offset of the span being read.
        offset: usize,
        /// Bytes required to finish the span.
        needed: usize,
        /// Total buffer length.
        len: usize,
    },

    /// A span header is inconsistent with the map depth or the column so far.
    #[error("malformed span in column ({x}, {y}) at offset {offset}: {reason}")]
    MalformedSpan {
        /// Column x.
        x: u32,
        /// Column y.
        y: u32,
        /// Offset of the offending header.
        offset: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The buffer is too short to hold a single span header.
    #[error("buffer of {len} bytes is too short to contain a span header")]
    TooShort {
        /// Buffer length.
        len: usize,
    },

    /// A stream was opened with a zero byte quota.
    #[error("stream quota must be at least one byte")]
    ZeroQuota,

    /// A stream read was given an empty buffer before the stream ended.
    #[error("cannot read from an unfinished stream into an empty buffer")]
    EmptyBuffer,

    /// Growing a chunk's block list failed.
    #[error("failed to grow block storage: {0}")]
    Alloc(#[from] TryReserveError),

    /// Reading or writing a map file failed.
    #[error("map I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
