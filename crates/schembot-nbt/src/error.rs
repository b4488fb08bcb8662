//! NBT parse errors.

use thiserror::Error;

/// Errors produced while inflating or walking a tag stream.
#[derive(Debug, Error)]
pub enum NbtError {
    /// Gzip inflation failed (missing magic, corrupt stream, I/O).
    #[error("gzip error: {0}")]
    Gzip(#[from] std::io::Error),

    /// Inflated stream exceeds the size cap.
    #[error("inflated data exceeds maximum of {0} bytes")]
    InflatedTooLarge(usize),

    /// Input ended mid-tag.
    #[error("unexpected end of data at byte {0}")]
    UnexpectedEof(usize),

    /// Tag id outside the defined range.
    #[error("unknown tag id {id} at byte {offset}")]
    UnknownTagId { id: u8, offset: usize },

    /// The stream does not start with a named compound.
    #[error("root tag must be a compound, found tag id {0}")]
    InvalidRoot(u8),

    /// Tag name or string payload is not valid UTF-8.
    #[error("invalid string data at byte {0}")]
    InvalidString(usize),

    /// A declared array/list length overruns the remaining input.
    #[error("declared length {len} exceeds remaining input {remaining}")]
    LengthOverrun { len: usize, remaining: usize },

    /// Compound/list nesting beyond the depth cap.
    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),
}
