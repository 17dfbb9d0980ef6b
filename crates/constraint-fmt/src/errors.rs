//! Error types for the constraint format library.

use emblem_codec::CodecError;
use thiserror::Error;

/// Errors from decoding and encoding constraint trees.
#[derive(Debug, Error)]
pub enum ConstraintFmtError {
    /// Not enough bytes left to read a constraint header.
    #[error("not enough bytes for a constraint header (at {at})")]
    MalformedHeader {
        /// Absolute offset the header read started at.
        at: usize,
    },

    /// Header type field is not a known constraint type.
    #[error("unknown constraint type {0}")]
    UnknownConstraintType(u32),

    /// Leaf payload names an account that is not part of the closed set.
    #[error("unknown account reference {0}")]
    UnknownAccountRef(u32),

    /// A declared payload size extends past the enclosing scope.
    #[error("payload at {at} declares {declared} bytes but only {available} remain")]
    TruncatedPayload {
        /// Absolute offset of the element whose size is bad.
        at: usize,

        /// Number of bytes the element declared.
        declared: usize,

        /// Number of bytes actually available to it.
        available: usize,
    },

    /// Bytes left over inside a scope after its content was decoded.
    #[error("trailing bytes inside constraint scope (at {at}, {count} bytes)")]
    TrailingBytes {
        /// Absolute offset of the first unconsumed byte.
        at: usize,

        /// Number of unconsumed bytes.
        count: usize,
    },

    /// Tree nesting went past the supported depth.
    #[error("constraint nesting exceeds the supported depth of {0}")]
    RecursionDepthExceeded(usize),

    /// A node payload is too large to frame.
    #[error("node payload too large to frame ({0} bytes)")]
    OversizedPayload(usize),

    /// Low-level codec error.
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
}

/// Wrapper result type.
pub type ConstraintFmtResult<T> = Result<T, ConstraintFmtError>;
