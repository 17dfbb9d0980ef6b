use emblem_codec::CodecError;
use emblem_constraint_fmt::ConstraintFmtError;
use thiserror::Error;

/// Errors for decoding and encoding asset record types.
#[derive(Debug, Error)]
pub enum RecordFmtError {
    /// Not enough bytes left to read a record header.
    #[error("not enough bytes for a record header (at {at})")]
    MalformedHeader {
        /// Absolute offset the header read started at.
        at: usize,
    },

    /// Header kind field is not a known extension type.
    #[error("unknown extension type {0}")]
    UnknownExtensionType(u32),

    /// A declared length or boundary extends past the end of the buffer.
    #[error("record at {at} declares {declared} bytes but only {available} remain")]
    TruncatedPayload {
        /// Absolute offset of the record whose declaration is bad.
        at: usize,

        /// Number of payload bytes the record declared.
        declared: usize,

        /// Number of bytes actually available to it.
        available: usize,
    },

    /// A header's boundary lands before the end of its own payload.
    #[error("record at {at} places its boundary at {boundary}, before its payload end {payload_end}")]
    InvalidBoundary {
        /// Absolute offset of the offending header.
        at: usize,

        /// The declared boundary.
        boundary: usize,

        /// Absolute offset of the strict payload end.
        payload_end: usize,
    },

    /// Prefix discriminator byte is not part of the closed set.
    #[error("invalid discriminator byte {0}")]
    InvalidDiscriminator(u8),

    /// Prefix state byte is not part of the closed set.
    #[error("invalid state byte {0}")]
    InvalidState(u8),

    /// Prefix standard byte is not part of the closed set.
    #[error("invalid standard byte {0}")]
    InvalidStandard(u8),

    /// A type name string does not match any known variant.
    #[error("unknown type name `{0}`")]
    UnknownTypeName(String),

    /// A length-prefixed string field is not valid UTF-8.
    #[error("string field at {at} is not valid utf-8")]
    InvalidString {
        /// Absolute offset of the string's length byte.
        at: usize,
    },

    /// A string is too long for its one-byte length prefix.
    #[error("string field too long to encode ({0} bytes)")]
    OversizedString(usize),

    /// An extension payload is too large to frame.
    #[error("extension payload too large to frame ({0} bytes)")]
    OversizedPayload(usize),

    /// The requested operation is not provided by this layer.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Error from an embedded constraint tree.
    #[error("constraint: {0}")]
    Constraint(#[from] ConstraintFmtError),

    /// Low-level codec error.
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
}

/// Wrapper result type.
pub type RecordFmtResult<T> = Result<T, RecordFmtError>;
