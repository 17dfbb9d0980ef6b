use thiserror::Error;

/// Errors from emblem-codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// If we tried to read past the end of the underlying buffer.
    #[error("would overrun end of input (at {at}, requested {requested}, remaining {remaining})")]
    OverrunInput {
        /// Absolute offset the read started at.
        at: usize,

        /// Number of bytes the read asked for.
        requested: usize,

        /// Number of bytes that were actually left.
        remaining: usize,
    },

    /// If there was extra data in a buffer that we didn't consume reading a
    /// value.
    #[error("extra unnecessary input leftover ({0} bytes)")]
    ExtraInput(usize),

    /// If we read a byte that isn't a variant of the target type.
    #[error("invalid variant byte for {0}")]
    InvalidVariant(&'static str),
}
