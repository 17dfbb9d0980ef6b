//! Special purpose binary encoding framework for the emblem wire formats.
//!
//! Everything in the record and constraint layouts is little-endian, so the
//! primitive impls here are too.

mod errors;
pub use errors::CodecError;

mod types;
pub use types::{Codec, Decoder, Encoder};

mod buf_decoder;
pub use buf_decoder::BufDecoder;

mod macros;

mod util;
pub use util::{decode_buf_exact, encode_to_vec};

#[cfg(test)]
mod tests;
