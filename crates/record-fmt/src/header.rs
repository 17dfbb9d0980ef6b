//! Framing header shared by every extension record.

use emblem_codec::{decode_buf_exact, impl_type_flat_struct};

use crate::error::{RecordFmtError, RecordFmtResult};

/// Encoded length of a [`RecordHeader`].
pub const RECORD_HEADER_LEN: usize = 16;

impl_type_flat_struct! {
    /// Framing for a single extension record.
    ///
    /// `length` is the strict byte length of the payload that follows;
    /// `boundary` is the absolute offset of the *next* header, which may lie
    /// past the payload end to reserve forward-compatibility padding. The
    /// chain walker enforces `boundary >= header offset + 16 + length`.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct RecordHeader {
        kind: u32,
        length: u32,
        boundary: u32,
        reserved: u32,
    }
}

impl RecordHeader {
    /// Decodes a header starting at an absolute offset into a buffer.
    ///
    /// Fails with [`RecordFmtError::MalformedHeader`] if fewer than
    /// [`RECORD_HEADER_LEN`] bytes remain at that offset.
    pub fn decode_at(buf: &[u8], at: usize) -> RecordFmtResult<Self> {
        let end = at
            .checked_add(RECORD_HEADER_LEN)
            .filter(|end| *end <= buf.len())
            .ok_or(RecordFmtError::MalformedHeader { at })?;

        decode_buf_exact(&buf[at..end]).map_err(|_| RecordFmtError::MalformedHeader { at })
    }
}
