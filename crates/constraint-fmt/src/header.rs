//! Framing header shared by every constraint node.

use emblem_codec::{decode_buf_exact, impl_type_flat_struct};

use crate::errors::{ConstraintFmtError, ConstraintFmtResult};

/// Encoded length of a [`ConstraintHeader`].
pub const CONSTRAINT_HEADER_LEN: usize = 8;

impl_type_flat_struct! {
    /// Framing for a single constraint node.
    ///
    /// `size` is the exact byte length of the payload that follows, not
    /// including the header itself.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct ConstraintHeader {
        ty: u32,
        size: u32,
    }
}

impl ConstraintHeader {
    /// Decodes a header starting at an absolute offset into a buffer.
    ///
    /// Fails with [`ConstraintFmtError::MalformedHeader`] if fewer than
    /// [`CONSTRAINT_HEADER_LEN`] bytes remain at that offset.
    pub fn decode_at(buf: &[u8], at: usize) -> ConstraintFmtResult<Self> {
        let end = at
            .checked_add(CONSTRAINT_HEADER_LEN)
            .filter(|end| *end <= buf.len())
            .ok_or(ConstraintFmtError::MalformedHeader { at })?;

        decode_buf_exact(&buf[at..end]).map_err(|_| ConstraintFmtError::MalformedHeader { at })
    }
}

#[cfg(test)]
mod tests {
    use emblem_codec::encode_to_vec;

    use super::*;

    #[test]
    fn test_header_layout() {
        let header = ConstraintHeader::new(3, 0x0102);
        let buf = encode_to_vec(&header).expect("test: encode");
        assert_eq!(buf, vec![3, 0, 0, 0, 0x02, 0x01, 0, 0]);
    }

    #[test]
    fn test_decode_at_offset() {
        let mut buf = vec![0xaa; 4];
        buf.extend_from_slice(&[5, 0, 0, 0, 0, 0, 0, 0]);

        let header = ConstraintHeader::decode_at(&buf, 4).expect("test: decode");
        assert_eq!(*header.ty(), 5);
        assert_eq!(*header.size(), 0);
    }

    #[test]
    fn test_decode_short_buffer() {
        let buf = [0u8; 7];
        assert!(matches!(
            ConstraintHeader::decode_at(&buf, 0),
            Err(ConstraintFmtError::MalformedHeader { at: 0 })
        ));
        assert!(matches!(
            ConstraintHeader::decode_at(&buf, usize::MAX),
            Err(ConstraintFmtError::MalformedHeader { .. })
        ));
    }
}
