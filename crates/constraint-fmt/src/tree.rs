//! Recursive encode/decode of constraint expression trees.

use emblem_codec::{Codec, Encoder};

use crate::errors::{ConstraintFmtError, ConstraintFmtResult};
use crate::header::{CONSTRAINT_HEADER_LEN, ConstraintHeader};
use crate::type_ids::{AccountRef, ConstraintType};
use crate::{PUBKEY_LEN, Pubkey};

/// Maximum nesting depth accepted by both the encoder and the decoder.
///
/// The wire format itself has no depth bound; this is a defensive limit so
/// adversarial input fails with an error instead of exhausting the call
/// stack.
pub const MAX_CONSTRAINT_DEPTH: usize = 32;

/// A node in a constraint expression tree.
///
/// Composite nodes own fully self-framed children; the tree is immutable
/// after construction and is always built bottom-up, so no cycles are
/// possible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// No condition; always holds.
    Empty,

    /// Negation of exactly one child.
    Not(Box<Constraint>),

    /// Conjunction over any number of children.
    And(Vec<Constraint>),

    /// Disjunction over any number of children.
    Or(Vec<Constraint>),

    /// Holds when the referenced account is owned by one of the listed keys.
    OwnedBy {
        /// Which participating account to test.
        account: AccountRef,

        /// Accepted owner keys.
        owners: Vec<Pubkey>,
    },

    /// Holds when the referenced account's key is one of the listed keys.
    PubkeyMatch {
        /// Which participating account to test.
        account: AccountRef,

        /// Accepted keys.
        keys: Vec<Pubkey>,
    },
}

impl Constraint {
    /// Returns the node's type tag.
    pub fn ty(&self) -> ConstraintType {
        match self {
            Constraint::Empty => ConstraintType::Empty,
            Constraint::Not(_) => ConstraintType::Not,
            Constraint::And(_) => ConstraintType::And,
            Constraint::Or(_) => ConstraintType::Or,
            Constraint::OwnedBy { .. } => ConstraintType::OwnedBy,
            Constraint::PubkeyMatch { .. } => ConstraintType::PubkeyMatch,
        }
    }
}

/// Encodes a constraint tree into its framed wire bytes.
///
/// Fails with [`ConstraintFmtError::RecursionDepthExceeded`] if the tree
/// nests deeper than [`MAX_CONSTRAINT_DEPTH`].
pub fn encode_constraint(constraint: &Constraint) -> ConstraintFmtResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode_node(constraint, &mut buf, 0)?;
    Ok(buf)
}

fn encode_node(
    constraint: &Constraint,
    out: &mut Vec<u8>,
    depth: usize,
) -> ConstraintFmtResult<()> {
    if depth >= MAX_CONSTRAINT_DEPTH {
        return Err(ConstraintFmtError::RecursionDepthExceeded(
            MAX_CONSTRAINT_DEPTH,
        ));
    }

    let mut payload = Vec::new();
    match constraint {
        Constraint::Empty => {}
        Constraint::Not(child) => {
            encode_node(child, &mut payload, depth + 1)?;
        }
        Constraint::And(children) | Constraint::Or(children) => {
            for child in children {
                encode_node(child, &mut payload, depth + 1)?;
            }
        }
        Constraint::OwnedBy { account, owners } => {
            encode_leaf_payload(*account, owners, &mut payload)?;
        }
        Constraint::PubkeyMatch { account, keys } => {
            encode_leaf_payload(*account, keys, &mut payload)?;
        }
    }

    let size = u32::try_from(payload.len())
        .map_err(|_| ConstraintFmtError::OversizedPayload(payload.len()))?;
    let header = ConstraintHeader::new(constraint.ty().as_u32(), size);
    header.encode(out)?;
    out.write_buf(&payload)?;
    Ok(())
}

fn encode_leaf_payload(
    account: AccountRef,
    keys: &[Pubkey],
    payload: &mut Vec<u8>,
) -> ConstraintFmtResult<()> {
    account.as_u32().encode(payload)?;
    for key in keys {
        payload.extend_from_slice(key);
    }
    Ok(())
}

/// Decodes a constraint tree from its framed wire bytes, consuming the whole
/// buffer.
///
/// Decoding fails fast at the first malformed element; errors report the
/// absolute offset of the element at fault.
pub fn decode_constraint(buf: &[u8]) -> ConstraintFmtResult<Constraint> {
    let (constraint, end) = decode_node(buf, 0, buf.len(), 0)?;
    if end != buf.len() {
        return Err(ConstraintFmtError::TrailingBytes {
            at: end,
            count: buf.len() - end,
        });
    }
    Ok(constraint)
}

/// Decodes one framed node starting at `at`, never reading at or past
/// `limit`.  Returns the node and the offset just past its payload.
fn decode_node(
    buf: &[u8],
    at: usize,
    limit: usize,
    depth: usize,
) -> ConstraintFmtResult<(Constraint, usize)> {
    if depth >= MAX_CONSTRAINT_DEPTH {
        return Err(ConstraintFmtError::RecursionDepthExceeded(
            MAX_CONSTRAINT_DEPTH,
        ));
    }

    if at.checked_add(CONSTRAINT_HEADER_LEN).is_none_or(|end| end > limit) {
        return Err(ConstraintFmtError::MalformedHeader { at });
    }
    let header = ConstraintHeader::decode_at(buf, at)?;
    let ty = ConstraintType::try_from(*header.ty())?;

    let size = *header.size() as usize;
    let body_start = at + CONSTRAINT_HEADER_LEN;
    let body_end = body_start
        .checked_add(size)
        .filter(|end| *end <= limit)
        .ok_or(ConstraintFmtError::TruncatedPayload {
            at,
            declared: size,
            available: limit - body_start,
        })?;

    let constraint = match ty {
        // Tolerates a nonzero payload; there is nothing in it to interpret.
        ConstraintType::Empty => Constraint::Empty,
        ConstraintType::Not => {
            let (child, child_end) = decode_node(buf, body_start, body_end, depth + 1)?;
            if child_end != body_end {
                return Err(ConstraintFmtError::TrailingBytes {
                    at: child_end,
                    count: body_end - child_end,
                });
            }
            Constraint::Not(Box::new(child))
        }
        ConstraintType::And | ConstraintType::Or => {
            let mut children = Vec::new();
            let mut cursor = body_start;
            while cursor < body_end {
                let (child, next) = decode_node(buf, cursor, body_end, depth + 1)?;
                children.push(child);
                cursor = next;
            }

            if ty == ConstraintType::And {
                Constraint::And(children)
            } else {
                Constraint::Or(children)
            }
        }
        ConstraintType::OwnedBy => {
            let (account, owners) = decode_leaf_payload(buf, body_start, body_end)?;
            Constraint::OwnedBy { account, owners }
        }
        ConstraintType::PubkeyMatch => {
            let (account, keys) = decode_leaf_payload(buf, body_start, body_end)?;
            Constraint::PubkeyMatch { account, keys }
        }
    };

    Ok((constraint, body_end))
}

fn decode_leaf_payload(
    buf: &[u8],
    body_start: usize,
    body_end: usize,
) -> ConstraintFmtResult<(AccountRef, Vec<Pubkey>)> {
    if body_start + 4 > body_end {
        return Err(ConstraintFmtError::TruncatedPayload {
            at: body_start,
            declared: 4,
            available: body_end - body_start,
        });
    }

    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[body_start..body_start + 4]);
    let account = AccountRef::try_from(u32::from_le_bytes(raw))?;

    let keys_start = body_start + 4;
    let keys_len = body_end - keys_start;
    if keys_len % PUBKEY_LEN != 0 {
        return Err(ConstraintFmtError::TruncatedPayload {
            at: keys_start + (keys_len / PUBKEY_LEN) * PUBKEY_LEN,
            declared: PUBKEY_LEN,
            available: keys_len % PUBKEY_LEN,
        });
    }

    let mut keys = Vec::with_capacity(keys_len / PUBKEY_LEN);
    for chunk in buf[keys_start..body_end].chunks_exact(PUBKEY_LEN) {
        let mut key = [0u8; PUBKEY_LEN];
        key.copy_from_slice(chunk);
        keys.push(key);
    }

    Ok((account, keys))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn key(fill: u8) -> Pubkey {
        [fill; PUBKEY_LEN]
    }

    #[test]
    fn test_leaf_wire_layout() {
        let constraint = Constraint::OwnedBy {
            account: AccountRef::Authority,
            owners: vec![key(7)],
        };

        let buf = encode_constraint(&constraint).expect("test: encode");

        // Header: type OwnedBy (3), size 4 + 32.
        assert_eq!(&buf[..8], &[3, 0, 0, 0, 36, 0, 0, 0]);
        // Payload: account Authority (1) then the packed key.
        assert_eq!(&buf[8..12], &[1, 0, 0, 0]);
        assert_eq!(&buf[12..], &[7u8; 32]);
    }

    #[test]
    fn test_empty_wire_layout() {
        let buf = encode_constraint(&Constraint::Empty).expect("test: encode");
        assert_eq!(buf, vec![5, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_nested_roundtrip() {
        // Three levels: And over a leaf and a negated leaf.
        let constraint = Constraint::And(vec![
            Constraint::OwnedBy {
                account: AccountRef::Asset,
                owners: vec![key(1), key(2)],
            },
            Constraint::Not(Box::new(Constraint::PubkeyMatch {
                account: AccountRef::Recipient,
                keys: vec![key(3)],
            })),
        ]);

        let buf = encode_constraint(&constraint).expect("test: encode");
        let decoded = decode_constraint(&buf).expect("test: decode");
        assert_eq!(decoded, constraint);
    }

    #[test]
    fn test_empty_composites_roundtrip() {
        for constraint in [
            Constraint::And(vec![]),
            Constraint::Or(vec![]),
            Constraint::OwnedBy {
                account: AccountRef::Asset,
                owners: vec![],
            },
        ] {
            let buf = encode_constraint(&constraint).expect("test: encode");
            let decoded = decode_constraint(&buf).expect("test: decode");
            assert_eq!(decoded, constraint);
        }
    }

    #[test]
    fn test_encode_depth_bound() {
        let mut constraint = Constraint::Empty;
        for _ in 0..MAX_CONSTRAINT_DEPTH {
            constraint = Constraint::Not(Box::new(constraint));
        }

        assert!(matches!(
            encode_constraint(&constraint),
            Err(ConstraintFmtError::RecursionDepthExceeded(_))
        ));
    }

    #[test]
    fn test_decode_depth_bound() {
        // Build an over-deep chain of Not frames by hand, innermost first.
        let mut buf = encode_constraint(&Constraint::Empty).expect("test: encode");
        for _ in 0..MAX_CONSTRAINT_DEPTH {
            let mut framed = vec![1, 0, 0, 0];
            framed.extend_from_slice(&(buf.len() as u32).to_le_bytes());
            framed.extend_from_slice(&buf);
            buf = framed;
        }

        assert!(matches!(
            decode_constraint(&buf),
            Err(ConstraintFmtError::RecursionDepthExceeded(_))
        ));
    }

    #[test]
    fn test_decode_truncated_payload() {
        // Header declares 10 payload bytes; only 4 follow.
        let mut buf = vec![0, 0, 0, 0, 10, 0, 0, 0];
        buf.extend_from_slice(&[0xaa; 4]);

        match decode_constraint(&buf).expect_err("test: expected error") {
            ConstraintFmtError::TruncatedPayload {
                at,
                declared,
                available,
            } => {
                assert_eq!(at, 0);
                assert_eq!(declared, 10);
                assert_eq!(available, 4);
            }
            e => panic!("test: unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_decode_unknown_type() {
        let buf = [9, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            decode_constraint(&buf),
            Err(ConstraintFmtError::UnknownConstraintType(9))
        ));
    }

    #[test]
    fn test_decode_misaligned_key_list() {
        // OwnedBy payload with 4 account bytes and a half key.
        let mut buf = vec![3, 0, 0, 0, 20, 0, 0, 0];
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&[0xbb; 16]);

        assert!(matches!(
            decode_constraint(&buf),
            Err(ConstraintFmtError::TruncatedPayload { .. })
        ));
    }

    #[test]
    fn test_decode_trailing_bytes_in_not() {
        // A Not frame whose scope holds a child plus one stray byte.
        let child = encode_constraint(&Constraint::Empty).expect("test: encode");
        let mut buf = vec![1, 0, 0, 0];
        buf.extend_from_slice(&((child.len() + 1) as u32).to_le_bytes());
        buf.extend_from_slice(&child);
        buf.push(0xff);

        match decode_constraint(&buf).expect_err("test: expected error") {
            ConstraintFmtError::TrailingBytes { at, count } => {
                assert_eq!(at, 16);
                assert_eq!(count, 1);
            }
            e => panic!("test: unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_decode_trailing_bytes_after_root() {
        let mut buf = encode_constraint(&Constraint::Empty).expect("test: encode");
        buf.push(0);

        assert!(matches!(
            decode_constraint(&buf),
            Err(ConstraintFmtError::TrailingBytes { at: 8, count: 1 })
        ));
    }

    fn arb_account() -> impl Strategy<Value = AccountRef> {
        prop_oneof![
            Just(AccountRef::Asset),
            Just(AccountRef::Authority),
            Just(AccountRef::Recipient),
        ]
    }

    fn arb_keys() -> impl Strategy<Value = Vec<Pubkey>> {
        prop::collection::vec(any::<[u8; PUBKEY_LEN]>(), 0..3)
    }

    fn arb_constraint() -> impl Strategy<Value = Constraint> {
        let leaf = prop_oneof![
            Just(Constraint::Empty),
            (arb_account(), arb_keys())
                .prop_map(|(account, owners)| Constraint::OwnedBy { account, owners }),
            (arb_account(), arb_keys())
                .prop_map(|(account, keys)| Constraint::PubkeyMatch { account, keys }),
        ];

        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(|c| Constraint::Not(Box::new(c))),
                prop::collection::vec(inner.clone(), 0..3).prop_map(Constraint::And),
                prop::collection::vec(inner, 0..3).prop_map(Constraint::Or),
            ]
        })
    }

    proptest! {
        #[test]
        fn proptest_roundtrip(constraint in arb_constraint()) {
            let buf = encode_constraint(&constraint).expect("test: encode");
            let decoded = decode_constraint(&buf).expect("test: decode");
            prop_assert_eq!(decoded, constraint);
        }
    }
}
