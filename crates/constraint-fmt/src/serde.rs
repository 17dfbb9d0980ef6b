//! Serde serialization and deserialization for constraint trees.
//!
//! Both directions go through the wire codec so there is exactly one
//! canonical byte representation of a tree.
//!
//! ## Human-Readable Format (JSON, TOML, etc.)
//!
//! Trees are serialized as the lowercase hex encoding of their framed wire
//! bytes, e.g. `"0500000000000000"` for [`Constraint::Empty`].
//!
//! ## Binary Format (bincode, etc.)
//!
//! For non-human-readable formats, the framed wire bytes are serialized
//! directly as a byte string.

use std::fmt;

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Constraint, decode_constraint, encode_constraint};

impl Serialize for Constraint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = encode_constraint(self).map_err(serde::ser::Error::custom)?;
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(&bytes))
        } else {
            serializer.serialize_bytes(&bytes)
        }
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(&s)
                .map_err(|e| serde::de::Error::custom(format!("invalid hex encoding: {e}")))?
        } else {
            struct WireBytesVisitor;

            impl<'de> Visitor<'de> for WireBytesVisitor {
                type Value = Vec<u8>;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("constraint wire bytes")
                }

                fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(v.to_vec())
                }

                fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(v)
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                    while let Some(b) = seq.next_element()? {
                        bytes.push(b);
                    }
                    Ok(bytes)
                }
            }

            deserializer.deserialize_byte_buf(WireBytesVisitor)?
        };

        decode_constraint(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::AccountRef;

    #[test]
    fn test_serde_json() {
        let json = serde_json::to_string(&Constraint::Empty).unwrap();
        assert_eq!(json, r#""0500000000000000""#);

        let back: Constraint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Constraint::Empty);
    }

    #[test]
    fn test_serde_json_rejects_bad_hex() {
        let res: Result<Constraint, _> = serde_json::from_str(r#""zz""#);
        assert!(res.is_err());
    }

    #[test]
    fn test_bincode_roundtrip() {
        let constraint = Constraint::Or(vec![
            Constraint::Empty,
            Constraint::PubkeyMatch {
                account: AccountRef::Recipient,
                keys: vec![[9u8; 32]],
            },
        ]);

        let encoded = bincode::serialize(&constraint).unwrap();
        let decoded: Constraint = bincode::deserialize(&encoded).unwrap();
        assert_eq!(constraint, decoded);
    }

    fn arb_constraint() -> impl Strategy<Value = Constraint> {
        let leaf = prop_oneof![
            Just(Constraint::Empty),
            (prop::collection::vec(any::<[u8; 32]>(), 0..2)).prop_map(|owners| {
                Constraint::OwnedBy {
                    account: AccountRef::Asset,
                    owners,
                }
            }),
        ];
        leaf.prop_recursive(3, 12, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|c| Constraint::Not(Box::new(c))),
                prop::collection::vec(inner, 0..2).prop_map(Constraint::And),
            ]
        })
    }

    proptest! {
        #[test]
        fn proptest_serde_roundtrip(constraint in arb_constraint()) {
            let json = serde_json::to_vec(&constraint).unwrap();
            let from_json: Constraint = serde_json::from_slice(&json).unwrap();
            prop_assert_eq!(&constraint, &from_json);

            let bin = bincode::serialize(&constraint).unwrap();
            let from_bin: Constraint = bincode::deserialize(&bin).unwrap();
            prop_assert_eq!(&constraint, &from_bin);
        }
    }
}
