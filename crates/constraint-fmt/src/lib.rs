//! # Emblem constraint format
//!
//! This crate implements the framed boolean expression trees that gate
//! royalty-bearing operations on emblem asset records. A constraint is a
//! recursively nested tree: composite nodes (`And`, `Or`, `Not`) own fully
//! framed children, leaf nodes (`OwnedBy`, `PubkeyMatch`) test one of the
//! accounts participating in the gated operation against a key list.
//!
//! ## Wire format
//!
//! Every node is framed by a [`ConstraintHeader`] (`type: u32, size: u32`,
//! little-endian) where `size` is the exact byte length of the payload that
//! follows. Composite payloads are the concatenation of the children's framed
//! bytes; leaf payloads are an [`AccountRef`] discriminant followed by packed
//! 32-byte keys.
//!
//! The encoding round-trips: `decode_constraint(encode_constraint(x)) == x`
//! for every well-formed tree.
//!
//! ## Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Constraint`] (hex string in
//!   human-readable formats, wire bytes otherwise)
//! - `borsh`: `BorshSerialize`/`BorshDeserialize` carrying the wire bytes
//! - `arbitrary`: depth-bounded tree generation for fuzzing

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod errors;
mod header;
mod tree;
mod type_ids;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "borsh")]
mod borsh;

#[cfg(feature = "arbitrary")]
mod arbitrary;

pub use errors::{ConstraintFmtError, ConstraintFmtResult};
pub use header::{CONSTRAINT_HEADER_LEN, ConstraintHeader};
pub use tree::{Constraint, MAX_CONSTRAINT_DEPTH, decode_constraint, encode_constraint};
pub use type_ids::{AccountRef, ConstraintType};

/// Length in bytes of a raw account key.
pub const PUBKEY_LEN: usize = 32;

/// Alias for raw 32-byte account keys as they appear on the wire.
pub type Pubkey = [u8; PUBKEY_LEN];
