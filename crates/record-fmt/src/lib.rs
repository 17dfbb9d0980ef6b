//! This crate contains the types and logic for decoding emblem asset records:
//! the fixed prefix, the chain of type-tagged extension records appended
//! after it, and the delegate role bitmask embedded in the prefix.
//!
//! An asset record is laid out as a fixed 168-byte prefix followed by zero or
//! more extension records. Each extension is framed by a [`RecordHeader`]
//! whose `boundary` field gives the absolute offset of the next header,
//! possibly past the strict payload end to reserve forward-compatibility
//! padding. All integers are little-endian.

mod asset;
mod chain;
mod error;
mod extensions;
mod header;
mod registry;
mod roles;

pub use asset::{
    ASSET_NAME_LEN, ASSET_PREFIX_LEN, Asset, Delegate, Discriminator, FixedStr, Standard, State,
};
pub use chain::{AssetRecord, decode_asset_record, decode_extension_chain, encode_extension_chain};
pub use error::{RecordFmtError, RecordFmtResult};
pub use extensions::{
    Attributes, Blob, Creator, Creators, Extension, Grouping, Link, Links, Metadata, Royalties,
    Trait,
};
pub use header::{RECORD_HEADER_LEN, RecordHeader};
pub use registry::{ExtensionKind, SliceStrategy, decode_extension, encode_extension};
pub use roles::{DelegateRole, RoleMask};

pub use emblem_constraint_fmt::{PUBKEY_LEN, Pubkey};
