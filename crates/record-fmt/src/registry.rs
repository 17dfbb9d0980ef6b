//! Extension kind tags and the dispatch between kinds and payload codecs.

use core::fmt;

use crate::error::{RecordFmtError, RecordFmtResult};
use crate::extensions::{
    Attributes, Blob, Creators, Extension, Grouping, Links, Metadata, Royalties,
};

/// Extension type identifiers.
///
/// Each variant has a stable numeric value used in the record header's `kind`
/// field. The value `0` is the chain terminator, not an extension, so it has
/// no variant here.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// On-chain trait key/value pairs.
    Attributes = 1,

    /// An opaque typed byte blob.
    Blob = 2,

    /// Royalty-sharing creator list.
    Creators = 3,

    /// Named external links.
    Links = 4,

    /// Token-level metadata fields.
    Metadata = 5,

    /// Group membership counters.
    Grouping = 6,

    /// Royalty terms and enforcement constraint.
    Royalties = 7,
}

/// How a kind's decode slice is taken from the framed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceStrategy {
    /// Decode exactly the `length` bytes the header declares.
    Strict,

    /// Decode everything up to the header's `boundary`, padding included.
    PaddedToBoundary,
}

impl ExtensionKind {
    /// Converts the enum to its underlying u32 value.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Returns how this kind's payload slice is taken.
    ///
    /// `Grouping` is the one padding-compatible kind: its schema grew after
    /// records were already written, so its decode slice runs to the
    /// boundary. Nothing else gets this treatment.
    pub const fn slice_strategy(self) -> SliceStrategy {
        match self {
            ExtensionKind::Grouping => SliceStrategy::PaddedToBoundary,
            _ => SliceStrategy::Strict,
        }
    }
}

impl From<ExtensionKind> for u32 {
    fn from(kind: ExtensionKind) -> Self {
        kind as u32
    }
}

impl TryFrom<u32> for ExtensionKind {
    type Error = RecordFmtError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ExtensionKind::Attributes),
            2 => Ok(ExtensionKind::Blob),
            3 => Ok(ExtensionKind::Creators),
            4 => Ok(ExtensionKind::Links),
            5 => Ok(ExtensionKind::Metadata),
            6 => Ok(ExtensionKind::Grouping),
            7 => Ok(ExtensionKind::Royalties),
            unknown => Err(RecordFmtError::UnknownExtensionType(unknown)),
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionKind::Attributes => write!(f, "Attributes"),
            ExtensionKind::Blob => write!(f, "Blob"),
            ExtensionKind::Creators => write!(f, "Creators"),
            ExtensionKind::Links => write!(f, "Links"),
            ExtensionKind::Metadata => write!(f, "Metadata"),
            ExtensionKind::Grouping => write!(f, "Grouping"),
            ExtensionKind::Royalties => write!(f, "Royalties"),
        }
    }
}

/// Decodes one extension payload of the given kind.
///
/// The payload slice must already have been taken per the kind's
/// [`SliceStrategy`]; [`crate::decode_extension_chain`] does this.
pub fn decode_extension(kind: ExtensionKind, payload: &[u8]) -> RecordFmtResult<Extension> {
    Ok(match kind {
        ExtensionKind::Attributes => Extension::Attributes(Attributes::decode_payload(payload)?),
        ExtensionKind::Blob => Extension::Blob(Blob::decode_payload(payload)?),
        ExtensionKind::Creators => Extension::Creators(Creators::decode_payload(payload)?),
        ExtensionKind::Links => Extension::Links(Links::decode_payload(payload)?),
        ExtensionKind::Metadata => Extension::Metadata(Metadata::decode_payload(payload)?),
        ExtensionKind::Grouping => Extension::Grouping(Grouping::decode_payload(payload)?),
        ExtensionKind::Royalties => Extension::Royalties(Royalties::decode_payload(payload)?),
    })
}

/// Encodes one extension's payload bytes, without the framing header.
pub fn encode_extension(extension: &Extension) -> RecordFmtResult<Vec<u8>> {
    let mut out = Vec::new();
    match extension {
        Extension::Attributes(ext) => ext.encode_payload(&mut out)?,
        Extension::Blob(ext) => ext.encode_payload(&mut out)?,
        Extension::Creators(ext) => ext.encode_payload(&mut out)?,
        Extension::Links(ext) => ext.encode_payload(&mut out)?,
        Extension::Metadata(ext) => ext.encode_payload(&mut out)?,
        Extension::Grouping(ext) => ext.encode_payload(&mut out)?,
        Extension::Royalties(ext) => ext.encode_payload(&mut out)?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        // Check that all expected kind values are canonical
        let valid = [1, 2, 3, 4, 5, 6, 7];
        for raw in valid {
            let parsed = ExtensionKind::try_from(raw).unwrap();
            assert_eq!(parsed.as_u32(), raw);
        }

        // Zero is the terminator, never a kind.
        assert!(matches!(
            ExtensionKind::try_from(0),
            Err(RecordFmtError::UnknownExtensionType(0))
        ));
        assert!(ExtensionKind::try_from(8).is_err());
    }

    #[test]
    fn test_only_grouping_is_padded() {
        for raw in 1u32..=7 {
            let kind = ExtensionKind::try_from(raw).unwrap();
            let expected = if kind == ExtensionKind::Grouping {
                SliceStrategy::PaddedToBoundary
            } else {
                SliceStrategy::Strict
            };
            assert_eq!(kind.slice_strategy(), expected);
        }
    }

    #[test]
    fn test_dispatch_roundtrip() {
        let ext = Extension::Grouping(Grouping {
            size: 1,
            max_size: 8,
        });

        let payload = encode_extension(&ext).expect("test: encode");
        let back = decode_extension(ext.kind(), &payload).expect("test: decode");
        assert_eq!(back, ext);
    }
}
