//! Walking and building extension chains, and the full-record compose.

use emblem_codec::encode_to_vec;

use crate::asset::{ASSET_PREFIX_LEN, Asset};
use crate::error::{RecordFmtError, RecordFmtResult};
use crate::extensions::Extension;
use crate::header::{RECORD_HEADER_LEN, RecordHeader};
use crate::registry::{ExtensionKind, SliceStrategy, decode_extension, encode_extension};

/// Decodes the chain of extension records starting at an absolute offset.
///
/// The walk stops at the end of the buffer or at a header whose `kind` is
/// zero, whichever comes first; a terminator is optional. Records come back
/// in encounter order, repeated kinds included; nothing is reordered or
/// deduplicated here.
///
/// Fails fast at the first malformed record: a header that doesn't fit is
/// [`RecordFmtError::MalformedHeader`], a declared `length` or `boundary`
/// past the buffer end is [`RecordFmtError::TruncatedPayload`], and a
/// boundary landing inside its own payload is
/// [`RecordFmtError::InvalidBoundary`].
pub fn decode_extension_chain(buf: &[u8], at: usize) -> RecordFmtResult<Vec<Extension>> {
    let mut extensions = Vec::new();
    let mut at = at;

    while at < buf.len() {
        let header = RecordHeader::decode_at(buf, at)?;
        if *header.kind() == 0 {
            break;
        }
        let kind = ExtensionKind::try_from(*header.kind())?;

        let payload_start = at + RECORD_HEADER_LEN;
        let length = *header.length() as usize;
        let boundary = *header.boundary() as usize;

        let payload_end = payload_start
            .checked_add(length)
            .filter(|end| *end <= buf.len())
            .ok_or(RecordFmtError::TruncatedPayload {
                at,
                declared: length,
                available: buf.len() - payload_start,
            })?;

        if boundary < payload_end {
            return Err(RecordFmtError::InvalidBoundary {
                at,
                boundary,
                payload_end,
            });
        }
        if boundary > buf.len() {
            return Err(RecordFmtError::TruncatedPayload {
                at,
                declared: boundary - payload_start,
                available: buf.len() - payload_start,
            });
        }

        let payload = match kind.slice_strategy() {
            SliceStrategy::Strict => &buf[payload_start..payload_end],
            SliceStrategy::PaddedToBoundary => &buf[payload_start..boundary],
        };

        extensions.push(decode_extension(kind, payload)?);
        at = boundary;
    }

    Ok(extensions)
}

/// Encodes extensions as a chain of framed records.
///
/// `at` is the absolute offset the chain will live at, so the emitted
/// `boundary` fields come out absolute like the decoder expects. Headers are
/// strict: each boundary sits exactly at the payload end, with no reserved
/// padding, and no terminator record is appended.
pub fn encode_extension_chain(extensions: &[Extension], at: usize) -> RecordFmtResult<Vec<u8>> {
    let mut out = Vec::new();

    for extension in extensions {
        let payload = encode_extension(extension)?;
        let length = u32::try_from(payload.len())
            .map_err(|_| RecordFmtError::OversizedPayload(payload.len()))?;

        let next_at = at + out.len() + RECORD_HEADER_LEN + payload.len();
        let boundary =
            u32::try_from(next_at).map_err(|_| RecordFmtError::OversizedPayload(next_at))?;

        let header = RecordHeader::new(extension.kind().as_u32(), length, boundary, 0);
        out.extend_from_slice(&encode_to_vec(&header)?);
        out.extend_from_slice(&payload);
    }

    Ok(out)
}

/// A fully decoded asset record: the fixed prefix plus its extension chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRecord {
    asset: Asset,
    extensions: Vec<Extension>,
}

impl AssetRecord {
    /// Gets the decoded prefix.
    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    /// Gets the decoded extensions, in encounter order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }
}

/// Decodes a whole record buffer: the fixed prefix, then the extension chain
/// that follows it.
pub fn decode_asset_record(buf: &[u8]) -> RecordFmtResult<AssetRecord> {
    let asset = Asset::decode_prefix(buf)?;
    let extensions = decode_extension_chain(buf, ASSET_PREFIX_LEN)?;
    Ok(AssetRecord { asset, extensions })
}
