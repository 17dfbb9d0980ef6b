//! Extension payload types and their byte layouts.
//!
//! Each extension owns its decoded payload; the framing header is
//! [`crate::RecordHeader`] and the kind dispatch lives with
//! [`crate::ExtensionKind`]. Strings are u8-length-prefixed UTF-8
//! throughout.

use emblem_codec::{BufDecoder, Codec, CodecError, Decoder, Encoder};
use emblem_constraint_fmt::{Constraint, Pubkey, decode_constraint, encode_constraint};

use crate::error::{RecordFmtError, RecordFmtResult};
use crate::registry::ExtensionKind;

/// Encoded length of one [`Creator`] entry, reserved trailer included.
pub(crate) const CREATOR_RECORD_LEN: usize = 40;

/// One decoded extension record, tagged by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extension {
    /// On-chain trait key/value pairs.
    Attributes(Attributes),

    /// An opaque typed byte blob.
    Blob(Blob),

    /// Royalty-sharing creator list.
    Creators(Creators),

    /// Named external links.
    Links(Links),

    /// Token-level metadata fields.
    Metadata(Metadata),

    /// Group membership counters.
    Grouping(Grouping),

    /// Royalty terms and the constraint gating enforcement.
    Royalties(Royalties),
}

impl Extension {
    /// Returns the extension's kind tag.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Extension::Attributes(_) => ExtensionKind::Attributes,
            Extension::Blob(_) => ExtensionKind::Blob,
            Extension::Creators(_) => ExtensionKind::Creators,
            Extension::Links(_) => ExtensionKind::Links,
            Extension::Metadata(_) => ExtensionKind::Metadata,
            Extension::Grouping(_) => ExtensionKind::Grouping,
            Extension::Royalties(_) => ExtensionKind::Royalties,
        }
    }
}

/// A single trait entry in an [`Attributes`] extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trait {
    /// Trait name.
    pub name: String,

    /// Trait value.
    pub value: String,
}

/// Repeated (name, value) trait pairs filling the payload.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Attributes {
    /// Traits in payload order.
    pub traits: Vec<Trait>,
}

impl Attributes {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let mut traits = Vec::new();
        while dec.remaining() > 0 {
            let name = decode_string(&mut dec)?;
            let value = decode_string(&mut dec)?;
            traits.push(Trait { name, value });
        }
        Ok(Self { traits })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        for t in &self.traits {
            encode_string(&t.name, out)?;
            encode_string(&t.value, out)?;
        }
        Ok(())
    }
}

/// An opaque byte blob with a content type, e.g. inlined image data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    /// MIME-style content type.
    pub content_type: String,

    /// Raw blob bytes, everything after the content type.
    pub data: Vec<u8>,
}

impl Blob {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let content_type = decode_string(&mut dec)?;
        let data = dec.read_rest()?;
        Ok(Self { content_type, data })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        encode_string(&self.content_type, out)?;
        out.write_buf(&self.data)?;
        Ok(())
    }
}

/// One royalty-sharing creator.
///
/// On the wire each entry is a fixed 40-byte record: the key, a verified
/// flag, the share, then six reserved bytes. The reserved bytes are not
/// interpreted on decode and are written as zero on encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    /// Creator key.
    pub address: Pubkey,

    /// Whether the creator has countersigned.
    pub verified: bool,

    /// Royalty share in percent.
    pub share: u8,
}

impl Creator {
    fn decode(dec: &mut impl Decoder) -> RecordFmtResult<Self> {
        let address = Pubkey::decode(dec)?;
        let verified = bool::decode(dec)?;
        let share = u8::decode(dec)?;
        let _reserved = dec.read_arr::<6>()?;
        Ok(Self {
            address,
            verified,
            share,
        })
    }

    fn encode(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        self.address.encode(out)?;
        self.verified.encode(out)?;
        self.share.encode(out)?;
        out.write_buf(&[0u8; 6])?;
        Ok(())
    }
}

/// Fixed-size creator entries filling the payload.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Creators {
    /// Creators in payload order.
    pub creators: Vec<Creator>,
}

impl Creators {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let mut creators = Vec::with_capacity(payload.len() / CREATOR_RECORD_LEN);
        while dec.remaining() > 0 {
            creators.push(Creator::decode(&mut dec)?);
        }
        Ok(Self { creators })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        for creator in &self.creators {
            creator.encode(out)?;
        }
        Ok(())
    }
}

/// A single named link in a [`Links`] extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Link name, e.g. `"website"`.
    pub name: String,

    /// Link target.
    pub uri: String,
}

/// Repeated (name, uri) pairs filling the payload.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Links {
    /// Links in payload order.
    pub links: Vec<Link>,
}

impl Links {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let mut links = Vec::new();
        while dec.remaining() > 0 {
            let name = decode_string(&mut dec)?;
            let uri = decode_string(&mut dec)?;
            links.push(Link { name, uri });
        }
        Ok(Self { links })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        for link in &self.links {
            encode_string(&link.name, out)?;
            encode_string(&link.uri, out)?;
        }
        Ok(())
    }
}

/// Token-level descriptive metadata.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Ticker-style symbol.
    pub symbol: String,

    /// Free-form description.
    pub description: String,

    /// Off-chain metadata URI.
    pub uri: String,
}

impl Metadata {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let symbol = decode_string(&mut dec)?;
        let description = decode_string(&mut dec)?;
        let uri = decode_string(&mut dec)?;
        if dec.remaining() > 0 {
            return Err(CodecError::ExtraInput(dec.remaining()).into());
        }
        Ok(Self {
            symbol,
            description,
            uri,
        })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        encode_string(&self.symbol, out)?;
        encode_string(&self.description, out)?;
        encode_string(&self.uri, out)?;
        Ok(())
    }
}

/// Group membership counters.
///
/// This is the one padding-compatible extension: records written under the
/// original schema carry only `size`, and their headers reserve room up to
/// `boundary` for the fields added since. Decoding therefore reads `size`,
/// reads `max_size` when present (zero otherwise), and ignores whatever
/// padding follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Grouping {
    /// Current number of members.
    pub size: u64,

    /// Maximum membership, `0` for unbounded.
    pub max_size: u64,
}

impl Grouping {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let size = u64::decode(&mut dec)?;
        let max_size = if dec.remaining() >= 8 {
            u64::decode(&mut dec)?
        } else {
            0
        };
        Ok(Self { size, max_size })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        self.size.encode(out)?;
        self.max_size.encode(out)?;
        Ok(())
    }
}

/// Royalty terms: the basis points owed and the constraint tree gating the
/// operations they apply to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Royalties {
    /// Royalty rate in basis points.
    pub basis_points: u64,

    /// Constraint gating enforcement, framed after the rate.
    pub constraint: Constraint,
}

impl Royalties {
    pub(crate) fn decode_payload(payload: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(payload);
        let basis_points = u64::decode(&mut dec)?;
        let rest = dec.read_rest()?;
        let constraint = decode_constraint(&rest)?;
        Ok(Self {
            basis_points,
            constraint,
        })
    }

    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) -> RecordFmtResult<()> {
        self.basis_points.encode(out)?;
        out.write_buf(&encode_constraint(&self.constraint)?)?;
        Ok(())
    }
}

fn decode_string(dec: &mut impl Decoder) -> RecordFmtResult<String> {
    let at = dec.position();
    let len = u8::decode(dec)? as usize;
    let mut bytes = vec![0u8; len];
    dec.read_buf(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| RecordFmtError::InvalidString { at })
}

fn encode_string(s: &str, out: &mut Vec<u8>) -> RecordFmtResult<()> {
    let len = u8::try_from(s.len()).map_err(|_| RecordFmtError::OversizedString(s.len()))?;
    len.encode(out)?;
    out.write_buf(s.as_bytes())?;
    Ok(())
}
