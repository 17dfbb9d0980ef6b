//! The fixed asset record prefix that precedes the extension chain.
//!
//! The prefix layout is frozen at 168 bytes; this layer decodes it but never
//! rebuilds it, since records are only ever patched field-wise by their
//! owning program.

use core::fmt;
use std::str::FromStr;

use emblem_codec::{BufDecoder, Codec, CodecError, Decoder, Encoder};
use emblem_constraint_fmt::Pubkey;

use crate::error::{RecordFmtError, RecordFmtResult};
use crate::roles::RoleMask;

/// Byte width of the fixed-size asset name field.
pub const ASSET_NAME_LEN: usize = 35;

/// Encoded length of the fixed prefix, from the discriminator through the
/// name field.
pub const ASSET_PREFIX_LEN: usize = 168;

/// Account discriminator byte at the head of every record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    /// The account has been allocated but holds no record yet.
    Uninitialized = 0,

    /// The account holds an asset record.
    Asset = 1,
}

/// Lock state of an asset.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The asset can be operated on.
    Unlocked = 0,

    /// Transfers and burns are suspended.
    Locked = 1,
}

/// Which behavioral standard an asset follows.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standard {
    /// A plain non-fungible asset.
    NonFungible = 0,

    /// Group-managed; the group authority retains control.
    Managed = 1,

    /// Permanently bound to its holder.
    Soulbound = 2,
}

macro_rules! impl_prefix_enum {
    ($name:ident, $err:ident, { $( $variant:ident = $value:literal, )* }) => {
        impl $name {
            /// Converts the enum to its underlying u8 value.
            pub const fn as_u8(self) -> u8 {
                self as u8
            }
        }

        impl From<$name> for u8 {
            fn from(v: $name) -> Self {
                v as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = RecordFmtError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok($name::$variant), )*
                    invalid => Err(RecordFmtError::$err(invalid)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $name::$variant => write!(f, stringify!($variant)), )*
                }
            }
        }

        impl FromStr for $name {
            type Err = RecordFmtError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok($name::$variant), )*
                    unknown => Err(RecordFmtError::UnknownTypeName(unknown.to_string())),
                }
            }
        }
    };
}

impl_prefix_enum!(Discriminator, InvalidDiscriminator, {
    Uninitialized = 0,
    Asset = 1,
});

impl_prefix_enum!(State, InvalidState, {
    Unlocked = 0,
    Locked = 1,
});

impl_prefix_enum!(Standard, InvalidStandard, {
    NonFungible = 0,
    Managed = 1,
    Soulbound = 2,
});

/// Fixed-width NUL-padded string field.
///
/// The raw bytes round-trip losslessly; [`FixedStr::as_str`] is a trimmed
/// view that is `None` when the content is not UTF-8.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedStr<const N: usize>([u8; N]);

impl<const N: usize> FixedStr<N> {
    /// Builds a field from a string, padding with NULs.
    ///
    /// Fails with [`RecordFmtError::OversizedString`] if the string does not
    /// fit.
    pub fn new(s: &str) -> RecordFmtResult<Self> {
        if s.len() > N {
            return Err(RecordFmtError::OversizedString(s.len()));
        }

        let mut raw = [0u8; N];
        raw[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Self(raw))
    }

    /// Returns the raw padded bytes.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Returns the content with trailing NUL padding trimmed, or `None` if
    /// it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        core::str::from_utf8(&self.0[..end]).ok()
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "FixedStr({s:?})"),
            None => write!(f, "FixedStr({:?})", &self.0[..]),
        }
    }
}

impl<const N: usize> Codec for FixedStr<N> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        dec.read_arr::<N>().map(Self)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        enc.write_buf(&self.0)
    }
}

emblem_codec::impl_type_flat_struct! {
    /// A delegate authorized on an asset: its address and granted roles.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Delegate {
        address: Pubkey,
        roles: RoleMask,
    }
}

/// Decoded fixed prefix of an asset record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    discriminator: Discriminator,
    state: State,
    standard: Standard,
    mutable: bool,
    holder: Pubkey,
    group: Pubkey,
    authority: Pubkey,
    delegate: Delegate,
    name: FixedStr<ASSET_NAME_LEN>,
}

impl Asset {
    /// Decodes the fixed prefix from the head of a record buffer.
    ///
    /// Only the first [`ASSET_PREFIX_LEN`] bytes are touched; anything past
    /// them is the extension chain, left for
    /// [`crate::decode_extension_chain`].
    pub fn decode_prefix(buf: &[u8]) -> RecordFmtResult<Self> {
        let mut dec = BufDecoder::new(buf);

        let discriminator = Discriminator::try_from(u8::decode(&mut dec)?)?;
        let state = State::try_from(u8::decode(&mut dec)?)?;
        let standard = Standard::try_from(u8::decode(&mut dec)?)?;
        let mutable = bool::decode(&mut dec)?;
        let holder = Pubkey::decode(&mut dec)?;
        let group = Pubkey::decode(&mut dec)?;
        let authority = Pubkey::decode(&mut dec)?;
        let delegate = Delegate::decode(&mut dec)?;
        let name = FixedStr::decode(&mut dec)?;

        Ok(Self {
            discriminator,
            state,
            standard,
            mutable,
            holder,
            group,
            authority,
            delegate,
            name,
        })
    }

    /// Always fails with [`RecordFmtError::UnsupportedOperation`].
    ///
    /// Records are patched field-wise by their owning program; this layer
    /// never rebuilds one wholesale.
    pub fn encode(&self) -> RecordFmtResult<Vec<u8>> {
        Err(RecordFmtError::UnsupportedOperation(
            "asset prefixes are decode-only",
        ))
    }

    /// Gets the discriminator.
    pub fn discriminator(&self) -> Discriminator {
        self.discriminator
    }

    /// Gets the lock state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Gets the behavioral standard.
    pub fn standard(&self) -> Standard {
        self.standard
    }

    /// Returns whether the record may still be modified.
    pub fn mutable(&self) -> bool {
        self.mutable
    }

    /// Gets the holder key.
    pub fn holder(&self) -> &Pubkey {
        &self.holder
    }

    /// Gets the group key, all zeroes when ungrouped.
    pub fn group(&self) -> &Pubkey {
        &self.group
    }

    /// Gets the update authority key.
    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }

    /// Gets the delegate entry, address all zeroes when unset.
    pub fn delegate(&self) -> &Delegate {
        &self.delegate
    }

    /// Gets the name field.
    pub fn name(&self) -> &FixedStr<ASSET_NAME_LEN> {
        &self.name
    }
}
