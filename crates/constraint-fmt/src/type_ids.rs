//! Constants and enumerations for constraint node types.
//!
//! The constraint tag space is its own: the values here are unrelated to the
//! extension kinds used by the record format, even where the numbers collide.

use core::fmt;

use crate::errors::ConstraintFmtError;

/// Constraint node type identifiers.
///
/// Each variant has a stable numeric value used in the serialized node
/// header. Composite types own framed children; leaf types test an account
/// against a key list.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// All children must hold.
    And = 0,

    /// The single child must not hold.
    Not = 1,

    /// At least one child must hold.
    Or = 2,

    /// The referenced account must be owned by one of the listed keys.
    OwnedBy = 3,

    /// The referenced account's key must be one of the listed keys.
    PubkeyMatch = 4,

    /// No condition; always holds.
    Empty = 5,
}

impl ConstraintType {
    /// Converts the enum to its underlying u32 value.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<ConstraintType> for u32 {
    fn from(ty: ConstraintType) -> Self {
        ty as u32
    }
}

impl TryFrom<u32> for ConstraintType {
    type Error = ConstraintFmtError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ConstraintType::And),
            1 => Ok(ConstraintType::Not),
            2 => Ok(ConstraintType::Or),
            3 => Ok(ConstraintType::OwnedBy),
            4 => Ok(ConstraintType::PubkeyMatch),
            5 => Ok(ConstraintType::Empty),
            unknown => Err(ConstraintFmtError::UnknownConstraintType(unknown)),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::And => write!(f, "And"),
            ConstraintType::Not => write!(f, "Not"),
            ConstraintType::Or => write!(f, "Or"),
            ConstraintType::OwnedBy => write!(f, "OwnedBy"),
            ConstraintType::PubkeyMatch => write!(f, "PubkeyMatch"),
            ConstraintType::Empty => write!(f, "Empty"),
        }
    }
}

/// Accounts a leaf constraint can refer to.
///
/// These are resolved by the caller evaluating the tree; this layer only
/// round-trips the discriminant.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    /// The asset record itself.
    Asset = 0,

    /// The authority approving the gated operation.
    Authority = 1,

    /// The recipient of the gated operation.
    Recipient = 2,
}

impl AccountRef {
    /// Converts the enum to its underlying u32 value.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<AccountRef> for u32 {
    fn from(account: AccountRef) -> Self {
        account as u32
    }
}

impl TryFrom<u32> for AccountRef {
    type Error = ConstraintFmtError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccountRef::Asset),
            1 => Ok(AccountRef::Authority),
            2 => Ok(AccountRef::Recipient),
            unknown => Err(ConstraintFmtError::UnknownAccountRef(unknown)),
        }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::Asset => write!(f, "Asset"),
            AccountRef::Authority => write!(f, "Authority"),
            AccountRef::Recipient => write!(f, "Recipient"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_roundtrip() {
        // Check that all expected type IDs are canonical
        let valid = [0, 1, 2, 3, 4, 5];
        for raw in valid {
            let parsed = ConstraintType::try_from(raw).unwrap();
            assert_eq!(parsed.as_u32(), raw);
        }

        // Check an arbitrary invalid type ID
        assert!(ConstraintType::try_from(6).is_err());
    }

    #[test]
    fn test_account_roundtrip() {
        for raw in [0, 1, 2] {
            let parsed = AccountRef::try_from(raw).unwrap();
            assert_eq!(parsed.as_u32(), raw);
        }

        assert!(matches!(
            AccountRef::try_from(9),
            Err(ConstraintFmtError::UnknownAccountRef(9))
        ));
    }
}
