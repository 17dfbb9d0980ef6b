//! Delegate role set packed into a one-byte bitmask.

use core::fmt;

use emblem_codec::impl_wrapper_codec;

/// Roles an asset holder can grant to a delegate.
///
/// `None` is a sentinel, not a grantable role: it never occupies a mask bit
/// and is only reported when a mask is empty.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateRole {
    /// No role; reported for an empty mask.
    None = 0,

    /// May transfer the asset on the holder's behalf.
    Transfer = 1,

    /// May lock and unlock the asset.
    Lock = 2,

    /// May burn the asset.
    Burn = 3,
}

impl DelegateRole {
    /// Every grantable role, in ascending value order.
    ///
    /// Mask encoding, decoding, and [`RoleMask::all`] all derive from this
    /// list, so extending the enum only requires updating it here.
    pub const ACTIVE: [DelegateRole; 3] =
        [DelegateRole::Transfer, DelegateRole::Lock, DelegateRole::Burn];

    /// Converts the enum to its underlying u8 value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DelegateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegateRole::None => write!(f, "None"),
            DelegateRole::Transfer => write!(f, "Transfer"),
            DelegateRole::Lock => write!(f, "Lock"),
            DelegateRole::Burn => write!(f, "Burn"),
        }
    }
}

/// One-byte bitmask over [`DelegateRole`].
///
/// Bit `role - 1` is set for each granted role. Every byte value is a valid
/// mask; bits above the defined roles are carried through untouched but name
/// no role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleMask(u8);

impl_wrapper_codec!(RoleMask => u8);

impl RoleMask {
    /// Wraps a raw mask byte.
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Builds a mask from a set of roles.  `None` contributes nothing.
    pub fn from_roles(roles: impl IntoIterator<Item = DelegateRole>) -> Self {
        let mut raw = 0u8;
        for role in roles {
            if role != DelegateRole::None {
                raw |= 1 << (role.as_u8() - 1);
            }
        }
        Self(raw)
    }

    /// The mask granting every defined role.
    pub fn all() -> Self {
        Self::from_roles(DelegateRole::ACTIVE)
    }

    /// Returns the raw mask byte.
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Returns whether the given role is granted.  `None` is contained only
    /// in an empty mask.
    pub const fn contains(&self, role: DelegateRole) -> bool {
        match role {
            DelegateRole::None => self.0 == 0,
            role => self.0 & (1 << (role.as_u8() - 1)) != 0,
        }
    }

    /// Expands the mask into roles, in ascending role order.
    ///
    /// An empty mask expands to `[None]` rather than an empty list, so the
    /// result always names at least one role.
    pub fn roles(&self) -> Vec<DelegateRole> {
        if self.0 == 0 {
            return vec![DelegateRole::None];
        }

        DelegateRole::ACTIVE
            .into_iter()
            .filter(|role| self.contains(*role))
            .collect()
    }
}

impl fmt::Display for RoleMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_transfer_burn() {
        let mask = RoleMask::from_roles([DelegateRole::Transfer, DelegateRole::Burn]);
        assert_eq!(mask.raw(), 0b0000_0101);
    }

    #[test]
    fn test_decode_transfer_burn() {
        let mask = RoleMask::new(0b0000_0101);
        assert_eq!(mask.roles(), vec![DelegateRole::Transfer, DelegateRole::Burn]);
    }

    #[test]
    fn test_zero_mask_is_none() {
        let mask = RoleMask::new(0);
        assert_eq!(mask.roles(), vec![DelegateRole::None]);
        assert!(mask.contains(DelegateRole::None));
        assert!(!mask.contains(DelegateRole::Transfer));
    }

    #[test]
    fn test_none_contributes_nothing() {
        let mask = RoleMask::from_roles([DelegateRole::None, DelegateRole::Lock]);
        assert_eq!(mask.raw(), 0b0000_0010);
        assert!(!mask.contains(DelegateRole::None));
    }

    #[test]
    fn test_all_covers_every_active_role() {
        let mask = RoleMask::all();
        assert_eq!(mask.roles(), DelegateRole::ACTIVE.to_vec());
    }

    #[test]
    fn test_every_byte_is_a_valid_mask() {
        // Undefined high bits survive but name no role.
        let mask = RoleMask::new(0xf1);
        assert_eq!(mask.raw(), 0xf1);
        assert_eq!(mask.roles(), vec![DelegateRole::Transfer]);
    }

    #[test]
    fn test_roundtrip_through_roles() {
        for raw in 0u8..8 {
            let mask = RoleMask::new(raw);
            let rebuilt = RoleMask::from_roles(mask.roles());
            assert_eq!(rebuilt.raw(), raw);
        }
    }
}
