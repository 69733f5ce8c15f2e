//! Account and token identifiers.

use core::fmt;
use core::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::AmmError;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account identifier.
///
/// Addresses name token contracts, liquidity providers, traders, and the
/// pools themselves.  Ordering is lexicographic on the raw bytes, which is
/// the ordering used to canonicalize a [`TokenPair`](super::TokenPair).
///
/// Addresses display as `0x`-prefixed lowercase hex and parse from the same
/// form.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::Address;
///
/// let addr: Address = "0x0101010101010101010101010101010101010101".parse().expect("hex");
/// assert_eq!(addr, Address::new([1u8; 20]));
/// assert_eq!(addr.to_string(), "0x0101010101010101010101010101010101010101");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derives a deterministic address from a namespace and a list of
    /// byte strings.
    ///
    /// The address is the last 20 bytes of
    /// `sha256(namespace || len(part_0) || part_0 || ...)`.  Length prefixes
    /// keep `["ab", "c"]` and `["a", "bc"]` from colliding.
    #[must_use]
    pub fn derive(namespace: &str, parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(namespace.as_bytes());
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        let digest = hasher.finalize();

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Derives an address from a human-readable label.
    ///
    /// Handy for fixtures: `Address::from_label("alice")` is stable across
    /// runs.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::derive("duet-amm/account", &[label.as_bytes()])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits)
            .map_err(|_| AmmError::InvalidConfiguration("address is not valid hex"))?;
        let bytes: [u8; ADDRESS_LEN] = raw
            .try_into()
            .map_err(|_| AmmError::InvalidConfiguration("address must be 20 bytes"))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}
