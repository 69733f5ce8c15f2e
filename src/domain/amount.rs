//! Raw token amount with checked arithmetic.

use core::fmt;

/// A token quantity in the token's smallest unit.
///
/// Reserves, deposits, swap inputs and outputs are all `Amount`s.  The
/// engine never interprets decimals; every `u128` is a valid amount.
///
/// Arithmetic is checked and returns `None` instead of wrapping.  Use
/// [`CheckedArithmetic`](crate::math::CheckedArithmetic) for the
/// `Result`-returning variants used inside pool code.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::Amount;
///
/// let reserve = Amount::new(1_000);
/// assert_eq!(reserve.checked_add(&Amount::new(100)), Some(Amount::new(1_100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for a zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
