//! Basis-point representation for fee rates and tolerances.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::{AmmError, Result};
use crate::math::mul_div;

/// Number of basis points in 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A fraction expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used for swap fee rates and for deposit slippage tolerances.  Any `u32`
/// can be stored; range checks happen where the value is consumed (see
/// [`ConstantProductConfig`](crate::config::ConstantProductConfig)).
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(30);
/// let net = fee.apply_complement(Amount::new(100), Rounding::Down).expect("in range");
/// assert_eq!(net, Amount::new(99));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Wraps a raw basis-point value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw basis-point value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns `100% - self`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if `self` exceeds 100%.
    pub const fn complement(&self) -> Result<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::Underflow("basis points above 100%")),
        }
    }

    /// Computes `amount * self / 10_000` in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit in `u128`,
    /// which is only possible for values above 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
    }

    /// Computes `amount * (10_000 - self) / 10_000` in the given direction.
    ///
    /// For a fee rate this is the input that remains after the fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if `self` exceeds 100%.
    pub fn apply_complement(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        self.complement()?.apply(amount, rounding)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
