//! `Result`-returning arithmetic for the quantity newtypes.
//!
//! Pool code chains many fallible steps with `?`; [`CheckedArithmetic`]
//! turns the `Option`-returning methods on [`Amount`] and [`Shares`] into
//! [`AmmError`] values that name the operation that failed.
//!
//! # Examples
//!
//! ```
//! use duet_amm::domain::Amount;
//! use duet_amm::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert_eq!(reserve.safe_add(&Amount::new(100)), Ok(Amount::new(1_100)));
//! assert!(reserve.safe_sub(&Amount::new(1_001)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::{AmmError, Result};

/// Fallible arithmetic on quantity newtypes.
///
/// - No panics: every failure is an `Err`.
/// - No saturation: a clamped value would hide accounting bugs.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum exceeds `u128::MAX`.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;
}

macro_rules! impl_checked_arithmetic {
    ($ty:ty, $name:literal) => {
        impl CheckedArithmetic for $ty {
            fn safe_add(&self, other: &Self) -> Result<Self> {
                self.checked_add(other)
                    .ok_or(AmmError::Overflow(concat!($name, " addition")))
            }

            fn safe_sub(&self, other: &Self) -> Result<Self> {
                self.checked_sub(other)
                    .ok_or(AmmError::Underflow(concat!($name, " subtraction")))
            }
        }
    };
}

impl_checked_arithmetic!(Amount, "amount");
impl_checked_arithmetic!(Shares, "shares");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_errors_name_the_operation() {
        assert_eq!(
            Amount::MAX.safe_add(&Amount::new(1)),
            Err(AmmError::Overflow("amount addition"))
        );
        assert_eq!(
            Amount::ZERO.safe_sub(&Amount::new(1)),
            Err(AmmError::Underflow("amount subtraction"))
        );
    }

    #[test]
    fn shares_errors_name_the_operation() {
        assert_eq!(
            Shares::new(1).safe_sub(&Shares::new(2)),
            Err(AmmError::Underflow("shares subtraction"))
        );
        assert_eq!(Shares::new(1).safe_add(&Shares::new(2)), Ok(Shares::new(3)));
    }
}
