//! Full-precision `a * b / d` over 256-bit intermediates.

use bnum::types::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] tagged with `context` if `value` exceeds
/// `u128::MAX`.
pub(crate) fn narrow_u256(value: U256, context: &'static str) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    let digits = value.digits();
    Ok(u128::from(digits[0]) | (u128::from(digits[1]) << 64))
}

/// Computes `a * b / denominator` rounded in the given direction.
///
/// The product is formed in 256 bits, so it never overflows; only a
/// quotient that does not fit back into `u128` fails.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128::MAX`.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::Rounding;
/// use duet_amm::math::mul_div;
///
/// assert_eq!(mul_div(1_000, 1_000, 1_099, Rounding::Down), Ok(909));
/// assert_eq!(mul_div(1_000, 1_000, 1_099, Rounding::Up), Ok(910));
/// assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down), Ok(u128::MAX));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(AmmError::Overflow("mul_div product"))?;
    let d = U256::from(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && !(product % d).is_zero() {
        quotient = quotient
            .checked_add(U256::ONE)
            .ok_or(AmmError::Overflow("mul_div ceiling"))?;
    }
    narrow_u256(quotient, "mul_div result exceeds u128")
}
