//! Integer square roots.

use bnum::types::U256;

use super::mul_div::narrow_u256;
use crate::error::Result;

/// Floor of the square root of `n`, by Newton's method.
///
/// # Examples
///
/// ```
/// use duet_amm::math::sqrt_floor;
///
/// assert_eq!(sqrt_floor(1_000_000_000_000), 1_000_000);
/// assert_eq!(sqrt_floor(15), 3);
/// ```
#[must_use]
pub fn sqrt_floor(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Floor of `sqrt(a * b)`, with the product formed in 256 bits.
///
/// This is the share count minted by the first deposit into a
/// constant-product pool.  The root of a product of two `u128`s always
/// fits in a `u128`.
///
/// # Errors
///
/// Propagates [`AmmError::Overflow`](crate::error::AmmError::Overflow) from
/// narrowing, which cannot occur for valid inputs.
pub fn sqrt_of_product(a: u128, b: u128) -> Result<u128> {
    let n = U256::from(a) * U256::from(b);
    narrow_u256(isqrt_u256(n), "sqrt of product")
}

fn isqrt_u256(n: U256) -> U256 {
    if n.is_zero() {
        return n;
    }
    let two = U256::from(2_u32);
    let mut x = n;
    let mut y = (n / two) + (n % two);
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}
