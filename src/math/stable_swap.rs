//! Newton solvers for the two-asset StableSwap invariant.
//!
//! With amplification `A`, `n = 2` assets and reserves `x`, `y`, the
//! invariant `D` satisfies
//!
//! ```text
//! A·nⁿ·(x + y) + D = A·nⁿ·D + Dⁿ⁺¹ / (nⁿ·x·y)
//! ```
//!
//! [`solve_invariant`] finds `D` for given reserves; [`solve_reserve`] finds
//! the reserve `y` that keeps `D` fixed once the other reserve moves to `x`.
//! Both iterate until successive estimates differ by at most one unit and
//! give up with [`AmmError::ConvergenceFailure`] after [`MAX_ITERATIONS`].
//!
//! Intermediates are 512-bit: `D³` alone needs about 390 bits when the
//! reserves approach `u128::MAX`.

use bnum::types::U512;

use crate::error::{AmmError, Result};

/// Iteration budget for both solvers.
pub const MAX_ITERATIONS: u32 = 255;

/// Number of assets in the pool.
const N_COINS: u32 = 2;

/// Largest amplification coefficient a pool may use.
pub const MAX_AMPLIFICATION: u64 = 1_000_000;

fn narrow(value: U512, context: &'static str) -> Result<u128> {
    if value > U512::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    let digits = value.digits();
    Ok(u128::from(digits[0]) | (u128::from(digits[1]) << 64))
}

fn mul(a: U512, b: U512, context: &'static str) -> Result<U512> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

fn div(a: U512, b: U512) -> Result<U512> {
    a.checked_div(b).ok_or(AmmError::DivisionByZero)
}

fn within_one(a: U512, b: U512) -> bool {
    let diff = if a > b { a - b } else { b - a };
    diff <= U512::ONE
}

/// `A·nⁿ`, the amplification scaled for two assets.
fn scaled_amplification(amp: u64) -> Result<U512> {
    if amp == 0 {
        return Err(AmmError::InvalidConfiguration(
            "amplification must be positive",
        ));
    }
    let n_pow_n = U512::from(N_COINS.pow(N_COINS));
    mul(U512::from(amp), n_pow_n, "A·nⁿ")
}

/// Computes the invariant `D` for reserves `(x, y)`.
///
/// Starts from `D = x + y` and applies Newton's method:
///
/// ```text
/// D_P  = D³ / (nⁿ·x·y)
/// D'   = (Ann·S + n·D_P)·D / ((Ann − 1)·D + (n + 1)·D_P)
/// ```
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if exactly one reserve is zero.
/// - [`AmmError::InvalidConfiguration`] if `amp` is zero.
/// - [`AmmError::ConvergenceFailure`] after [`MAX_ITERATIONS`] steps.
/// - [`AmmError::Overflow`] if `D` does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use duet_amm::math::stable_swap::solve_invariant;
///
/// // A balanced pool's invariant is the plain sum of its reserves.
/// assert_eq!(solve_invariant(1_000, 1_000, 100), Ok(2_000));
/// ```
pub fn solve_invariant(x: u128, y: u128, amp: u64) -> Result<u128> {
    newton_invariant(x, y, amp, MAX_ITERATIONS)
}

fn newton_invariant(x: u128, y: u128, amp: u64, max_iterations: u32) -> Result<u128> {
    let ann = scaled_amplification(amp)?;
    if x == 0 && y == 0 {
        return Ok(0);
    }
    if x == 0 || y == 0 {
        return Err(AmmError::DivisionByZero);
    }

    let n = U512::from(N_COINS);
    let xs = U512::from(x);
    let ys = U512::from(y);
    let s = xs + ys;
    let nx = mul(xs, n, "D: n·x")?;
    let ny = mul(ys, n, "D: n·y")?;

    let mut d = s;
    for _ in 0..max_iterations {
        let d_p = div(mul(d, d, "D: D²")?, nx)?;
        let d_p = div(mul(d_p, d, "D: D³")?, ny)?;

        let numerator = mul(
            mul(ann, s, "D: Ann·S")? + mul(d_p, n, "D: n·D_P")?,
            d,
            "D: numerator",
        )?;
        let denominator = mul(ann - U512::ONE, d, "D: (Ann−1)·D")?
            + mul(n + U512::ONE, d_p, "D: (n+1)·D_P")?;

        let d_prev = d;
        d = div(numerator, denominator)?;
        if within_one(d, d_prev) {
            return narrow(d, "invariant D exceeds u128");
        }
    }
    Err(AmmError::ConvergenceFailure("invariant D"))
}

/// Solves for the reserve `y` that keeps the invariant at `d` when the
/// other reserve is `x`.
///
/// Newton's method on `y² + (b − D)·y = c` with
///
/// ```text
/// c = D³ / (nⁿ·x·Ann)
/// b = x + D / Ann
/// y' = (y² + c) / (2y + b − D)
/// ```
///
/// The result is the converged estimate; callers that pay out
/// `reserve − y` round `y` up by one so the pool never pays more than the
/// curve allows.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `x` is zero.
/// - [`AmmError::InvalidConfiguration`] if `amp` is zero.
/// - [`AmmError::ConvergenceFailure`] after [`MAX_ITERATIONS`] steps.
pub fn solve_reserve(x: u128, d: u128, amp: u64) -> Result<u128> {
    newton_reserve(x, d, amp, MAX_ITERATIONS)
}

fn newton_reserve(x: u128, d: u128, amp: u64, max_iterations: u32) -> Result<u128> {
    let ann = scaled_amplification(amp)?;
    if x == 0 {
        return Err(AmmError::DivisionByZero);
    }

    let n = U512::from(N_COINS);
    let xs = U512::from(x);
    let ds = U512::from(d);

    let c = div(mul(ds, ds, "y: D²")?, mul(xs, n, "y: n·x")?)?;
    let c = div(mul(c, ds, "y: D³")?, mul(ann, n, "y: n·Ann")?)?;
    let b = xs + div(ds, ann)?;

    let mut y = ds;
    for _ in 0..max_iterations {
        let numerator = mul(y, y, "y: y²")? + c;
        let denominator = (mul(y, n, "y: 2y")? + b)
            .checked_sub(ds)
            .ok_or(AmmError::Underflow("y: 2y + b − D"))?;

        let y_prev = y;
        y = div(numerator, denominator)?;
        if within_one(y, y_prev) {
            return narrow(y, "reserve y exceeds u128");
        }
    }
    Err(AmmError::ConvergenceFailure("reserve y"))
}
