//! Outcome of a swap or swap quote.

use core::fmt;

use super::{Amount, Reserves, Side};
use crate::error::{AmmError, Result};

/// The outcome of a swap: amounts exchanged, fee charged, and the reserves
/// the swap leaves behind.
///
/// For a quote, `reserves_after` is the state the swap would produce.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Amount, Reserves, Side, SwapResult};
///
/// let after = Reserves::new(Amount::new(1_100), Amount::new(910));
/// let result = SwapResult::new(Side::A, Amount::new(100), Amount::new(90), Amount::new(1), after);
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    side_in: Side,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    reserves_after: Reserves,
}

impl SwapResult {
    /// Creates a validated swap result.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` is zero.
    /// - [`AmmError::InvalidFee`] if `fee >= amount_in`.
    pub const fn new(
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        reserves_after: Reserves,
    ) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::InvalidFee("fee must be less than amount_in"));
        }
        Ok(Self {
            side_in,
            amount_in,
            amount_out,
            fee,
            reserves_after,
        })
    }

    /// Side of the pool the input token belongs to.
    #[must_use]
    pub const fn side_in(&self) -> Side {
        self.side_in
    }

    /// Input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output amount paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Portion of the input retained by the pool as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Reserves after the swap.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, fee={}, reserves={})",
            self.amount_in, self.amount_out, self.fee, self.reserves_after
        )
    }
}
