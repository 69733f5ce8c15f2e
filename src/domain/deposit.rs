//! Liquidity deposit and withdrawal value types.

use super::{Amount, BasisPoints, Reserves, Rounding, Shares};
use crate::error::{AmmError, Result};

/// A request to deposit both tokens into a pool.
///
/// `tolerance` bounds how far the pool may clamp either side to keep the
/// reserve ratio: with a tolerance of 50 bp, the accepted amount on the
/// clamped side must be at least 99.5% of what was offered.  Without a
/// tolerance any clamp is accepted.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Amount, BasisPoints, DepositRequest};
///
/// let req = DepositRequest::new(Amount::new(1_000), Amount::new(2_000))
///     .with_tolerance(BasisPoints::new(50));
/// assert_eq!(req.tolerance(), Some(BasisPoints::new(50)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositRequest {
    amount_a: Amount,
    amount_b: Amount,
    tolerance: Option<BasisPoints>,
}

impl DepositRequest {
    /// Creates a request with no ratio tolerance.
    pub const fn new(amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            amount_a,
            amount_b,
            tolerance: None,
        }
    }

    /// Sets the maximum accepted clamp on either side.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: BasisPoints) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Offered amount of token A.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Offered amount of token B.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Ratio tolerance, if any.
    #[must_use]
    pub const fn tolerance(&self) -> Option<BasisPoints> {
        self.tolerance
    }

    /// Returns `true` if nothing is offered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount_a.is_zero() && self.amount_b.is_zero()
    }

    /// Checks a clamped side against the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::RatioMismatch`] if `accepted` falls more than
    /// the tolerance below `supplied`.
    pub fn check_clamp(&self, supplied: Amount, accepted: Amount) -> Result<()> {
        let Some(tolerance) = self.tolerance else {
            return Ok(());
        };
        let floor = tolerance.apply_complement(supplied, Rounding::Up)?;
        if accepted < floor {
            return Err(AmmError::RatioMismatch { supplied, accepted });
        }
        Ok(())
    }
}

/// What a pricing curve would accept for a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositPlan {
    /// Shares to mint.
    pub shares: Shares,
    /// Token A to pull from the provider.
    pub amount_a: Amount,
    /// Token B to pull from the provider.
    pub amount_b: Amount,
}

/// Result of a successful deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositReceipt {
    shares_minted: Shares,
    amount_a_used: Amount,
    amount_b_used: Amount,
    reserves_after: Reserves,
}

impl DepositReceipt {
    /// Builds a receipt from an executed plan.
    pub const fn new(plan: DepositPlan, reserves_after: Reserves) -> Self {
        Self {
            shares_minted: plan.shares,
            amount_a_used: plan.amount_a,
            amount_b_used: plan.amount_b,
            reserves_after,
        }
    }

    /// Shares credited to the provider.
    pub const fn shares_minted(&self) -> Shares {
        self.shares_minted
    }

    /// Token A actually pulled.
    pub const fn amount_a_used(&self) -> Amount {
        self.amount_a_used
    }

    /// Token B actually pulled.
    pub const fn amount_b_used(&self) -> Amount {
        self.amount_b_used
    }

    /// Reserves after the deposit.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Withdrawal {
    shares_burned: Shares,
    amount_a: Amount,
    amount_b: Amount,
    reserves_after: Reserves,
}

impl Withdrawal {
    /// Creates a withdrawal record.
    pub const fn new(
        shares_burned: Shares,
        amount_a: Amount,
        amount_b: Amount,
        reserves_after: Reserves,
    ) -> Self {
        Self {
            shares_burned,
            amount_a,
            amount_b,
            reserves_after,
        }
    }

    /// Shares removed from the provider.
    pub const fn shares_burned(&self) -> Shares {
        self.shares_burned
    }

    /// Token A paid out.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B paid out.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Reserves after the withdrawal.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = DepositRequest::new(Amount::new(1), Amount::ZERO);
        assert_eq!(req.tolerance(), None);
        assert!(!req.is_empty());
        assert!(DepositRequest::new(Amount::ZERO, Amount::ZERO).is_empty());
    }

    #[test]
    fn clamp_without_tolerance_always_passes() {
        let req = DepositRequest::new(Amount::new(1_000), Amount::new(1_000));
        assert_eq!(req.check_clamp(Amount::new(1_000), Amount::new(1)), Ok(()));
    }

    #[test]
    fn clamp_within_tolerance() {
        // 1% of 1000 is 10, so 990 is the lowest accepted amount
        let req = DepositRequest::new(Amount::new(1_000), Amount::new(1_000))
            .with_tolerance(BasisPoints::new(100));
        assert_eq!(req.check_clamp(Amount::new(1_000), Amount::new(990)), Ok(()));
    }

    #[test]
    fn clamp_outside_tolerance() {
        let req = DepositRequest::new(Amount::new(1_000), Amount::new(1_000))
            .with_tolerance(BasisPoints::new(100));
        let Err(e) = req.check_clamp(Amount::new(1_000), Amount::new(989)) else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            AmmError::RatioMismatch {
                supplied: Amount::new(1_000),
                accepted: Amount::new(989),
            }
        );
    }

    #[test]
    fn receipt_copies_plan() {
        let plan = DepositPlan {
            shares: Shares::new(10),
            amount_a: Amount::new(4),
            amount_b: Amount::new(25),
        };
        let reserves = Reserves::new(Amount::new(4), Amount::new(25));
        let receipt = DepositReceipt::new(plan, reserves);
        assert_eq!(receipt.shares_minted(), Shares::new(10));
        assert_eq!(receipt.amount_a_used(), Amount::new(4));
        assert_eq!(receipt.amount_b_used(), Amount::new(25));
        assert_eq!(receipt.reserves_after(), reserves);
    }
}
