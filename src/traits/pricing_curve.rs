//! Pricing invariant plugged into the generic pool engine.
//!
//! A [`Pool`](crate::pools::Pool) handles re-entrancy, settlement, share
//! accounting and event emission; the [`PricingCurve`] it is parameterized
//! with decides only the numbers: how much a swap pays out, how a deposit
//! converts into shares, and what the invariant is.
//!
//! Implementations are pure functions of their arguments.  Rounding must
//! favour the pool: outputs round down, required inputs round up.

use core::fmt::Debug;

use crate::domain::{Amount, DepositPlan, DepositRequest, Reserves, Shares};
use crate::error::Result;

/// Pricing rules of one pool family.
pub trait PricingCurve: Debug + Send + Sync {
    /// Short name used in logs and in the pool address derivation.
    const KIND: &'static str;

    /// Output paid for `net_input` (fee already removed).
    ///
    /// Both reserves are non-zero when this is called.  A result of zero is
    /// allowed; the pool rejects it.
    ///
    /// # Errors
    ///
    /// Arithmetic and solver failures.
    fn amount_out(&self, net_input: Amount, reserve_in: Amount, reserve_out: Amount)
        -> Result<Amount>;

    /// The invariant for `reserves` (see
    /// [`SwapPool::invariant`](super::SwapPool::invariant)).
    ///
    /// # Errors
    ///
    /// Arithmetic and solver failures.
    fn invariant(&self, reserves: &Reserves) -> Result<u128>;

    /// Decides how much of a deposit to accept and how many shares it
    /// earns.  `total_shares` is zero for an empty pool.
    ///
    /// # Errors
    ///
    /// Deposit validation errors (see
    /// [`LiquidityPool::add_liquidity`](super::LiquidityPool::add_liquidity)).
    fn plan_deposit(
        &self,
        reserves: &Reserves,
        total_shares: Shares,
        request: &DepositRequest,
    ) -> Result<DepositPlan>;
}
