//! Core swap pool trait for executing swaps and querying pool state.
//!
//! [`SwapPool`] is the surface every pool exposes to traders:
//!
//! 1. **Execute**: [`SwapPool::swap`] pulls the input, pays the output and
//!    updates reserves as one atomic step.
//! 2. **Quote**: [`SwapPool::quote`] runs the same pricing without moving
//!    funds.
//! 3. **Inspect**: reserves, token pair, fee rate, invariant and the pool's
//!    own account address.
//!
//! # Fee Deduction
//!
//! Fees are taken from the input before pricing and stay in the pool:
//!
//! ```text
//! net_input  = floor(amount_in × (10 000 − fee_bps) / 10 000)
//! fee        = amount_in − net_input
//! amount_out = curve(net_input, reserve_in, reserve_out)
//! reserve_in += amount_in
//! ```
//!
//! # Concurrency
//!
//! Methods take `&self`: pools serialize operations internally and reject
//! re-entrant calls with
//! [`AmmError::ReentrancyBlocked`](crate::error::AmmError::ReentrancyBlocked),
//! which includes reads made from inside a token callback.

use crate::domain::{Address, Amount, BasisPoints, Reserves, SwapResult, TokenPair};
use crate::error::Result;

/// Core trait for two-asset AMM pools.
///
/// # Errors
///
/// Common error variants across methods:
///
/// - [`AmmError::ReentrancyBlocked`](crate::error::AmmError::ReentrancyBlocked):
///   the pool is already executing an operation on this thread.
/// - [`AmmError::InvalidToken`](crate::error::AmmError::InvalidToken):
///   the token is not part of the pair.
/// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity):
///   reserves cannot produce a non-zero output.
pub trait SwapPool {
    /// Account that holds the pool's reserves in each token ledger.
    #[must_use]
    fn address(&self) -> Address;

    /// The canonically ordered token pair.
    #[must_use]
    fn token_pair(&self) -> &TokenPair;

    /// Fee rate charged on swap input.  Immutable for the pool's lifetime.
    #[must_use]
    fn fee_rate(&self) -> BasisPoints;

    /// Current reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::ReentrancyBlocked`](crate::error::AmmError::ReentrancyBlocked)
    /// when called from inside an operation on the same pool.
    fn reserves(&self) -> Result<Reserves>;

    /// The pool's invariant for its current reserves: `floor(√(x·y))` for
    /// constant product, `D` for StableSwap.
    ///
    /// # Errors
    ///
    /// Solver failures and re-entrancy.
    fn invariant(&self) -> Result<u128>;

    /// Prices a swap of `amount_in` of `token_in` without executing it.
    ///
    /// # Errors
    ///
    /// The same pricing errors as [`swap`](Self::swap).
    fn quote(&self, amount_in: Amount, token_in: &Address) -> Result<SwapResult>;

    /// Swaps `amount_in` of `token_in` for the other token.
    ///
    /// The input is pulled from `caller` with `transfer_from` (the pool is
    /// the spender) and the output is sent to `caller`.  Reserves change
    /// only after both transfers succeed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`](crate::error::AmmError::ZeroAmount) if
    ///   `amount_in` or the post-fee input is zero.
    /// - [`AmmError::SlippageExceeded`](crate::error::AmmError::SlippageExceeded)
    ///   if the output is below `min_amount_out`.
    /// - [`AmmError::ConvergenceFailure`](crate::error::AmmError::ConvergenceFailure)
    ///   if the StableSwap solver gives up.
    /// - Any token transfer error.
    fn swap(
        &self,
        caller: &Address,
        amount_in: Amount,
        token_in: &Address,
        min_amount_out: Amount,
    ) -> Result<SwapResult>;
}
