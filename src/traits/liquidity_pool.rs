//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds share-based deposits and withdrawals on top of
//! swapping.
//!
//! # Share Accounting Invariant
//!
//! Total shares change only through
//! [`add_liquidity`](LiquidityPool::add_liquidity) and
//! [`remove_liquidity`](LiquidityPool::remove_liquidity), and always equal
//! the sum of every provider's balance:
//!
//! ```text
//! total_shares = Σ share_of(provider)
//! ```
//!
//! # Lifecycle
//!
//! The first deposit seeds an empty pool; burning every share returns it to
//! [`PoolPhase::Empty`], after which it can be seeded again.

use super::SwapPool;
use crate::domain::{Address, DepositReceipt, DepositRequest, PoolPhase, Shares, Withdrawal};
use crate::error::Result;

/// Trait for pools that accept liquidity deposits.
pub trait LiquidityPool: SwapPool {
    /// Deposits both tokens from `provider` and mints shares to them.
    ///
    /// How much of each token is accepted depends on the pricing curve:
    /// constant-product pools clamp to the current reserve ratio,
    /// StableSwap pools accept any mix and price it through `D`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`](crate::error::AmmError::ZeroAmount) if
    ///   nothing is offered.
    /// - [`AmmError::InsufficientInitialLiquidity`](crate::error::AmmError::InsufficientInitialLiquidity)
    ///   if the first deposit mints zero shares.
    /// - [`AmmError::RatioMismatch`](crate::error::AmmError::RatioMismatch)
    ///   if the clamp exceeds the request's tolerance.
    /// - [`AmmError::ZeroSharesMinted`](crate::error::AmmError::ZeroSharesMinted)
    ///   if a later deposit is too small to earn a share.
    /// - Any token transfer error.
    fn add_liquidity(&self, provider: &Address, request: &DepositRequest)
        -> Result<DepositReceipt>;

    /// Burns `shares` from `provider` and pays out the proportional slice
    /// of both reserves, rounded down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`](crate::error::AmmError::ZeroAmount) if
    ///   `shares` is zero.
    /// - [`AmmError::InsufficientShares`](crate::error::AmmError::InsufficientShares)
    ///   if `provider` holds fewer than `shares`.
    /// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    ///   if the payout rounds to nothing, or would leave exactly one
    ///   reserve at zero.
    /// - Any token transfer error.  If one side was paid out and could not
    ///   be reclaimed, the pool keeps the payout, lowers that reserve,
    ///   burns the shares whose invariant it carried (rounded up, at most
    ///   `shares`) and returns
    ///   [`AmmError::PartialSettlement`](crate::error::AmmError::PartialSettlement).
    fn remove_liquidity(&self, provider: &Address, shares: Shares) -> Result<Withdrawal>;

    /// Shares held by `provider`.
    ///
    /// # Errors
    ///
    /// Re-entrancy.
    fn share_of(&self, provider: &Address) -> Result<Shares>;

    /// Total outstanding shares.
    ///
    /// # Errors
    ///
    /// Re-entrancy.
    fn total_shares(&self) -> Result<Shares>;

    /// Current lifecycle phase.
    ///
    /// # Errors
    ///
    /// Re-entrancy.
    fn phase(&self) -> Result<PoolPhase>;
}
