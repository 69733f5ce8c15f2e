//! Unified error types for the Duet AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every failure aborts the whole operation: a pool that
//! returns an error has not changed its reserves, its share ledger, or any
//! token balance.

use crate::domain::{Amount, Shares};

/// Convenience alias used by every fallible function in the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Errors produced by the AMM engine.
///
/// Arithmetic variants carry a static description of the computation that
/// failed.  Variants a caller can act on carry the amounts involved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// A checked addition or multiplication exceeded the integer range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A checked subtraction went below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// A division had a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// The Newton solver exhausted its iteration budget.
    #[error("solver did not converge: {0}")]
    ConvergenceFailure(&'static str),

    /// The first deposit into an empty pool would mint no shares.
    #[error("initial deposit too small to mint shares")]
    InsufficientInitialLiquidity,

    /// The ratio-clamped deposit fell outside the caller's tolerance.
    #[error("deposit ratio mismatch: supplied {supplied}, accepted {accepted}")]
    RatioMismatch {
        /// Amount the caller offered on the clamped side.
        supplied: Amount,
        /// Amount the pool would accept on that side.
        accepted: Amount,
    },

    /// A provider tried to burn more shares than they hold.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller holds.
        available: Shares,
    },

    /// The pool cannot satisfy the operation with its current reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A required amount was zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// A deposit into a live pool would mint no shares.
    #[error("deposit would mint zero shares")]
    ZeroSharesMinted,

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: output {amount_out} below minimum {min_amount_out}")]
    SlippageExceeded {
        /// Output the pool would pay.
        amount_out: Amount,
        /// Minimum output the caller accepts.
        min_amount_out: Amount,
    },

    /// A call re-entered a pool that is already executing an operation.
    #[error("re-entrant call blocked")]
    ReentrancyBlocked,

    /// A token ledger could not debit the payer.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer needed.
        required: Amount,
        /// Balance the payer holds.
        available: Amount,
    },

    /// A delegated transfer exceeded the spender's allowance.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Amount the transfer needed.
        required: Amount,
        /// Allowance granted to the spender.
        available: Amount,
    },

    /// A token ledger reported an unsuccessful transfer.
    #[error("token transfer failed: {0}")]
    TransferFailed(&'static str),

    /// A transfer failed and an earlier one could not be reversed.  The
    /// pool committed the transfers that did happen; see
    /// [`LiquidityPool::remove_liquidity`](crate::traits::LiquidityPool::remove_liquidity).
    #[error("settlement partially applied: {0}")]
    PartialSettlement(Box<AmmError>),

    /// A pool for this token pair is already registered.
    #[error("pool already exists for this pair")]
    PairAlreadyExists,

    /// Both sides of the pair name the same token.
    #[error("token pair requires two distinct tokens")]
    IdenticalTokens,

    /// No pool is registered for this pair.
    #[error("pool not found")]
    PoolNotFound,

    /// The token is not part of the pool's pair.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The fee rate is outside the accepted range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration parameter is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
