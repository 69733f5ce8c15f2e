//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use duet_amm::prelude::*;
//! ```
//!
//! This re-exports the most frequently used domain types, core traits,
//! configuration types, error types, and factory utilities so that
//! consumers don't need to import from individual submodules.

pub use crate::config::{AmmConfig, ConstantProductConfig, StableSwapConfig};
pub use crate::domain::{
    Address, Amount, BasisPoints, DepositReceipt, DepositRequest, PoolPhase, Reserves, Rounding,
    Shares, SwapResult, TokenPair, Withdrawal,
};
pub use crate::error::{AmmError, Result};
pub use crate::factory::PoolFactory;
pub use crate::ledger::LiquidityLedger;
pub use crate::math::CheckedArithmetic;
pub use crate::pools::{Pool, PoolBox};
pub use crate::token::InMemoryToken;
pub use crate::traits::{FromConfig, FungibleToken, LiquidityPool, PricingCurve, SwapPool};
