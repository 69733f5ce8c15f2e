//! Liquidity share ledger.
//!
//! Each pool owns one [`LiquidityLedger`] recording the total share supply
//! and every provider's balance.

mod liquidity_ledger;

pub use liquidity_ledger::LiquidityLedger;
