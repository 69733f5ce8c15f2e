//! Core trait abstractions.
//!
//! - [`SwapPool`] and [`LiquidityPool`]: what every pool offers callers.
//! - [`PricingCurve`]: the invariant a generic pool is built around.
//! - [`FungibleToken`]: the external token ledgers pools settle through.
//! - [`FromConfig`]: configuration-driven pool construction.

mod from_config;
mod fungible_token;
mod liquidity_pool;
mod pricing_curve;
mod swap_pool;

pub use from_config::FromConfig;
pub use fungible_token::FungibleToken;
pub use liquidity_pool::LiquidityPool;
pub use pricing_curve::PricingCurve;
pub use swap_pool::SwapPool;
