//! Construction trait for building a pool from its configuration.
//!
//! Each pool type implements `FromConfig<C>` for its own config struct so
//! the [`PoolFactory`](crate::factory::PoolFactory) can dispatch on
//! [`AmmConfig`](crate::config::AmmConfig) without trait objects.
//!
//! # Validation Contract
//!
//! Implementations validate the configuration and the token pair before
//! returning.  A constructed pool is always empty: its first deposit seeds
//! it.

use std::sync::Arc;

use super::FungibleToken;
use crate::error::Result;

/// Builds a pool from a configuration and the two token ledgers it trades.
///
/// The tokens may be given in either order; the pool sorts them into its
/// canonical pair.
pub trait FromConfig<C> {
    /// Creates a new, empty pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`](crate::error::AmmError::IdenticalTokens)
    ///   if both ledgers report the same address.
    /// - [`AmmError::InvalidFee`](crate::error::AmmError::InvalidFee) or
    ///   [`AmmError::InvalidConfiguration`](crate::error::AmmError::InvalidConfiguration)
    ///   if the configuration does not validate.
    fn from_config(
        config: &C,
        token_a: Arc<dyn FungibleToken>,
        token_b: Arc<dyn FungibleToken>,
    ) -> Result<Self>
    where
        Self: Sized;
}
