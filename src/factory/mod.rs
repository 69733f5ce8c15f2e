//! Pool instantiation and the pair registry.
//!
//! The [`PoolFactory`] creates pool instances from [`AmmConfig`] values,
//! validating configuration and dispatching to the appropriate pool
//! constructor based on the config variant.  It also acts as the pair
//! registry: each unordered token pair has at most one pool, looked up
//! with [`PoolFactory::get_pool`].
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use duet_amm::config::{AmmConfig, StableSwapConfig};
//! use duet_amm::domain::BasisPoints;
//! use duet_amm::factory::PoolFactory;
//! use duet_amm::token::InMemoryToken;
//! use duet_amm::traits::{FungibleToken, LiquidityPool};
//!
//! let usdc = Arc::new(InMemoryToken::new("USDC"));
//! let usdt = Arc::new(InMemoryToken::new("USDT"));
//! let cfg = StableSwapConfig::new(BasisPoints::new(4), 200).expect("valid");
//!
//! let mut factory = PoolFactory::new();
//! factory
//!     .create_pool(usdc.clone(), usdt.clone(), &AmmConfig::StableSwap(cfg))
//!     .expect("pool created");
//!
//! let pool = factory.get_pool(&usdc.address(), &usdt.address()).expect("found");
//! assert!(pool.phase().expect("phase").is_empty());
//! ```
//!
//! # Feature Gating
//!
//! Each match arm is gated behind its respective pool feature flag.
//! If a config variant is passed for a pool type whose feature is not
//! enabled, an [`AmmError::InvalidConfiguration`] is returned.
//!
//! [`AmmConfig`]: crate::config::AmmConfig
//! [`AmmError::InvalidConfiguration`]: crate::error::AmmError::InvalidConfiguration

mod pool_factory;

pub use pool_factory::PoolFactory;
