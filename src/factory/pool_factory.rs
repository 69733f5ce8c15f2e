//! Pair registry and pool factory.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::AmmConfig;
use crate::domain::{Address, TokenPair};
use crate::error::{AmmError, Result};
use crate::pools::PoolBox;
use crate::traits::FungibleToken;

#[cfg(any(feature = "constant-product", feature = "stable-swap"))]
use crate::traits::FromConfig;

/// Creates pools and keeps at most one per unordered token pair.
///
/// `PoolFactory` matches on the [`AmmConfig`] variant, validates the
/// configuration, delegates to the pool's [`FromConfig`] implementation,
/// wraps the result in a [`PoolBox`] and registers it under the pair's
/// canonical [`TokenPair`].  `(X, Y)` and `(Y, X)` resolve to the same
/// pool.
///
/// Pools are handed out as `Arc<PoolBox>`; they synchronize internally,
/// so clones can be used from any thread.  The registry itself is mutated
/// through `&mut self`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use duet_amm::config::{AmmConfig, ConstantProductConfig};
/// use duet_amm::domain::BasisPoints;
/// use duet_amm::error::AmmError;
/// use duet_amm::factory::PoolFactory;
/// use duet_amm::token::InMemoryToken;
/// use duet_amm::traits::{FungibleToken, SwapPool};
///
/// let usd = Arc::new(InMemoryToken::new("USD"));
/// let eth = Arc::new(InMemoryToken::new("ETH"));
/// let config = AmmConfig::ConstantProduct(
///     ConstantProductConfig::new(BasisPoints::new(30)).expect("valid config"),
/// );
///
/// let mut factory = PoolFactory::new();
/// let pool = factory
///     .create_pool(usd.clone(), eth.clone(), &config)
///     .expect("pool created");
/// assert_eq!(pool.fee_rate(), BasisPoints::new(30));
///
/// let found = factory.get_pool(&eth.address(), &usd.address()).expect("registered");
/// assert!(Arc::ptr_eq(&pool, &found));
///
/// assert_eq!(
///     factory.create_pool(eth, usd, &config).err(),
///     Some(AmmError::PairAlreadyExists)
/// );
/// ```
#[derive(Debug, Default)]
pub struct PoolFactory {
    pools: BTreeMap<TokenPair, Arc<PoolBox>>,
    created: Vec<TokenPair>,
}

impl PoolFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a pool for `(token_a, token_b)`.
    ///
    /// # Flow
    ///
    /// 1. Canonicalize the pair; reject identical tokens.
    /// 2. Reject a pair that already has a pool.
    /// 3. Validate the configuration via [`AmmConfig::validate`].
    /// 4. Delegate to the pool's [`FromConfig`] implementation and wrap it
    ///    in the corresponding [`PoolBox`] variant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if both ledgers share an address.
    /// - [`AmmError::PairAlreadyExists`] if the pair is registered.
    /// - [`AmmError::InvalidFee`] or [`AmmError::InvalidConfiguration`] if
    ///   the configuration is invalid or its pool type's feature is not
    ///   enabled.
    pub fn create_pool(
        &mut self,
        token_a: Arc<dyn FungibleToken>,
        token_b: Arc<dyn FungibleToken>,
        config: &AmmConfig,
    ) -> Result<Arc<PoolBox>> {
        let pair = TokenPair::new(token_a.address(), token_b.address())?;
        if self.pools.contains_key(&pair) {
            #[cfg(feature = "tracing")]
            tracing::warn!(token_a = %pair.token_a(), token_b = %pair.token_b(), "pair already has a pool");
            return Err(AmmError::PairAlreadyExists);
        }
        config.validate()?;

        let pool = Arc::new(Self::build(token_a, token_b, config)?);
        self.pools.insert(pair, Arc::clone(&pool));
        self.created.push(pair);

        #[cfg(feature = "tracing")]
        {
            use crate::traits::SwapPool;
            tracing::info!(
                target: "duet_amm::factory",
                pool = %pool.address(),
                kind = %config,
                token_a = %pair.token_a(),
                token_b = %pair.token_b(),
                fee_rate = %config.fee_rate(),
                index = self.created.len() - 1,
                "pool_created"
            );
        }
        Ok(pool)
    }

    fn build(
        token_a: Arc<dyn FungibleToken>,
        token_b: Arc<dyn FungibleToken>,
        config: &AmmConfig,
    ) -> Result<PoolBox> {
        match config {
            #[cfg(feature = "constant-product")]
            AmmConfig::ConstantProduct(cfg) => {
                let pool = crate::pools::ConstantProductPool::from_config(cfg, token_a, token_b)?;
                Ok(PoolBox::ConstantProduct(Box::new(pool)))
            }

            #[cfg(feature = "stable-swap")]
            AmmConfig::StableSwap(cfg) => {
                let pool = crate::pools::StableSwapPool::from_config(cfg, token_a, token_b)?;
                Ok(PoolBox::StableSwap(Box::new(pool)))
            }

            // Catch-all for config variants whose pool feature is disabled.
            #[allow(unreachable_patterns)]
            _ => {
                let _ = (token_a, token_b);
                Err(AmmError::InvalidConfiguration(
                    "requested pool type is not enabled (missing feature flag)",
                ))
            }
        }
    }

    /// Looks up the pool for a pair, in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if both addresses are equal.
    /// - [`AmmError::PoolNotFound`] if no pool is registered.
    pub fn get_pool(&self, token_a: &Address, token_b: &Address) -> Result<Arc<PoolBox>> {
        let pair = TokenPair::new(*token_a, *token_b)?;
        self.pools
            .get(&pair)
            .cloned()
            .ok_or(AmmError::PoolNotFound)
    }

    /// Returns `true` if a pool exists for the pair, in either order.
    #[must_use]
    pub fn contains_pair(&self, token_a: &Address, token_b: &Address) -> bool {
        TokenPair::new(*token_a, *token_b).is_ok_and(|pair| self.pools.contains_key(&pair))
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.created.len()
    }

    /// Registered pools in creation order.
    pub fn pools(&self) -> impl Iterator<Item = &Arc<PoolBox>> + '_ {
        self.created.iter().filter_map(|pair| self.pools.get(pair))
    }
}
