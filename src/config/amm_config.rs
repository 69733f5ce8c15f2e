//! Top-level pool configuration enum.
//!
//! [`AmmConfig`] is the declarative blueprint handed to the
//! [`PoolFactory`](crate::factory::PoolFactory).  Each variant wraps the
//! immutable parameters of one pool family.
//!
//! ```text
//! match config {
//!     AmmConfig::ConstantProduct(cfg) => ConstantProductPool::from_config(cfg, a, b),
//!     AmmConfig::StableSwap(cfg)      => StableSwapPool::from_config(cfg, a, b),
//! }
//! ```

use super::{ConstantProductConfig, StableSwapConfig};
use crate::domain::BasisPoints;
use crate::error::Result;

/// Configuration for any supported pool kind.
///
/// # Examples
///
/// ```
/// use duet_amm::config::{AmmConfig, StableSwapConfig};
/// use duet_amm::domain::BasisPoints;
///
/// let cfg = AmmConfig::StableSwap(StableSwapConfig::new(BasisPoints::new(4), 100).expect("valid"));
/// assert!(cfg.is_stable_swap());
/// assert_eq!(cfg.to_string(), "StableSwap");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmmConfig {
    /// Constant-product pool (Uniswap V2 style).
    ConstantProduct(ConstantProductConfig),
    /// StableSwap pool (Curve style).
    StableSwap(StableSwapConfig),
}

impl AmmConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Whatever the variant's own `validate()` returns.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ConstantProduct(cfg) => cfg.validate(),
            Self::StableSwap(cfg) => cfg.validate(),
        }
    }

    /// Swap fee rate of the configured pool.
    #[must_use]
    pub const fn fee_rate(&self) -> BasisPoints {
        match self {
            Self::ConstantProduct(cfg) => cfg.fee_rate(),
            Self::StableSwap(cfg) => cfg.fee_rate(),
        }
    }

    /// Returns `true` for [`AmmConfig::ConstantProduct`].
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct(_))
    }

    /// Returns `true` for [`AmmConfig::StableSwap`].
    #[must_use]
    pub const fn is_stable_swap(&self) -> bool {
        matches!(self, Self::StableSwap(_))
    }
}

impl core::fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConstantProduct(_) => write!(f, "ConstantProduct"),
            Self::StableSwap(_) => write!(f, "StableSwap"),
        }
    }
}

impl From<ConstantProductConfig> for AmmConfig {
    fn from(cfg: ConstantProductConfig) -> Self {
        Self::ConstantProduct(cfg)
    }
}

impl From<StableSwapConfig> for AmmConfig {
    fn from(cfg: StableSwapConfig) -> Self {
        Self::StableSwap(cfg)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn cp() -> AmmConfig {
        let Ok(cfg) = ConstantProductConfig::new(BasisPoints::new(30)) else {
            panic!("valid config");
        };
        cfg.into()
    }

    fn ss() -> AmmConfig {
        let Ok(cfg) = StableSwapConfig::new(BasisPoints::new(4), 100) else {
            panic!("valid config");
        };
        cfg.into()
    }

    #[test]
    fn predicates() {
        assert!(cp().is_constant_product());
        assert!(!cp().is_stable_swap());
        assert!(ss().is_stable_swap());
    }

    #[test]
    fn fee_rate_passthrough() {
        assert_eq!(cp().fee_rate(), BasisPoints::new(30));
        assert_eq!(ss().fee_rate(), BasisPoints::new(4));
    }

    #[test]
    fn validate_delegates() {
        assert_eq!(cp().validate(), Ok(()));
        assert_eq!(ss().validate(), Ok(()));
    }

    #[test]
    fn display_names() {
        assert_eq!(cp().to_string(), "ConstantProduct");
        assert_eq!(ss().to_string(), "StableSwap");
    }
}
