//! Configuration for StableSwap pools (Curve style).

use super::constant_product::validate_fee;
use crate::domain::BasisPoints;
use crate::error::{AmmError, Result};
use crate::math::stable_swap::MAX_AMPLIFICATION;

/// Configuration for a two-asset StableSwap pool.
///
/// # Parameters
///
/// - `fee_rate`: swap fee, below 100%.
/// - `amplification`: the `A` coefficient in `1..=1_000_000`.  Low values
///   behave like constant product; high values flatten the curve toward
///   constant sum around the 1:1 peg.
///
/// # Examples
///
/// ```
/// use duet_amm::config::StableSwapConfig;
/// use duet_amm::domain::BasisPoints;
///
/// let cfg = StableSwapConfig::new(BasisPoints::new(4), 100).expect("valid");
/// assert_eq!(cfg.amplification(), 100);
/// assert!(StableSwapConfig::new(BasisPoints::new(4), 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StableSwapConfig {
    fee_rate: BasisPoints,
    amplification: u64,
}

impl StableSwapConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if `fee_rate` is 100% or more.
    /// - [`AmmError::InvalidConfiguration`] if `amplification` is out of
    ///   range.
    pub fn new(fee_rate: BasisPoints, amplification: u64) -> Result<Self> {
        let config = Self {
            fee_rate,
            amplification,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<()> {
        validate_fee(self.fee_rate)?;
        if self.amplification == 0 || self.amplification > MAX_AMPLIFICATION {
            return Err(AmmError::InvalidConfiguration(
                "amplification must be in 1..=1000000",
            ));
        }
        Ok(())
    }

    /// Swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u64 {
        self.amplification
    }
}
