//! Configuration for constant-product pools.

use crate::domain::BasisPoints;
use crate::error::{AmmError, Result};

/// Validates a swap fee rate shared by every pool kind.
///
/// # Errors
///
/// Returns [`AmmError::InvalidFee`] unless `fee_rate < 10 000` bp; a 100%
/// fee would leave no input to price.
pub(crate) fn validate_fee(fee_rate: BasisPoints) -> Result<()> {
    if fee_rate >= BasisPoints::MAX_PERCENT {
        return Err(AmmError::InvalidFee("fee rate must be below 10000 bp"));
    }
    Ok(())
}

/// Configuration for a constant-product pool (`x · y = k`).
///
/// The only parameter is the swap fee, fixed for the pool's lifetime.
/// Token pair and reserves are not part of the config: the pair comes from
/// the token ledgers handed to the factory, and reserves from the first
/// deposit.
///
/// # Examples
///
/// ```
/// use duet_amm::config::ConstantProductConfig;
/// use duet_amm::domain::BasisPoints;
///
/// let cfg = ConstantProductConfig::new(BasisPoints::new(30)).expect("valid fee");
/// assert_eq!(cfg.fee_rate(), BasisPoints::new(30));
/// assert!(ConstantProductConfig::new(BasisPoints::new(10_000)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstantProductConfig {
    fee_rate: BasisPoints,
}

impl ConstantProductConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `fee_rate` is 100% or more.
    pub fn new(fee_rate: BasisPoints) -> Result<Self> {
        let config = Self { fee_rate };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `fee_rate` is 100% or more.
    pub fn validate(&self) -> Result<()> {
        validate_fee(self.fee_rate)
    }

    /// Swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }
}
