//! Per-pool share accounting.

use std::collections::BTreeMap;

use crate::domain::{Address, Shares};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Tracks the total share supply of one pool and each provider's balance.
///
/// `mint` and `burn` are the only mutators, and each adjusts the total and
/// one position by the same amount, so the sum of all positions always
/// equals [`total_shares`](Self::total_shares).  Providers whose balance
/// drops to zero are removed.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Address, Shares};
/// use duet_amm::ledger::LiquidityLedger;
///
/// let alice = Address::from_label("alice");
/// let mut ledger = LiquidityLedger::new();
/// ledger.mint(&alice, Shares::new(100)).expect("mint");
/// ledger.burn(&alice, Shares::new(40)).expect("burn");
/// assert_eq!(ledger.share_of(&alice), Shares::new(60));
/// assert_eq!(ledger.total_shares(), Shares::new(60));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityLedger {
    total: Shares,
    positions: BTreeMap<Address, Shares>,
}

impl LiquidityLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` shares to `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the total supply would exceed
    /// `u128::MAX`.  Nothing changes on error.
    pub fn mint(&mut self, provider: &Address, amount: Shares) -> Result<()> {
        let total = self.total.safe_add(&amount)?;
        let position = self.share_of(provider).safe_add(&amount)?;
        self.total = total;
        if !position.is_zero() {
            self.positions.insert(*provider, position);
        }
        Ok(())
    }

    /// Debits `amount` shares from `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `amount` exceeds the
    /// provider's balance.  Nothing changes on error.
    pub fn burn(&mut self, provider: &Address, amount: Shares) -> Result<()> {
        let available = self.share_of(provider);
        let Some(position) = available.checked_sub(&amount) else {
            return Err(AmmError::InsufficientShares {
                requested: amount,
                available,
            });
        };
        self.total = self.total.safe_sub(&amount)?;
        if position.is_zero() {
            self.positions.remove(provider);
        } else {
            self.positions.insert(*provider, position);
        }
        Ok(())
    }

    /// Shares held by `provider` (zero if unknown).
    pub fn share_of(&self, provider: &Address) -> Shares {
        self.positions.get(provider).copied().unwrap_or(Shares::ZERO)
    }

    /// Total share supply.
    pub const fn total_shares(&self) -> Shares {
        self.total
    }

    /// Number of providers with a non-zero balance.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterates over `(provider, shares)` in address order.
    pub fn positions(&self) -> impl Iterator<Item = (&Address, &Shares)> {
        self.positions.iter()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alice() -> Address {
        Address::from_label("alice")
    }

    fn bob() -> Address {
        Address::from_label("bob")
    }

    fn sum_of_positions(ledger: &LiquidityLedger) -> u128 {
        ledger.positions().map(|(_, s)| s.get()).sum()
    }

    #[test]
    fn mint_credits_provider_and_total() {
        let mut ledger = LiquidityLedger::new();
        assert_eq!(ledger.mint(&alice(), Shares::new(100)), Ok(()));
        assert_eq!(ledger.mint(&bob(), Shares::new(50)), Ok(()));
        assert_eq!(ledger.share_of(&alice()), Shares::new(100));
        assert_eq!(ledger.share_of(&bob()), Shares::new(50));
        assert_eq!(ledger.total_shares(), Shares::new(150));
        assert_eq!(ledger.provider_count(), 2);
    }

    #[test]
    fn burn_more_than_held_fails_without_change() {
        let mut ledger = LiquidityLedger::new();
        assert_eq!(ledger.mint(&alice(), Shares::new(10)), Ok(()));
        let before = ledger.clone();
        let Err(e) = ledger.burn(&alice(), Shares::new(11)) else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            AmmError::InsufficientShares {
                requested: Shares::new(11),
                available: Shares::new(10),
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn burn_unknown_provider() {
        let mut ledger = LiquidityLedger::new();
        assert!(matches!(
            ledger.burn(&bob(), Shares::new(1)),
            Err(AmmError::InsufficientShares { .. })
        ));
    }

    #[test]
    fn full_burn_removes_position() {
        let mut ledger = LiquidityLedger::new();
        assert_eq!(ledger.mint(&alice(), Shares::new(10)), Ok(()));
        assert_eq!(ledger.burn(&alice(), Shares::new(10)), Ok(()));
        assert_eq!(ledger.provider_count(), 0);
        assert!(ledger.total_shares().is_zero());
    }

    #[test]
    fn mint_overflow_leaves_ledger_unchanged() {
        let mut ledger = LiquidityLedger::new();
        assert_eq!(ledger.mint(&alice(), Shares::new(u128::MAX)), Ok(()));
        assert!(ledger.mint(&bob(), Shares::new(1)).is_err());
        assert_eq!(ledger.share_of(&bob()), Shares::ZERO);
        assert_eq!(ledger.total_shares(), Shares::new(u128::MAX));
    }

    #[test]
    fn zero_mint_creates_no_position() {
        let mut ledger = LiquidityLedger::new();
        assert_eq!(ledger.mint(&alice(), Shares::ZERO), Ok(()));
        assert_eq!(ledger.provider_count(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn positions_always_sum_to_total(
            ops in prop::collection::vec((0u8..4, any::<bool>(), 0u64..1_000), 1..50)
        ) {
            let mut ledger = LiquidityLedger::new();
            for (who, is_mint, amount) in ops {
                let provider = Address::new([who; 20]);
                let shares = Shares::new(u128::from(amount));
                if is_mint {
                    let _ = ledger.mint(&provider, shares);
                } else {
                    let _ = ledger.burn(&provider, shares);
                }
                prop_assert_eq!(sum_of_positions(&ledger), ledger.total_shares().get());
            }
        }
    }
}
