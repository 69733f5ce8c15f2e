//! StableSwap pool implementation (Curve style).
//!
//! Prices swaps on the amplified invariant
//!
//! ```text
//! A·nⁿ·(x + y) + D = A·nⁿ·D + Dⁿ⁺¹ / (nⁿ·x·y)        n = 2
//! ```
//!
//! which behaves like constant sum near the 1:1 peg and like constant
//! product far from it.  Both `D` and the post-swap reserve are found with
//! the Newton solvers in [`crate::math::stable_swap`].
//!
//! # Swap Algorithm (Token A → Token B)
//!
//! 1. `D = solve_invariant(reserve_a, reserve_b)`
//! 2. `net_input = floor(amount_in × (10 000 − fee_bps) / 10 000)`
//! 3. `y = solve_reserve(reserve_a + net_input, D)`
//! 4. `amount_out = reserve_b − (y + 1)`
//!
//! The extra unit in step 4 covers the solver's integer truncation so the
//! pool never pays out more than the curve allows.
//!
//! # Shares
//!
//! Shares track `D`.  The first deposit mints `D` itself; later deposits
//! mint `total × (D_after − D_before) / D_before`, so an unbalanced
//! deposit earns fewer shares than its nominal value.  Single-sided
//! deposits are accepted once the pool is seeded.

use std::sync::Arc;

use super::Pool;
use crate::config::StableSwapConfig;
use crate::domain::{Amount, DepositPlan, DepositRequest, Reserves, Rounding, Shares};
use crate::error::{AmmError, Result};
use crate::math::mul_div;
use crate::math::stable_swap::{solve_invariant, solve_reserve};
use crate::traits::{FromConfig, FungibleToken, PricingCurve};

/// The StableSwap pricing curve with amplification `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableSwap {
    amplification: u64,
}

impl StableSwap {
    /// Creates the curve.  The amplification is validated by
    /// [`StableSwapConfig`].
    #[must_use]
    pub const fn new(amplification: u64) -> Self {
        Self { amplification }
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u64 {
        self.amplification
    }
}

/// A two-asset StableSwap pool.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use duet_amm::config::StableSwapConfig;
/// use duet_amm::domain::{Address, Amount, BasisPoints, DepositRequest};
/// use duet_amm::pools::StableSwapPool;
/// use duet_amm::token::InMemoryToken;
/// use duet_amm::traits::{FromConfig, FungibleToken, LiquidityPool, SwapPool};
///
/// let usdc = Arc::new(InMemoryToken::new("USDC"));
/// let usdt = Arc::new(InMemoryToken::new("USDT"));
/// let cfg = StableSwapConfig::new(BasisPoints::new(4), 100).expect("valid config");
/// let pool = StableSwapPool::from_config(&cfg, usdc.clone(), usdt.clone())
///     .expect("pool created");
///
/// let alice = Address::from_label("alice");
/// for token in [&usdc, &usdt] {
///     token.mint(&alice, Amount::new(10_000_000)).expect("mint");
///     token.approve(&alice, &pool.address(), Amount::MAX);
/// }
///
/// let request = DepositRequest::new(Amount::new(1_000_000), Amount::new(1_000_000));
/// pool.add_liquidity(&alice, &request).expect("seeded");
/// assert_eq!(pool.invariant(), Ok(2_000_000));
///
/// let result = pool
///     .swap(&alice, Amount::new(10_000), &usdc.address(), Amount::ZERO)
///     .expect("swap ok");
/// assert_eq!(result.amount_out(), Amount::new(9_995));
/// ```
pub type StableSwapPool = Pool<StableSwap>;

impl PricingCurve for StableSwap {
    const KIND: &'static str = "stable-swap";

    fn amount_out(
        &self,
        net_input: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount> {
        let d = solve_invariant(reserve_in.get(), reserve_out.get(), self.amplification)?;
        let new_in = reserve_in
            .checked_add(&net_input)
            .ok_or(AmmError::Overflow("reserve_in + net_input"))?;
        let y = solve_reserve(new_in.get(), d, self.amplification)?;
        let new_out = y
            .checked_add(1)
            .ok_or(AmmError::Overflow("reserve y + 1"))?;
        Ok(reserve_out
            .checked_sub(&Amount::new(new_out))
            .unwrap_or(Amount::ZERO))
    }

    fn invariant(&self, reserves: &Reserves) -> Result<u128> {
        solve_invariant(reserves.a().get(), reserves.b().get(), self.amplification)
    }

    fn plan_deposit(
        &self,
        reserves: &Reserves,
        total_shares: Shares,
        request: &DepositRequest,
    ) -> Result<DepositPlan> {
        let (amount_a, amount_b) = (request.amount_a(), request.amount_b());

        if total_shares.is_zero() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InsufficientInitialLiquidity);
            }
            let d = solve_invariant(amount_a.get(), amount_b.get(), self.amplification)?;
            return Ok(DepositPlan {
                shares: Shares::new(d),
                amount_a,
                amount_b,
            });
        }

        let after = Reserves::new(
            reserves
                .a()
                .checked_add(&amount_a)
                .ok_or(AmmError::Overflow("reserve_a + deposit"))?,
            reserves
                .b()
                .checked_add(&amount_b)
                .ok_or(AmmError::Overflow("reserve_b + deposit"))?,
        );
        let d_before = self.invariant(reserves)?;
        let d_after = self.invariant(&after)?;
        let growth = d_after.saturating_sub(d_before);
        let shares = mul_div(total_shares.get(), growth, d_before, Rounding::Down)?;
        Ok(DepositPlan {
            shares: Shares::new(shares),
            amount_a,
            amount_b,
        })
    }
}

impl FromConfig<StableSwapConfig> for StableSwapPool {
    fn from_config(
        config: &StableSwapConfig,
        token_a: Arc<dyn FungibleToken>,
        token_b: Arc<dyn FungibleToken>,
    ) -> Result<Self> {
        config.validate()?;
        Pool::new(
            StableSwap::new(config.amplification()),
            config.fee_rate(),
            token_a,
            token_b,
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BasisPoints, PoolPhase};
    use crate::pools::fixtures::{fixture, Fixture, FUNDING};
    use crate::traits::{LiquidityPool, SwapPool};

    fn pool(fee: u32, amp: u64) -> Fixture<StableSwap> {
        let Ok(cfg) = StableSwapConfig::new(BasisPoints::new(fee), amp) else {
            panic!("valid config");
        };
        fixture(&cfg)
    }

    #[test]
    fn from_config_carries_amplification() {
        let f = pool(4, 250);
        assert_eq!(f.pool.curve().amplification(), 250);
        assert_eq!(f.pool.phase(), Ok(PoolPhase::Empty));
        assert_eq!(f.pool.invariant(), Ok(0));
    }

    #[test]
    fn first_deposit_mints_invariant() {
        let f = pool(4, 100);
        let receipt = f.seed(1_000_000, 1_000_000);
        assert_eq!(receipt.shares_minted(), Shares::new(2_000_000));
        assert_eq!(f.pool.invariant(), Ok(2_000_000));
        assert_eq!(f.pool.phase(), Ok(PoolPhase::Seeded));
    }

    #[test]
    fn first_deposit_needs_both_sides() {
        let f = pool(4, 100);
        assert_eq!(
            f.deposit(0, 1_000_000),
            Err(AmmError::InsufficientInitialLiquidity)
        );
    }

    #[test]
    fn balanced_deposit_mints_proportionally() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let Ok(receipt) = f.deposit(100_000, 100_000) else {
            panic!("deposit");
        };
        assert_eq!(receipt.shares_minted(), Shares::new(200_000));
        assert_eq!(f.pool.total_shares(), Ok(Shares::new(2_200_000)));
    }

    #[test]
    fn single_sided_deposit_earns_less() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let Ok(receipt) = f.deposit(100_000, 0) else {
            panic!("single-sided deposit");
        };
        assert_eq!(receipt.amount_a_used(), Amount::new(100_000));
        assert_eq!(receipt.amount_b_used(), Amount::ZERO);
        assert_eq!(receipt.shares_minted(), Shares::new(99_988));
        assert_eq!(f.balances(&f.lp), (FUNDING - 1_100_000, FUNDING - 1_000_000));
    }

    #[test]
    fn swap_near_peg() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let Ok(result) = f.sell_a(10_000) else {
            panic!("swap");
        };
        assert_eq!(result.fee(), Amount::new(4));
        assert_eq!(result.amount_out(), Amount::new(9_995));
        assert_eq!(
            result.reserves_after(),
            Reserves::new(Amount::new(1_010_000), Amount::new(990_005))
        );
        assert_eq!(f.balances(&f.pool.address()), (1_010_000, 990_005));
        assert_eq!(f.pool.phase(), Ok(PoolPhase::Active));
    }

    #[test]
    fn low_amplification_prices_worse() {
        let f = pool(30, 1);
        let _ = f.seed(1_000_000, 1_000_000);
        let Ok(result) = f.sell_a(10_000) else {
            panic!("swap");
        };
        assert_eq!(result.amount_out(), Amount::new(9_937));
    }

    #[test]
    fn large_swap_moves_off_peg() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let Ok(result) = f.sell_a(1_000_000) else {
            panic!("swap");
        };
        assert_eq!(result.amount_out(), Amount::new(952_242));
    }

    #[test]
    fn dust_swap_pays_nothing() {
        let f = pool(0, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        assert_eq!(f.sell_a(1), Err(AmmError::InsufficientLiquidity));
        assert!(f.sell_a(2).is_ok());
    }

    #[test]
    fn invariant_never_decreases_across_swaps() {
        let f = pool(4, 100);
        let _ = f.seed(3_000_000, 2_000_000);
        let Ok(mut d) = f.pool.invariant() else {
            panic!("invariant");
        };
        for amount in [50_000u128, 123_456, 10_000, 900_000, 7] {
            for result in [f.sell_a(amount), f.sell_b(amount)] {
                let Ok(_) = result else {
                    panic!("swap {amount}");
                };
                let Ok(d_after) = f.pool.invariant() else {
                    panic!("invariant");
                };
                assert!(d_after >= d, "D decreased: {d_after} < {d}");
                d = d_after;
            }
        }
    }

    #[test]
    fn full_withdrawal_returns_everything() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let _ = f.sell_b(10_000);
        let Ok(withdrawal) = f.pool.remove_liquidity(&f.lp, Shares::new(2_000_000)) else {
            panic!("remove all");
        };
        assert_eq!(withdrawal.amount_a(), Amount::new(990_005));
        assert_eq!(withdrawal.amount_b(), Amount::new(1_010_000));
        assert_eq!(f.pool.phase(), Ok(PoolPhase::Empty));
        assert_eq!(f.pool.reserves(), Ok(Reserves::EMPTY));
    }

    #[test]
    fn slippage_guard_applies() {
        let f = pool(4, 100);
        let _ = f.seed(1_000_000, 1_000_000);
        let token_a = f.token_a.address();
        assert_eq!(
            f.pool
                .swap(&f.trader, Amount::new(10_000), &token_a, Amount::new(10_000)),
            Err(AmmError::SlippageExceeded {
                amount_out: Amount::new(9_995),
                min_amount_out: Amount::new(10_000),
            })
        );
    }
}
