//! Constant Product pool implementation (Uniswap V2 style).
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two tokens.  Fees are deducted from the input amount **before**
//! the pricing formula is applied.
//!
//! # Swap Algorithm (Token A → Token B)
//!
//! 1. `net_input = floor(amount_in × (10 000 − fee_bps) / 10 000)`
//! 2. `reserve_b' = ceil(reserve_a × reserve_b / (reserve_a + net_input))`
//! 3. `amount_out = reserve_b − reserve_b'`
//! 4. `reserve_a += amount_in` (fee stays in the pool)
//! 5. `reserve_b -= amount_out`
//!
//! Rounding the new output reserve up makes `amount_out` the largest
//! integer with `(reserve_a + net_input) × (reserve_b − amount_out) ≥ k`.
//!
//! # Invariant
//!
//! After every swap, `k_after ≥ k_before` because the fee component
//! increases reserves without a corresponding output.
//!
//! # Shares
//!
//! The first deposit mints `floor(√(amount_a × amount_b))` shares.  Later
//! deposits are clamped to the reserve ratio and mint
//! `total × accepted / reserve` on the limiting side.

use std::sync::Arc;

use super::Pool;
use crate::config::ConstantProductConfig;
use crate::domain::{Amount, DepositPlan, DepositRequest, Reserves, Rounding, Shares};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, sqrt_of_product};
use crate::traits::{FromConfig, FungibleToken, PricingCurve};

/// The `x × y = k` pricing curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantProduct;

/// A Constant Product AMM pool (`x · y = k`).
///
/// Created from a [`ConstantProductConfig`] via [`FromConfig`].  The pool
/// starts empty; its first deposit sets the price.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use duet_amm::config::ConstantProductConfig;
/// use duet_amm::domain::{Address, Amount, BasisPoints, DepositRequest};
/// use duet_amm::pools::ConstantProductPool;
/// use duet_amm::token::InMemoryToken;
/// use duet_amm::traits::{FromConfig, FungibleToken, LiquidityPool, SwapPool};
///
/// let usd = Arc::new(InMemoryToken::new("USD"));
/// let eth = Arc::new(InMemoryToken::new("ETH"));
/// let cfg = ConstantProductConfig::new(BasisPoints::new(30)).expect("valid config");
/// let pool = ConstantProductPool::from_config(&cfg, usd.clone(), eth.clone())
///     .expect("pool created");
///
/// let alice = Address::from_label("alice");
/// for token in [&usd, &eth] {
///     token.mint(&alice, Amount::new(10_000)).expect("mint");
///     token.approve(&alice, &pool.address(), Amount::MAX);
/// }
///
/// let request = DepositRequest::new(Amount::new(1_000), Amount::new(1_000));
/// let receipt = pool.add_liquidity(&alice, &request).expect("seeded");
/// assert_eq!(receipt.shares_minted().get(), 1_000);
///
/// let result = pool
///     .swap(&alice, Amount::new(100), &usd.address(), Amount::ZERO)
///     .expect("swap ok");
/// assert_eq!(result.amount_out(), Amount::new(90));
/// ```
pub type ConstantProductPool = Pool<ConstantProduct>;

impl PricingCurve for ConstantProduct {
    const KIND: &'static str = "constant-product";

    fn amount_out(
        &self,
        net_input: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount> {
        let denominator = reserve_in
            .checked_add(&net_input)
            .ok_or(AmmError::Overflow("reserve_in + net_input"))?;
        let new_out = mul_div(
            reserve_in.get(),
            reserve_out.get(),
            denominator.get(),
            Rounding::Up,
        )?;
        reserve_out
            .checked_sub(&Amount::new(new_out))
            .ok_or(AmmError::Underflow("reserve_out - k / new_reserve_in"))
    }

    fn invariant(&self, reserves: &Reserves) -> Result<u128> {
        sqrt_of_product(reserves.a().get(), reserves.b().get())
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
            let shares = sqrt_of_product(amount_a.get(), amount_b.get())?;
            return Ok(DepositPlan {
                shares: Shares::new(shares),
                amount_a,
                amount_b,
            });
        }

        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let (reserve_a, reserve_b) = (reserves.a().get(), reserves.b().get());

        let optimal_b = mul_div(amount_a.get(), reserve_b, reserve_a, Rounding::Down)?;
        let (used_a, used_b) = if optimal_b <= amount_b.get() {
            let used_b = Amount::new(optimal_b);
            request.check_clamp(amount_b, used_b)?;
            (amount_a, used_b)
        } else {
            let optimal_a = mul_div(amount_b.get(), reserve_a, reserve_b, Rounding::Down)?;
            let used_a = Amount::new(optimal_a);
            request.check_clamp(amount_a, used_a)?;
            (used_a, amount_b)
        };

        let total = total_shares.get();
        let by_a = mul_div(total, used_a.get(), reserve_a, Rounding::Down)?;
        let by_b = mul_div(total, used_b.get(), reserve_b, Rounding::Down)?;
        Ok(DepositPlan {
            shares: Shares::new(by_a.min(by_b)),
            amount_a: used_a,
            amount_b: used_b,
        })
    }
}

impl FromConfig<ConstantProductConfig> for ConstantProductPool {
    fn from_config(
        config: &ConstantProductConfig,
        token_a: Arc<dyn FungibleToken>,
        token_b: Arc<dyn FungibleToken>,
    ) -> Result<Self> {
        config.validate()?;
        Pool::new(ConstantProduct, config.fee_rate(), token_a, token_b)
    }
}
