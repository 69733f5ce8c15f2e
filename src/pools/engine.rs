//! Generic pool engine shared by every pricing curve.
//!
//! [`Pool`] owns everything that does not depend on the invariant: the
//! re-entrancy guard, reserve and share accounting, settlement through the
//! token interface, phase tracking and event emission.  A
//! [`PricingCurve`] supplies the numbers.
//!
//! # Operation Shape
//!
//! Every mutating operation follows the same three steps inside the guard:
//!
//! 1. **Plan**: compute the full outcome from the current state, including
//!    the reserves it would leave behind.  Any error here leaves nothing
//!    changed.
//! 2. **Settle**: move tokens through a [`Settlement`].  A failing leg
//!    unwinds the legs before it.  Legs that cannot be unwound are
//!    committed as they stand, so reserves keep matching the pool's token
//!    balances.
//! 3. **Commit**: write reserves, shares and phase.  Overflow has already
//!    been ruled out in step 1, so this cannot fail.

use std::sync::Arc;

use super::guard::ReentrancyGuard;
use super::settlement::{Settlement, Unsettled};
use crate::domain::{
    Address, Amount, BasisPoints, DepositReceipt, DepositRequest, PoolPhase, Reserves, Rounding,
    Shares, Side, SwapResult, TokenPair, Withdrawal,
};
use crate::error::{AmmError, Result};
use crate::ledger::LiquidityLedger;
use crate::math::mul_div;
use crate::traits::{FungibleToken, LiquidityPool, PricingCurve, SwapPool};

/// Namespace for deterministic pool account derivation.
const POOL_NAMESPACE: &str = "duet-amm/pool";

/// Mutable pool state, reachable only through the guard.
#[derive(Debug, Default)]
struct PoolState {
    reserves: Reserves,
    ledger: LiquidityLedger,
    phase: PoolPhase,
}

/// A two-asset pool priced by `C`.
///
/// The pool holds its tokens under its own [`Address`], derived from the
/// curve kind and the canonical pair, so the same pair can host one pool
/// per curve without the accounts colliding.  Callers must approve that
/// address on each token before swapping or depositing.
///
/// All methods take `&self`; share a pool across threads with [`Arc`].
#[derive(Debug)]
pub struct Pool<C: PricingCurve> {
    address: Address,
    pair: TokenPair,
    token_a: Arc<dyn FungibleToken>,
    token_b: Arc<dyn FungibleToken>,
    fee_rate: BasisPoints,
    curve: C,
    state: ReentrancyGuard<PoolState>,
}

impl<C: PricingCurve> Pool<C> {
    /// Creates an empty pool over two token ledgers.
    ///
    /// The ledgers may be given in either order; they are assigned to
    /// sides by address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if both ledgers share an address.
    /// - [`AmmError::InvalidFee`] if `fee_rate` is 100% or more.
    pub(crate) fn new(
        curve: C,
        fee_rate: BasisPoints,
        token_x: Arc<dyn FungibleToken>,
        token_y: Arc<dyn FungibleToken>,
    ) -> Result<Self> {
        if fee_rate >= BasisPoints::MAX_PERCENT {
            return Err(AmmError::InvalidFee("fee rate must be below 10000 bp"));
        }
        let pair = TokenPair::new(token_x.address(), token_y.address())?;
        let (token_a, token_b) = if token_x.address() == pair.token_a() {
            (token_x, token_y)
        } else {
            (token_y, token_x)
        };
        let address = Address::derive(
            POOL_NAMESPACE,
            &[
                C::KIND.as_bytes(),
                pair.token_a().as_bytes(),
                pair.token_b().as_bytes(),
            ],
        );
        Ok(Self {
            address,
            pair,
            token_a,
            token_b,
            fee_rate,
            curve,
            state: ReentrancyGuard::new(PoolState::default()),
        })
    }

    /// The pricing curve.
    #[must_use]
    pub const fn curve(&self) -> &C {
        &self.curve
    }

    fn token(&self, side: Side) -> &dyn FungibleToken {
        match side {
            Side::A => self.token_a.as_ref(),
            Side::B => self.token_b.as_ref(),
        }
    }

    /// Prices a swap against `reserves` without touching state.
    fn compute_swap(
        &self,
        reserves: &Reserves,
        amount_in: Amount,
        token_in: &Address,
    ) -> Result<SwapResult> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let side_in = self.pair.side_of(token_in)?;
        let (reserve_in, reserve_out) = reserves.oriented(side_in);
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let net_input = self.fee_rate.apply_complement(amount_in, Rounding::Down)?;
        if net_input.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let fee = amount_in
            .checked_sub(&net_input)
            .ok_or(AmmError::Underflow("fee: amount_in - net_input"))?;

        let amount_out = self.curve.amount_out(net_input, reserve_in, reserve_out)?;
        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let new_in = reserve_in
            .checked_add(&amount_in)
            .ok_or(AmmError::Overflow("reserve_in + amount_in"))?;
        let new_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(AmmError::Underflow("reserve_out - amount_out"))?;

        SwapResult::new(
            side_in,
            amount_in,
            amount_out,
            fee,
            Reserves::from_oriented(side_in, new_in, new_out),
        )
    }

    /// Commits the legs of a failed settlement that could not be reversed
    /// and returns the error to report.
    ///
    /// Retained pulls join the reserves.  Released pushes leave them, and
    /// `provider` forfeits up to `shares` in proportion to the invariant
    /// the payout removed, rounded up.
    fn absorb(
        &self,
        state: &mut PoolState,
        provider: &Address,
        shares: Shares,
        unsettled: Unsettled,
    ) -> AmmError {
        if unsettled.is_clean() {
            return unsettled.error;
        }
        if let Err(err) = self.reconcile(state, provider, shares, &unsettled) {
            #[cfg(feature = "tracing")]
            tracing::error!(pool = %self.address, error = %err, "could not reconcile reserves");
            return err;
        }

        #[cfg(feature = "tracing")]
        {
            tracing::error!(
                target: "duet_amm::pool",
                pool = %self.address,
                kind = C::KIND,
                provider = %provider,
                error = %unsettled.error,
                "partial_settlement"
            );
            self.emit_sync(&state.reserves);
        }
        AmmError::PartialSettlement(Box::new(unsettled.error))
    }

    fn reconcile(
        &self,
        state: &mut PoolState,
        provider: &Address,
        shares: Shares,
        unsettled: &Unsettled,
    ) -> Result<()> {
        let (mut a, mut b) = (state.reserves.a(), state.reserves.b());
        for (token, amount) in &unsettled.retained {
            let slot = match self.pair.side_of(token)? {
                Side::A => &mut a,
                Side::B => &mut b,
            };
            *slot = slot
                .checked_add(amount)
                .ok_or(AmmError::Overflow("reserve + retained transfer"))?;
        }
        for (token, amount) in &unsettled.released {
            let slot = match self.pair.side_of(token)? {
                Side::A => &mut a,
                Side::B => &mut b,
            };
            *slot = slot
                .checked_sub(amount)
                .ok_or(AmmError::Underflow("reserve - released transfer"))?;
        }
        let reserves = Reserves::new(a, b);

        let forfeited = if unsettled.released.is_empty() {
            Shares::ZERO
        } else {
            self.forfeited_shares(&state.reserves, &reserves, state.ledger.total_shares(), shares)
        };
        state.ledger.burn(provider, forfeited)?;
        state.reserves = reserves;
        state.phase = if state.ledger.total_shares().is_zero() {
            PoolPhase::Empty
        } else {
            state.phase.after_activity()
        };
        Ok(())
    }

    /// Shares matching the invariant lost between `before` and `after`,
    /// rounded up and clamped to `1..=cap`.
    fn forfeited_shares(
        &self,
        before: &Reserves,
        after: &Reserves,
        total: Shares,
        cap: Shares,
    ) -> Shares {
        let burned = self.curve.invariant(before).and_then(|before| {
            let after = self.curve.invariant(after).unwrap_or(0);
            mul_div(
                total.get(),
                before.saturating_sub(after),
                before,
                Rounding::Up,
            )
        });
        match burned {
            Ok(burned) => Shares::new(burned.max(1).min(cap.get())),
            Err(_) => cap,
        }
    }

    #[cfg(feature = "tracing")]
    fn emit_sync(&self, reserves: &Reserves) {
        tracing::info!(
            target: "duet_amm::pool",
            pool = %self.address,
            kind = C::KIND,
            reserve_a = %reserves.a(),
            reserve_b = %reserves.b(),
            "sync"
        );
    }
}

impl<C: PricingCurve> SwapPool for Pool<C> {
    fn address(&self) -> Address {
        self.address
    }

    fn token_pair(&self) -> &TokenPair {
        &self.pair
    }

    fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }

    fn reserves(&self) -> Result<Reserves> {
        self.state.enter("reserves", |state| Ok(state.reserves))
    }

    fn invariant(&self) -> Result<u128> {
        self.state
            .enter("invariant", |state| self.curve.invariant(&state.reserves))
    }

    fn quote(&self, amount_in: Amount, token_in: &Address) -> Result<SwapResult> {
        self.state.enter("quote", |state| {
            self.compute_swap(&state.reserves, amount_in, token_in)
        })
    }

    fn swap(
        &self,
        caller: &Address,
        amount_in: Amount,
        token_in: &Address,
        min_amount_out: Amount,
    ) -> Result<SwapResult> {
        self.state.enter("swap", |state| {
            let result = self.compute_swap(&state.reserves, amount_in, token_in)?;
            if result.amount_out() < min_amount_out {
                return Err(AmmError::SlippageExceeded {
                    amount_out: result.amount_out(),
                    min_amount_out,
                });
            }

            let side_in = result.side_in();
            Settlement::new(self.address)
                .pull(self.token(side_in), *caller, result.amount_in())
                .push(self.token(side_in.other()), *caller, result.amount_out())
                .execute()
                .map_err(|unsettled| self.absorb(state, caller, Shares::ZERO, unsettled))?;

            state.reserves = result.reserves_after();
            state.phase = state.phase.after_activity();

            #[cfg(feature = "tracing")]
            {
                tracing::info!(
                    target: "duet_amm::pool",
                    pool = %self.address,
                    kind = C::KIND,
                    caller = %caller,
                    token_in = %token_in,
                    amount_in = %result.amount_in(),
                    amount_out = %result.amount_out(),
                    fee = %result.fee(),
                    "swap"
                );
                self.emit_sync(&state.reserves);
            }
            Ok(result)
        })
    }
}

impl<C: PricingCurve> LiquidityPool for Pool<C> {
    fn add_liquidity(
        &self,
        provider: &Address,
        request: &DepositRequest,
    ) -> Result<DepositReceipt> {
        self.state.enter("add_liquidity", |state| {
            if request.is_empty() {
                return Err(AmmError::ZeroAmount);
            }
            let total = state.ledger.total_shares();
            let plan = self.curve.plan_deposit(&state.reserves, total, request)?;
            if plan.shares.is_zero() {
                return Err(if total.is_zero() {
                    AmmError::InsufficientInitialLiquidity
                } else {
                    AmmError::ZeroSharesMinted
                });
            }
            let _total_after = total
                .checked_add(&plan.shares)
                .ok_or(AmmError::Overflow("total shares"))?;
            let reserves_after = Reserves::new(
                state
                    .reserves
                    .a()
                    .checked_add(&plan.amount_a)
                    .ok_or(AmmError::Overflow("reserve_a + deposit"))?,
                state
                    .reserves
                    .b()
                    .checked_add(&plan.amount_b)
                    .ok_or(AmmError::Overflow("reserve_b + deposit"))?,
            );

            Settlement::new(self.address)
                .pull(self.token_a.as_ref(), *provider, plan.amount_a)
                .pull(self.token_b.as_ref(), *provider, plan.amount_b)
                .execute()
                .map_err(|unsettled| self.absorb(state, provider, Shares::ZERO, unsettled))?;

            state.ledger.mint(provider, plan.shares)?;
            state.reserves = reserves_after;
            state.phase = state.phase.after_deposit();

            #[cfg(feature = "tracing")]
            {
                tracing::info!(
                    target: "duet_amm::pool",
                    pool = %self.address,
                    kind = C::KIND,
                    provider = %provider,
                    shares = %plan.shares,
                    amount_a = %plan.amount_a,
                    amount_b = %plan.amount_b,
                    "mint"
                );
                self.emit_sync(&reserves_after);
            }
            Ok(DepositReceipt::new(plan, reserves_after))
        })
    }

    fn remove_liquidity(&self, provider: &Address, shares: Shares) -> Result<Withdrawal> {
        self.state.enter("remove_liquidity", |state| {
            if shares.is_zero() {
                return Err(AmmError::ZeroAmount);
            }
            let available = state.ledger.share_of(provider);
            if shares > available {
                return Err(AmmError::InsufficientShares {
                    requested: shares,
                    available,
                });
            }

            let total = state.ledger.total_shares().get();
            let amount_a = Amount::new(mul_div(
                state.reserves.a().get(),
                shares.get(),
                total,
                Rounding::Down,
            )?);
            let amount_b = Amount::new(mul_div(
                state.reserves.b().get(),
                shares.get(),
                total,
                Rounding::Down,
            )?);
            if amount_a.is_zero() && amount_b.is_zero() {
                return Err(AmmError::InsufficientLiquidity);
            }
            let reserves_after = Reserves::new(
                state
                    .reserves
                    .a()
                    .checked_sub(&amount_a)
                    .ok_or(AmmError::Underflow("reserve_a - withdrawal"))?,
                state
                    .reserves
                    .b()
                    .checked_sub(&amount_b)
                    .ok_or(AmmError::Underflow("reserve_b - withdrawal"))?,
            );
            if reserves_after.is_lopsided() {
                return Err(AmmError::InsufficientLiquidity);
            }

            Settlement::new(self.address)
                .push(self.token_a.as_ref(), *provider, amount_a)
                .push(self.token_b.as_ref(), *provider, amount_b)
                .execute()
                .map_err(|unsettled| self.absorb(state, provider, shares, unsettled))?;

            state.ledger.burn(provider, shares)?;
            state.reserves = reserves_after;
            state.phase = if state.ledger.total_shares().is_zero() {
                PoolPhase::Empty
            } else {
                state.phase.after_activity()
            };

            #[cfg(feature = "tracing")]
            {
                tracing::info!(
                    target: "duet_amm::pool",
                    pool = %self.address,
                    kind = C::KIND,
                    provider = %provider,
                    shares = %shares,
                    amount_a = %amount_a,
                    amount_b = %amount_b,
                    "burn"
                );
                self.emit_sync(&reserves_after);
            }
            Ok(Withdrawal::new(shares, amount_a, amount_b, reserves_after))
        })
    }

    fn share_of(&self, provider: &Address) -> Result<Shares> {
        self.state
            .enter("share_of", |state| Ok(state.ledger.share_of(provider)))
    }

    fn total_shares(&self) -> Result<Shares> {
        self.state
            .enter("total_shares", |state| Ok(state.ledger.total_shares()))
    }

    fn phase(&self) -> Result<PoolPhase> {
        self.state.enter("phase", |state| Ok(state.phase))
    }
}
