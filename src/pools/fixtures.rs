//! Shared pool fixtures for unit and property tests.

#![allow(clippy::panic)]

use std::sync::Arc;

use super::Pool;
use crate::domain::{Address, Amount, DepositReceipt, DepositRequest, SwapResult};
use crate::error::Result;
use crate::token::InMemoryToken;
use crate::traits::{FromConfig, FungibleToken, LiquidityPool, PricingCurve, SwapPool};

/// Starting balance of every fixture account, per token.
pub(crate) const FUNDING: u128 = 1_000_000_000_000_000_000_000_000;

/// A fresh pool with two funded accounts that have approved it.
pub(crate) struct Fixture<C: PricingCurve> {
    pub pool: Pool<C>,
    pub token_a: Arc<InMemoryToken>,
    pub token_b: Arc<InMemoryToken>,
    pub lp: Address,
    pub trader: Address,
}

pub(crate) fn fixture<C, Cfg>(config: &Cfg) -> Fixture<C>
where
    C: PricingCurve,
    Pool<C>: FromConfig<Cfg>,
{
    let usd = Arc::new(InMemoryToken::new("USD"));
    let eur = Arc::new(InMemoryToken::new("EUR"));
    let Ok(pool) = Pool::<C>::from_config(config, usd.clone(), eur.clone())
    else {
        panic!("pool from valid config");
    };
    let (token_a, token_b) = if usd.address() == pool.token_pair().token_a() {
        (usd, eur)
    } else {
        (eur, usd)
    };

    let lp = Address::from_label("lp");
    let trader = Address::from_label("trader");
    for account in [lp, trader] {
        for token in [&token_a, &token_b] {
            let Ok(()) = token.mint(&account, Amount::new(FUNDING)) else {
                panic!("fund {account}");
            };
            token.approve(&account, &pool.address(), Amount::MAX);
        }
    }
    Fixture {
        pool,
        token_a,
        token_b,
        lp,
        trader,
    }
}

impl<C: PricingCurve> Fixture<C> {
    /// Deposits `(a, b)` from the liquidity provider.
    pub(crate) fn deposit(&self, a: u128, b: u128) -> Result<DepositReceipt> {
        self.pool.add_liquidity(
            &self.lp,
            &DepositRequest::new(Amount::new(a), Amount::new(b)),
        )
    }

    /// Deposits `(a, b)` and panics on failure.
    pub(crate) fn seed(&self, a: u128, b: u128) -> DepositReceipt {
        let Ok(receipt) = self.deposit(a, b) else {
            panic!("seed ({a}, {b})");
        };
        receipt
    }

    /// Sells `amount` of token A from the trader.
    pub(crate) fn sell_a(&self, amount: u128) -> Result<SwapResult> {
        self.pool.swap(
            &self.trader,
            Amount::new(amount),
            &self.token_a.address(),
            Amount::ZERO,
        )
    }

    /// Sells `amount` of token B from the trader.
    pub(crate) fn sell_b(&self, amount: u128) -> Result<SwapResult> {
        self.pool.swap(
            &self.trader,
            Amount::new(amount),
            &self.token_b.address(),
            Amount::ZERO,
        )
    }

    /// Token balances held by `account` as `(a, b)`.
    pub(crate) fn balances(&self, account: &Address) -> (u128, u128) {
        let (Ok(a), Ok(b)) = (
            self.token_a.balance_of(account),
            self.token_b.balance_of(account),
        ) else {
            panic!("balance lookup");
        };
        (a.get(), b.get())
    }
}
