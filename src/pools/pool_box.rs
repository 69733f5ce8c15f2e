//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool implementation behind a single
//! enum, enabling heterogeneous collections and static dispatch.  Each
//! variant is feature-gated to match its pool type.

#[cfg(feature = "constant-product")]
use super::constant_product::ConstantProductPool;
#[cfg(feature = "stable-swap")]
use super::stable_swap::StableSwapPool;

use crate::domain::{
    Address, Amount, BasisPoints, DepositReceipt, DepositRequest, PoolPhase, Reserves, Shares,
    SwapResult, TokenPair, Withdrawal,
};
use crate::error::Result;
use crate::traits::{LiquidityPool, SwapPool};

/// Dispatch enum wrapping all concrete pool implementations.
///
/// Each variant is feature-gated behind its respective Cargo feature
/// flag.  The enum implements [`SwapPool`] and [`LiquidityPool`] by
/// delegating every method call to the inner pool via `match`.
///
/// The [`PoolFactory`](crate::factory::PoolFactory) hands these out behind
/// an `Arc`, so a registered pool can be shared across threads.
///
/// # Example
///
/// ```text
/// let pool = factory.get_pool(&usd, &eur)?;
/// let reserves = pool.reserves()?;
/// if let PoolBox::StableSwap(inner) = pool.as_ref() {
///     println!("A = {}", inner.curve().amplification());
/// }
/// ```
#[derive(Debug)]
pub enum PoolBox {
    /// Constant Product AMM (Uniswap V2 style).
    #[cfg(feature = "constant-product")]
    ConstantProduct(Box<ConstantProductPool>),

    /// StableSwap (Curve style).
    #[cfg(feature = "stable-swap")]
    StableSwap(Box<StableSwapPool>),
}

impl PoolBox {
    /// Short name of the wrapped pool kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => "ConstantProduct",
            #[cfg(feature = "stable-swap")]
            Self::StableSwap(_) => "StableSwap",
        }
    }
}

/// Delegates a method call to every PoolBox variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "constant-product")]
            PoolBox::ConstantProduct(p) => p.$method($($arg),*),
            #[cfg(feature = "stable-swap")]
            PoolBox::StableSwap(p) => p.$method($($arg),*),
        }
    };
}

impl SwapPool for PoolBox {
    fn address(&self) -> Address {
        delegate!(self, address())
    }

    fn token_pair(&self) -> &TokenPair {
        delegate!(self, token_pair())
    }

    fn fee_rate(&self) -> BasisPoints {
        delegate!(self, fee_rate())
    }

    fn reserves(&self) -> Result<Reserves> {
        delegate!(self, reserves())
    }

    fn invariant(&self) -> Result<u128> {
        delegate!(self, invariant())
    }

    fn quote(&self, amount_in: Amount, token_in: &Address) -> Result<SwapResult> {
        delegate!(self, quote(amount_in, token_in))
    }

    fn swap(
        &self,
        caller: &Address,
        amount_in: Amount,
        token_in: &Address,
        min_amount_out: Amount,
    ) -> Result<SwapResult> {
        delegate!(self, swap(caller, amount_in, token_in, min_amount_out))
    }
}

impl LiquidityPool for PoolBox {
    fn add_liquidity(
        &self,
        provider: &Address,
        request: &DepositRequest,
    ) -> Result<DepositReceipt> {
        delegate!(self, add_liquidity(provider, request))
    }

    fn remove_liquidity(&self, provider: &Address, shares: Shares) -> Result<Withdrawal> {
        delegate!(self, remove_liquidity(provider, shares))
    }

    fn share_of(&self, provider: &Address) -> Result<Shares> {
        delegate!(self, share_of(provider))
    }

    fn total_shares(&self) -> Result<Shares> {
        delegate!(self, total_shares())
    }

    fn phase(&self) -> Result<PoolPhase> {
        delegate!(self, phase())
    }
}
