//! Ordered token transfers with compensation on failure.
//!
//! A pool operation first computes its complete outcome, then settles it
//! as a list of legs: pulls from the caller (the pool spending its
//! allowance) followed by pushes to the caller.  If any leg fails, every
//! leg that already ran is reversed, newest first, and the original error
//! is returned.  The pool commits its own state only after
//! [`Settlement::execute`] succeeds.
//!
//! Reversing a pull is a plain transfer back from the pool.  Reversing a
//! push reclaims the funds with `transfer_from`, which needs the recipient
//! to have approved the pool; operations therefore order their pushes last
//! so a failing pull never requires one.
//!
//! A reversal can itself fail.  Such legs are reported in [`Unsettled`]
//! so the pool can bring its reserves back in line with what it actually
//! holds.

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::traits::FungibleToken;

#[derive(Debug, Clone, Copy)]
enum Direction {
    /// Caller to pool.
    Pull,
    /// Pool to caller.
    Push,
}

#[derive(Debug, Clone, Copy)]
struct Leg<'a> {
    direction: Direction,
    token: &'a dyn FungibleToken,
    counterparty: Address,
    amount: Amount,
}

/// A settlement that stopped on an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Unsettled {
    /// The error that stopped the settlement.
    pub(crate) error: AmmError,
    /// Pulled funds the pool could not return, by token.
    pub(crate) retained: Vec<(Address, Amount)>,
    /// Pushed funds the pool could not reclaim, by token.
    pub(crate) released: Vec<(Address, Amount)>,
}

impl Unsettled {
    /// `true` if every completed leg was reversed.
    pub(crate) fn is_clean(&self) -> bool {
        self.retained.is_empty() && self.released.is_empty()
    }
}

/// A pending set of transfers between one pool and its counterparties.
#[derive(Debug)]
pub(crate) struct Settlement<'a> {
    pool: Address,
    legs: Vec<Leg<'a>>,
}

impl<'a> Settlement<'a> {
    pub(crate) fn new(pool: Address) -> Self {
        Self {
            pool,
            legs: Vec::with_capacity(2),
        }
    }

    /// Adds a transfer of `amount` from `from` into the pool.
    pub(crate) fn pull(mut self, token: &'a dyn FungibleToken, from: Address, amount: Amount) -> Self {
        self.legs.push(Leg {
            direction: Direction::Pull,
            token,
            counterparty: from,
            amount,
        });
        self
    }

    /// Adds a transfer of `amount` from the pool to `to`.
    pub(crate) fn push(mut self, token: &'a dyn FungibleToken, to: Address, amount: Amount) -> Self {
        self.legs.push(Leg {
            direction: Direction::Push,
            token,
            counterparty: to,
            amount,
        });
        self
    }

    /// Runs every leg in order.  Zero-amount legs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`Unsettled`] carrying the first leg's error, or
    /// [`AmmError::TransferFailed`] if a token reported `false`, together
    /// with any completed legs whose reversal failed.
    pub(crate) fn execute(self) -> core::result::Result<(), Unsettled> {
        let mut completed: Vec<&Leg<'a>> = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            if leg.amount.is_zero() {
                continue;
            }
            if let Err(error) = self.run(leg) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    pool = %self.pool,
                    token = %leg.token.address(),
                    counterparty = %leg.counterparty,
                    amount = %leg.amount,
                    error = %error,
                    "settlement leg failed, unwinding"
                );
                return Err(self.unwind(error, &completed));
            }
            completed.push(leg);
        }
        Ok(())
    }

    fn run(&self, leg: &Leg<'_>) -> Result<()> {
        let (ok, context) = match leg.direction {
            Direction::Pull => (
                leg.token
                    .transfer_from(&self.pool, &leg.counterparty, &self.pool, leg.amount)?,
                "token rejected transfer into pool",
            ),
            Direction::Push => (
                leg.token.transfer(&self.pool, &leg.counterparty, leg.amount)?,
                "token rejected transfer out of pool",
            ),
        };
        if !ok {
            return Err(AmmError::TransferFailed(context));
        }
        Ok(())
    }

    fn unwind(&self, error: AmmError, completed: &[&Leg<'_>]) -> Unsettled {
        let mut unsettled = Unsettled {
            error,
            retained: Vec::new(),
            released: Vec::new(),
        };
        for leg in completed.iter().rev() {
            let reversed = match leg.direction {
                Direction::Pull => leg.token.transfer(&self.pool, &leg.counterparty, leg.amount),
                Direction::Push => {
                    leg.token
                        .transfer_from(&self.pool, &leg.counterparty, &self.pool, leg.amount)
                }
            };
            if matches!(reversed, Ok(true)) {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::error!(
                pool = %self.pool,
                token = %leg.token.address(),
                counterparty = %leg.counterparty,
                amount = %leg.amount,
                result = ?reversed,
                "failed to reverse settlement leg"
            );
            let stranded = (leg.token.address(), leg.amount);
            match leg.direction {
                Direction::Pull => unsettled.retained.push(stranded),
                Direction::Push => unsettled.released.push(stranded),
            }
        }
        unsettled
    }
}
