//! Consumed interface to an external fungible-token ledger.
//!
//! Pools never store token balances themselves; they move funds by calling
//! into a [`FungibleToken`] implementation injected at construction.  The
//! crate ships [`InMemoryToken`](crate::token::InMemoryToken) as a
//! reference ledger for tests and simulations.
//!
//! # Caller identity
//!
//! Ledgers that derive the caller from their execution context (a
//! contract's message sender, for example) receive it here as an explicit
//! argument: `caller` for [`transfer`](FungibleToken::transfer) and
//! `spender` for [`transfer_from`](FungibleToken::transfer_from).
//!
//! # Failure propagation
//!
//! A transfer either returns `Ok(true)` or fails the whole pool operation:
//! `Ok(false)` becomes [`AmmError::TransferFailed`](crate::error::AmmError),
//! and an `Err` is propagated unchanged.

use core::fmt::Debug;

use crate::domain::{Address, Amount};
use crate::error::Result;

/// A fungible-token ledger the engine can query and move funds through.
pub trait FungibleToken: Send + Sync + Debug {
    /// Address identifying this token.
    fn address(&self) -> Address;

    /// Balance held by `owner`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn balance_of(&self, owner: &Address) -> Result<Amount>;

    /// Moves `amount` from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance)
    /// if `caller` holds less than `amount`, or any implementation-defined
    /// failure.
    fn transfer(&self, caller: &Address, to: &Address, amount: Amount) -> Result<bool>;

    /// Moves `amount` from `owner` to `to` using `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientAllowance`](crate::error::AmmError::InsufficientAllowance)
    /// or [`AmmError::InsufficientBalance`](crate::error::AmmError::InsufficientBalance),
    /// or any implementation-defined failure.
    fn transfer_from(
        &self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<bool>;
}
