//! Reference fungible-token ledger held in memory.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::FungibleToken;

/// A transfer about to be applied, as seen by a [`TransferHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEvent {
    /// Account debited.
    pub from: Address,
    /// Account credited.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
}

/// Callback run before every transfer, outside the ledger lock.
///
/// Returning an error aborts the transfer.  Hooks may call back into
/// anything, including the pool that initiated the transfer.
pub type TransferHook = Arc<dyn Fn(&TransferEvent) -> Result<()> + Send + Sync>;

#[derive(Debug, Default)]
struct LedgerState {
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl LedgerState {
    fn balance(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn move_funds(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        let available = self.balance(from);
        if available < amount {
            return Err(AmmError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let debited = available.safe_sub(&amount)?;
        self.balances.insert(*from, debited);
        let credited = self.balance(to).safe_add(&amount)?;
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// An in-memory token ledger with ERC-20 style balances and allowances.
///
/// Besides the [`FungibleToken`] operations it offers fixture helpers:
/// [`mint`](Self::mint), [`approve`](Self::approve), a failure switch that
/// makes every transfer report `false`, and a [`TransferHook`] for
/// simulating tokens that call back into their caller.
///
/// An allowance of [`Amount::MAX`] is treated as unlimited and never
/// decremented.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Address, Amount};
/// use duet_amm::token::InMemoryToken;
/// use duet_amm::traits::FungibleToken;
///
/// let usd = InMemoryToken::new("USD");
/// let alice = Address::from_label("alice");
/// let bob = Address::from_label("bob");
///
/// usd.mint(&alice, Amount::new(100)).expect("mint");
/// assert_eq!(usd.transfer(&alice, &bob, Amount::new(40)), Ok(true));
/// assert_eq!(usd.balance_of(&bob), Ok(Amount::new(40)));
/// ```
pub struct InMemoryToken {
    address: Address,
    symbol: String,
    state: Mutex<LedgerState>,
    failing: AtomicBool,
    hook: Mutex<Option<TransferHook>>,
}

impl InMemoryToken {
    /// Creates a token whose address is derived from `symbol`.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self::with_address(
            Address::derive("duet-amm/token", &[symbol.as_bytes()]),
            symbol,
        )
    }

    /// Creates a token at an explicit address.
    #[must_use]
    pub fn with_address(address: Address, symbol: &str) -> Self {
        Self {
            address,
            symbol: symbol.to_owned(),
            state: Mutex::new(LedgerState::default()),
            failing: AtomicBool::new(false),
            hook: Mutex::new(None),
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Creates `amount` new tokens in `to`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would exceed `u128::MAX`.
    pub fn mint(&self, to: &Address, amount: Amount) -> Result<()> {
        let mut state = self.lock_state();
        let supply = state.total_supply.safe_add(&amount)?;
        let balance = state.balance(to).safe_add(&amount)?;
        state.total_supply = supply;
        state.balances.insert(*to, balance);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    pub fn approve(&self, owner: &Address, spender: &Address, amount: Amount) {
        self.lock_state()
            .allowances
            .insert((*owner, *spender), amount);
    }

    /// Current allowance of `spender` over `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.lock_state().allowance(owner, spender)
    }

    /// Total minted supply.
    pub fn total_supply(&self) -> Amount {
        self.lock_state().total_supply
    }

    /// When `true`, every transfer returns `Ok(false)` without moving funds.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Installs or clears the pre-transfer hook.
    pub fn set_hook(&self, hook: Option<TransferHook>) {
        *self.hook.lock().unwrap_or_else(PoisonError::into_inner) = hook;
    }

    fn lock_state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the hook, if any, without holding either lock.
    fn run_hook(&self, event: &TransferEvent) -> Result<()> {
        let hook = self
            .hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match hook {
            Some(hook) => hook(event),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for InMemoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryToken")
            .field("address", &self.address)
            .field("symbol", &self.symbol)
            .field("failing", &self.failing.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl FungibleToken for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, owner: &Address) -> Result<Amount> {
        Ok(self.lock_state().balance(owner))
    }

    fn transfer(&self, caller: &Address, to: &Address, amount: Amount) -> Result<bool> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.run_hook(&TransferEvent {
            from: *caller,
            to: *to,
            amount,
        })?;
        self.lock_state().move_funds(caller, to, amount)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(token = %self.symbol, from = %caller, to = %to, %amount, "transfer");

        Ok(true)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<bool> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.run_hook(&TransferEvent {
            from: *owner,
            to: *to,
            amount,
        })?;

        let mut state = self.lock_state();
        let allowance = state.allowance(owner, spender);
        if allowance < amount {
            return Err(AmmError::InsufficientAllowance {
                required: amount,
                available: allowance,
            });
        }
        state.move_funds(owner, to, amount)?;
        if allowance != Amount::MAX {
            let remaining = allowance.safe_sub(&amount)?;
            state.allowances.insert((*owner, *spender), remaining);
        }
        drop(state);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            token = %self.symbol,
            spender = %spender,
            from = %owner,
            to = %to,
            %amount,
            "transfer_from"
        );

        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_label("alice")
    }

    fn bob() -> Address {
        Address::from_label("bob")
    }

    fn funded() -> InMemoryToken {
        let token = InMemoryToken::new("TKN");
        let Ok(()) = token.mint(&alice(), Amount::new(1_000)) else {
            panic!("mint");
        };
        token
    }

    #[test]
    fn address_derived_from_symbol() {
        assert_eq!(InMemoryToken::new("A").address(), InMemoryToken::new("A").address());
        assert_ne!(InMemoryToken::new("A").address(), InMemoryToken::new("B").address());
    }

    #[test]
    fn mint_tracks_supply() {
        let token = funded();
        assert_eq!(token.total_supply(), Amount::new(1_000));
        assert_eq!(token.balance_of(&alice()), Ok(Amount::new(1_000)));
    }

    #[test]
    fn transfer_moves_funds() {
        let token = funded();
        assert_eq!(token.transfer(&alice(), &bob(), Amount::new(300)), Ok(true));
        assert_eq!(token.balance_of(&alice()), Ok(Amount::new(700)));
        assert_eq!(token.balance_of(&bob()), Ok(Amount::new(300)));
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let token = funded();
        assert_eq!(
            token.transfer(&alice(), &bob(), Amount::new(1_001)),
            Err(AmmError::InsufficientBalance {
                required: Amount::new(1_001),
                available: Amount::new(1_000),
            })
        );
        assert_eq!(token.balance_of(&alice()), Ok(Amount::new(1_000)));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let token = funded();
        token.approve(&alice(), &bob(), Amount::new(500));
        assert_eq!(
            token.transfer_from(&bob(), &alice(), &bob(), Amount::new(200)),
            Ok(true)
        );
        assert_eq!(token.allowance(&alice(), &bob()), Amount::new(300));
        assert_eq!(token.balance_of(&bob()), Ok(Amount::new(200)));
    }

    #[test]
    fn transfer_from_without_allowance() {
        let token = funded();
        assert_eq!(
            token.transfer_from(&bob(), &alice(), &bob(), Amount::new(1)),
            Err(AmmError::InsufficientAllowance {
                required: Amount::new(1),
                available: Amount::ZERO,
            })
        );
    }

    #[test]
    fn unlimited_allowance_is_not_decremented() {
        let token = funded();
        token.approve(&alice(), &bob(), Amount::MAX);
        assert_eq!(
            token.transfer_from(&bob(), &alice(), &bob(), Amount::new(10)),
            Ok(true)
        );
        assert_eq!(token.allowance(&alice(), &bob()), Amount::MAX);
    }

    #[test]
    fn failing_switch_reports_false() {
        let token = funded();
        token.set_failing(true);
        assert_eq!(token.transfer(&alice(), &bob(), Amount::new(1)), Ok(false));
        assert_eq!(token.balance_of(&alice()), Ok(Amount::new(1_000)));
        token.set_failing(false);
        assert_eq!(token.transfer(&alice(), &bob(), Amount::new(1)), Ok(true));
    }

    #[test]
    fn hook_error_aborts_transfer() {
        let token = funded();
        token.set_hook(Some(Arc::new(|_: &TransferEvent| {
            Err(AmmError::TransferFailed("hook refused"))
        })));
        assert_eq!(
            token.transfer(&alice(), &bob(), Amount::new(1)),
            Err(AmmError::TransferFailed("hook refused"))
        );
        assert_eq!(token.balance_of(&bob()), Ok(Amount::ZERO));
    }

    #[test]
    fn hook_sees_transfer_details() {
        let token = Arc::new(funded());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        token.set_hook(Some(Arc::new(move |event: &TransferEvent| {
            sink.lock().unwrap_or_else(PoisonError::into_inner).push(*event);
            Ok(())
        })));
        assert_eq!(token.transfer(&alice(), &bob(), Amount::new(5)), Ok(true));
        let events = seen.lock().unwrap_or_else(PoisonError::into_inner).clone();
        assert_eq!(
            events,
            vec![TransferEvent {
                from: alice(),
                to: bob(),
                amount: Amount::new(5),
            }]
        );
    }
}
