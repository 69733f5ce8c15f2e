//! Token ledger implementations.
//!
//! The engine consumes tokens through
//! [`FungibleToken`](crate::traits::FungibleToken); this module provides an
//! in-memory ledger for tests, simulations and examples.

mod in_memory;

pub use in_memory::{InMemoryToken, TransferEvent, TransferHook};
