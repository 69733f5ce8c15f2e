//! Fundamental domain value types used throughout the engine.
//!
//! Addresses, token amounts, liquidity shares, fee rates, reserve
//! snapshots, and the records returned by swaps and liquidity operations.
//! All quantities are newtypes over `u128` so a share count can never be
//! mixed up with a token amount.

mod address;
mod amount;
mod basis_points;
mod deposit;
mod pool_phase;
mod reserves;
mod rounding;
mod shares;
mod swap_result;
mod token_pair;

pub use address::{Address, ADDRESS_LEN};
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use deposit::{DepositPlan, DepositReceipt, DepositRequest, Withdrawal};
pub use pool_phase::PoolPhase;
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use token_pair::{Side, TokenPair};
