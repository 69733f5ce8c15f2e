//! Fixed-point arithmetic kernel.
//!
//! Every operation is integer-only and checked: overflow, underflow and
//! division by zero surface as [`AmmError`](crate::error::AmmError) values,
//! never as wrapped results or panics.  Products of two `u128`s are formed
//! in 256 bits (`bnum`), and the StableSwap solvers run in 512 bits.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`mul_div`] | `a·b/d` with explicit rounding |
//! | [`sqrt_floor`], [`sqrt_of_product`] | initial constant-product shares |
//! | [`stable_swap`] | Newton solvers for the StableSwap invariant |
//! | [`CheckedArithmetic`] | `Result`-returning add/sub on quantities |

mod checked;
mod mul_div;
mod sqrt;
pub mod stable_swap;

pub use checked::CheckedArithmetic;
pub use mul_div::mul_div;
pub use sqrt::{sqrt_floor, sqrt_of_product};
