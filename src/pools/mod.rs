//! Feature-gated pool implementations and the [`PoolBox`] dispatch enum.
//!
//! Every pool is a [`Pool`] parameterized by a
//! [`PricingCurve`](crate::traits::PricingCurve).  The engine handles
//! re-entrancy, settlement and share accounting; each curve module adds
//! only its pricing.  The [`PoolBox`] enum provides static dispatch
//! across all enabled pool types, allowing heterogeneous collections
//! without `dyn` trait objects.
//!
//! # Pool Types
//!
//! | Feature | Pool | Style |
//! |---------|------|-------|
//! | `constant-product` | [`ConstantProductPool`] | Uniswap V2 |
//! | `stable-swap` | [`StableSwapPool`] | Curve StableSwap |

#[cfg(feature = "constant-product")]
pub mod constant_product;
mod engine;
mod guard;
mod pool_box;
mod settlement;
#[cfg(feature = "stable-swap")]
pub mod stable_swap;

#[cfg(test)]
mod fixtures;
#[cfg(all(test, feature = "constant-product", feature = "stable-swap"))]
#[allow(clippy::panic)]
mod proptest_properties;

#[cfg(feature = "constant-product")]
pub use constant_product::{ConstantProduct, ConstantProductPool};
pub use engine::Pool;
pub use pool_box::PoolBox;
#[cfg(feature = "stable-swap")]
pub use stable_swap::{StableSwap, StableSwapPool};
