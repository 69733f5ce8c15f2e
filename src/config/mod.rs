//! Pool configuration.
//!
//! [`AmmConfig`] is the top-level declarative blueprint for creating a
//! pool; each variant wraps a validated per-family config struct.

mod amm_config;
mod constant_product;
mod stable_swap;

pub use amm_config::AmmConfig;
pub use constant_product::ConstantProductConfig;
pub use stable_swap::StableSwapConfig;
