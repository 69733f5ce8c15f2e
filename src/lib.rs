//! # Duet AMM
//!
//! Two-asset automated market maker engine: price swaps, mint and burn
//! liquidity shares, and settle every operation atomically against
//! external fungible-token ledgers.
//!
//! This crate provides domain types, core traits, configuration structures,
//! a fixed-point math kernel and feature-gated pool implementations for two
//! AMM families:
//!
//! - **Constant Product** (Uniswap v2 style), `constant-product` feature
//! - **StableSwap** (Curve style), `stable-swap` feature
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `all-pools` | yes | Enables both pool types |
//! | `constant-product` | via `all-pools` | `x · y = k` pools |
//! | `stable-swap` | via `all-pools` | Amplified StableSwap pools |
//! | `tracing` | yes | Structured `swap`/`mint`/`burn`/`sync` events via `tracing` |
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use duet_amm::config::{AmmConfig, ConstantProductConfig};
//! use duet_amm::domain::{Address, Amount, BasisPoints, DepositRequest};
//! use duet_amm::factory::PoolFactory;
//! use duet_amm::token::InMemoryToken;
//! use duet_amm::traits::{FungibleToken, LiquidityPool, SwapPool};
//!
//! // 1. Two token ledgers and a funded account
//! let usdc = Arc::new(InMemoryToken::new("USDC"));
//! let weth = Arc::new(InMemoryToken::new("WETH"));
//! let alice = Address::from_label("alice");
//!
//! // 2. Create a 0.30% constant-product pool through the factory
//! let config = AmmConfig::ConstantProduct(
//!     ConstantProductConfig::new(BasisPoints::new(30)).expect("valid config"),
//! );
//! let mut factory = PoolFactory::new();
//! let pool = factory
//!     .create_pool(usdc.clone(), weth.clone(), &config)
//!     .expect("pool created");
//!
//! // 3. Fund alice and let the pool pull from her
//! for token in [&usdc, &weth] {
//!     token.mint(&alice, Amount::new(10_000_000)).expect("mint");
//!     token.approve(&alice, &pool.address(), Amount::MAX);
//! }
//!
//! // 4. Seed the pool, then sell 10 000 USDC for WETH
//! let deposit = DepositRequest::new(Amount::new(1_000_000), Amount::new(1_000_000));
//! pool.add_liquidity(&alice, &deposit).expect("seeded");
//!
//! let result = pool
//!     .swap(&alice, Amount::new(10_000), &usdc.address(), Amount::new(9_800))
//!     .expect("swap succeeded");
//! assert!(result.amount_out().get() >= 9_800);
//! assert_eq!(result.fee(), Amount::new(30));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  uses AmmConfig + PoolFactory
//! └──────┬───────┘
//!        │ create_pool(a, b, &config) / get_pool(a, b)
//!        ▼
//! ┌──────────────┐
//! │   Factory    │  pair registry, validates config, dispatches to FromConfig
//! └──────┬───────┘
//!        │ Arc<PoolBox> (enum dispatch)
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  Pool<ConstantProduct>, Pool<StableSwap>
//! └──────┬───────┘
//!        │ guard → plan → settle → commit
//!        ▼
//! ┌──────────────┐      ┌────────────────┐
//! │ Ledger, Math │      │ FungibleToken  │  external balances
//! └──────────────┘      └────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FungibleToken`](traits::FungibleToken) |
//! | [`config`] | Declarative pool blueprints: [`AmmConfig`](config::AmmConfig) and per-pool config structs |
//! | [`pools`]  | The generic pool engine, feature-gated curves and [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`PoolFactory`](factory::PoolFactory) for config-driven pool construction and pair lookup |
//! | [`ledger`] | [`LiquidityLedger`](ledger::LiquidityLedger) share accounting |
//! | [`math`]   | `mul_div`, integer square roots and the StableSwap solvers |
//! | [`token`]  | [`InMemoryToken`](token::InMemoryToken) reference ledger |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod token;
pub mod traits;

pub use crate::domain::{Address, Amount, BasisPoints, Reserves, Rounding, Shares, TokenPair};
pub use crate::error::{AmmError, Result};
