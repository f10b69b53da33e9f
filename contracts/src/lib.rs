//! Yield Vault Contracts
//!
//! Casper-native yield-bearing vault implementation.
//!
//! ## Architecture
//!
//! - **YieldVault**: Share ledger, deposits/withdrawals, accrual, strategy dispatch
//! - **StrategyRegistry**: Registered strategy adapters (vault sub-module)
//! - **AccessControl**: Owner / Manager / Agent / Pauser role store
//! - **AssetToken**: CEP-18 base asset with minter list
//! - **DelegationStrategy**: Validator delegation adapter
//!
//! ## Pause (Circuit Breaker)
//!
//! When paused, the vault only lets capital leave:
//! - Allowed: withdraw, redeem, harvest, emergency exit, share transfers
//! - Blocked: deposit, mint, deposit to strategy

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod events;
pub mod yield_math;
pub mod fee_policy;
pub mod accounting;
pub mod ledger;
pub mod strategy;

// Contract modules
pub mod strategy_registry;
pub mod vault;
pub mod access_control;
pub mod asset_token;
pub mod delegation_strategy;
