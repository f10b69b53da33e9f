//! Base-asset ledger calls.
//!
//! Thin wrappers over the CEP-18 entry points of the vault's base asset.
//! Every mutating call returns the ledger's explicit success flag; callers
//! decide which [`crate::errors::VaultError`] a `false` maps to.

use odra::prelude::*;
use odra::casper_types::{U256, RuntimeArgs, runtime_args};
use odra::{CallDef, ContractEnv};

/// Move `amount` from the calling contract to `recipient`.
pub fn transfer(env: &ContractEnv, asset: Address, recipient: Address, amount: U256) -> bool {
    let args = runtime_args! {
        "recipient" => recipient,
        "amount" => amount
    };
    let call_def = CallDef::new("transfer", true, args);
    env.call_contract(asset, call_def)
}

/// Pull `amount` from `owner` to `recipient` using the caller's allowance.
pub fn transfer_from(
    env: &ContractEnv,
    asset: Address,
    owner: Address,
    recipient: Address,
    amount: U256,
) -> bool {
    let args = runtime_args! {
        "owner" => owner,
        "recipient" => recipient,
        "amount" => amount
    };
    let call_def = CallDef::new("transfer_from", true, args);
    env.call_contract(asset, call_def)
}

pub fn balance_of(env: &ContractEnv, asset: Address, account: Address) -> U256 {
    let args = runtime_args! {
        "account" => account
    };
    let call_def = CallDef::new("balance_of", false, args);
    env.call_contract(asset, call_def)
}

pub fn decimals(env: &ContractEnv, asset: Address) -> u8 {
    let call_def = CallDef::new("decimals", false, RuntimeArgs::new());
    env.call_contract(asset, call_def)
}
