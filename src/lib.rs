//! Yield Vault
//!
//! Workspace root; the contracts live in `yield-vault-contracts`.

pub use yield_vault_contracts::*;
