//! Common types used across the vault contracts.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::U256;

/// Capabilities consulted by the vault before each mutating operation.
#[odra::odra_type]
#[derive(Copy, PartialOrd, Ord)]
pub enum Role {
    /// Administers roles and the treasury
    Owner,
    /// Manages strategies, yield rate and withdrawal fee
    Manager,
    /// Moves capital into and out of strategies
    Agent,
    /// Pauses and unpauses the vault
    Pauser,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Manager, Role::Agent, Role::Pauser];
}

/// Registry entry for one strategy adapter.
#[odra::odra_type]
pub struct StrategyEntry {
    /// Adapter contract address
    pub identity: Address,
    /// Whether the strategy is registered
    pub active: bool,
    /// Principal dispatched through `execute` and not yet recovered
    pub principal: U256,
    /// Cumulative harvest proceeds credited to the vault
    pub total_harvested: U256,
    /// Timestamp (seconds) at which the strategy was added
    pub added_at: u64,
}

/// Outcome of an adapter `harvest` call.
///
/// Harvesting is best-effort, so adapters report failure in-band instead
/// of reverting the caller's transaction.
#[odra::odra_type]
pub struct HarvestReport {
    /// Amount the adapter forwarded back to the vault
    pub proceeds: U256,
    /// Adapter-supplied reason when the harvest did not happen
    pub failure: Option<String>,
}

impl HarvestReport {
    pub fn harvested(proceeds: U256) -> Self {
        Self {
            proceeds,
            failure: None,
        }
    }

    pub fn failed(reason: &str) -> Self {
        Self {
            proceeds: U256::zero(),
            failure: Some(String::from(reason)),
        }
    }
}

/// Payload decoded by [`crate::delegation_strategy::DelegationStrategy`].
///
/// Encoded with Casper `bytesrepr`. An empty payload selects the default
/// validator.
#[odra::odra_type]
pub struct DelegationPayload {
    /// Hex-encoded validator public key
    pub validator: String,
}

/// Snapshot of the vault's state for status queries.
#[odra::odra_type]
pub struct VaultStatus {
    /// Notional assets backing all shares
    pub total_assets: U256,
    /// Outstanding shares
    pub total_shares: U256,
    /// Last accrual watermark (seconds)
    pub last_accrual_timestamp: u64,
    /// Annualized yield rate in bps
    pub yield_rate_bps: u32,
    /// Withdrawal fee in bps
    pub withdrawal_fee_bps: u32,
    /// Fee recipient
    pub treasury: Address,
    /// Whether deposits and strategy execution are blocked
    pub paused: bool,
    /// Number of registered strategies
    pub strategy_count: u32,
    /// All-time fees swept to the treasury
    pub total_fees_collected: U256,
}

/// The zero account hash, treated as the null identity.
pub fn null_address() -> Address {
    Address::Account(AccountHash::default())
}

/// Whether `address` is the null identity.
pub fn is_null_address(address: &Address) -> bool {
    *address == null_address()
}
