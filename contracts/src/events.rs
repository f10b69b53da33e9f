//! Vault events.
//!
//! Every state change emits exactly one event; together they form the
//! vault's audit log.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::types::Role;

/// Assets deposited and shares minted (deposit and mint)
#[odra::event]
pub struct Deposited {
    pub caller: Address,
    pub receiver: Address,
    pub assets: U256,
    pub shares: U256,
    //--- share price inputs after the operation
    pub total_assets: U256,
    pub total_shares: U256,
}

/// Shares burned and assets paid out (withdraw and redeem)
#[odra::event]
pub struct Withdrawn {
    pub caller: Address,
    pub receiver: Address,
    pub owner: Address,
    pub assets: U256,
    pub net_assets: U256,
    pub fee_assets: U256,
    pub shares: U256,
    //--- share price inputs after the operation
    pub total_assets: U256,
    pub total_shares: U256,
}

/// Time-based yield folded into total assets
#[odra::event]
pub struct YieldAccrued {
    pub amount: U256,
    pub elapsed_seconds: u64,
    pub yield_rate_bps: u32,
    pub total_assets: U256,
}

/// Withdrawal fee swept to the treasury
#[odra::event]
pub struct FeeCollected {
    pub treasury: Address,
    pub amount: U256,
}

#[odra::event]
pub struct StrategyAdded {
    pub strategy: Address,
}

#[odra::event]
pub struct StrategyRemoved {
    pub strategy: Address,
    /// Principal written off because the adapter held nothing
    pub written_off: U256,
}

#[odra::event]
pub struct StrategyExecuted {
    pub strategy: Address,
    pub amount: U256,
}

#[odra::event]
pub struct StrategyHarvested {
    pub strategy: Address,
    pub proceeds: U256,
    pub total_assets: U256,
}

/// Best-effort harvest that the adapter reported as failed
#[odra::event]
pub struct HarvestFailed {
    pub strategy: Address,
    pub reason: String,
}

#[odra::event]
pub struct EmergencyExited {
    pub strategy: Address,
    pub recovered: U256,
    pub principal: U256,
    pub total_assets: U256,
}

#[odra::event]
pub struct YieldRateUpdated {
    pub old_rate_bps: u32,
    pub new_rate_bps: u32,
}

#[odra::event]
pub struct WithdrawalFeeUpdated {
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
}

#[odra::event]
pub struct TreasuryUpdated {
    pub old_treasury: Address,
    pub new_treasury: Address,
}

#[odra::event]
pub struct VaultPaused {
    pub by: Address,
}

#[odra::event]
pub struct VaultUnpaused {
    pub by: Address,
}

/// Share ledger transfer
#[odra::event]
pub struct SharesTransferred {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

#[odra::event]
pub struct RoleGranted {
    pub role: Role,
    pub account: Address,
    pub by: Address,
}

#[odra::event]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Address,
    pub by: Address,
}
