//! Strategy registry.
//!
//! Owns the set of strategy adapters a vault may delegate to and dispatches
//! `execute`, `harvest` and `emergency_exit` to them. Proceeds are measured
//! as the change in the vault's own asset balance around each call, so an
//! adapter cannot inflate the vault's books by misreporting.
//!
//! The registry never touches share accounting; the vault reconciles the
//! returned outcomes against its totals.

use odra::prelude::*;
use odra::casper_types::bytesrepr::Bytes;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::errors::VaultError;
use crate::ledger;
use crate::strategy::StrategyAdapterContractRef;
use crate::types::{is_null_address, HarvestReport, StrategyEntry};

/// Result of a harvest dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Observed increase of the vault's asset balance
    pub proceeds: U256,
    /// What the adapter reported
    pub report: HarvestReport,
}

/// Result of an emergency-exit dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Observed increase of the vault's asset balance
    pub recovered: U256,
    /// Principal that was outstanding before the exit
    pub principal: U256,
}

/// Registry of strategy adapters
#[odra::module]
pub struct StrategyRegistry {
    /// Entries keyed by adapter address
    entries: Mapping<Address, StrategyEntry>,
    /// Registration slots in order; removed slots stay as tombstones
    slots: Mapping<u32, Address>,
    /// Current slot of each registered adapter
    slot_of: Mapping<Address, u32>,
    /// Slots ever handed out
    slot_count: Var<u32>,
    /// Registered adapters
    active_count: Var<u32>,
}

#[odra::module]
impl StrategyRegistry {
    /// Registered adapters in registration order
    pub fn strategies(&self) -> Vec<Address> {
        let mut strategies = Vec::new();
        for slot in 0..self.slot_count.get().unwrap_or(0) {
            if let Some(identity) = self.slots.get(&slot) {
                if self.is_active(identity) && self.slot_of.get(&identity) == Some(slot) {
                    strategies.push(identity);
                }
            }
        }
        strategies
    }

    /// Entry for `identity`, if registered
    pub fn strategy(&self, identity: Address) -> Option<StrategyEntry> {
        self.entries.get(&identity).filter(|entry| entry.active)
    }

    pub fn is_active(&self, identity: Address) -> bool {
        self.strategy(identity).is_some()
    }

    pub fn count(&self) -> u32 {
        self.active_count.get().unwrap_or(0)
    }
}

impl StrategyRegistry {
    pub fn add(&mut self, identity: Address, now: u64) -> Result<StrategyEntry, VaultError> {
        if is_null_address(&identity) {
            return Err(VaultError::InvalidParameter);
        }
        if self.is_active(identity) {
            return Err(VaultError::DuplicateStrategy);
        }

        let entry = StrategyEntry {
            identity,
            active: true,
            principal: U256::zero(),
            total_harvested: U256::zero(),
            added_at: now,
        };
        self.entries.set(&identity, entry.clone());

        let slot = self.slot_count.get().unwrap_or(0);
        let next_slot = slot.checked_add(1).ok_or(VaultError::ArithmeticOverflow)?;
        self.slots.set(&slot, identity);
        self.slot_of.set(&identity, slot);
        self.slot_count.set(next_slot);
        self.active_count.set(self.count() + 1);

        Ok(entry)
    }

    /// Drop `identity` and return the principal it still owed the vault.
    ///
    /// Refused while the adapter reports a non-zero balance.
    pub fn remove(&mut self, identity: Address) -> Result<U256, VaultError> {
        let mut entry = self.active_entry(identity)?;

        if !self.adapter_balance(identity)?.is_zero() {
            return Err(VaultError::StrategyNotEmpty);
        }

        let outstanding = entry.principal;
        entry.active = false;
        entry.principal = U256::zero();
        self.entries.set(&identity, entry);

        self.active_count.set(self.count().saturating_sub(1));

        Ok(outstanding)
    }

    /// Transfer `amount` of `asset` to the adapter and have it stake.
    pub fn dispatch_execute(
        &mut self,
        asset: Address,
        identity: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<(), VaultError> {
        let mut entry = self.active_entry(identity)?;

        if !ledger::transfer(&self.env(), asset, identity, amount) {
            return Err(VaultError::TokenTransferFailed);
        }

        let mut adapter = StrategyAdapterContractRef::new(self.env(), identity);
        if !adapter.execute(amount, data) {
            return Err(VaultError::StrategyExecutionFailed);
        }

        entry.principal = entry
            .principal
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.entries.set(&identity, entry);
        Ok(())
    }

    /// Ask the adapter for rewards. Adapter failures come back in the report.
    pub fn dispatch_harvest(
        &mut self,
        asset: Address,
        identity: Address,
        data: Bytes,
    ) -> Result<HarvestOutcome, VaultError> {
        let mut entry = self.active_entry(identity)?;
        let vault = self.env().self_address();

        let before = ledger::balance_of(&self.env(), asset, vault);
        let mut adapter = StrategyAdapterContractRef::new(self.env(), identity);
        let report = adapter.harvest(data);
        let after = ledger::balance_of(&self.env(), asset, vault);

        let proceeds = after.saturating_sub(before);
        entry.total_harvested = entry
            .total_harvested
            .checked_add(proceeds)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.entries.set(&identity, entry);

        Ok(HarvestOutcome { proceeds, report })
    }

    /// Force the adapter to unwind. It must end with a zero balance.
    pub fn dispatch_emergency_exit(
        &mut self,
        asset: Address,
        identity: Address,
        data: Bytes,
    ) -> Result<ExitOutcome, VaultError> {
        let mut entry = self.active_entry(identity)?;
        let vault = self.env().self_address();

        let before = ledger::balance_of(&self.env(), asset, vault);
        let mut adapter = StrategyAdapterContractRef::new(self.env(), identity);
        adapter.emergency_exit(data);
        let after = ledger::balance_of(&self.env(), asset, vault);

        if !adapter.balance().is_zero() {
            return Err(VaultError::UnstakingFailed);
        }

        let outcome = ExitOutcome {
            recovered: after.saturating_sub(before),
            principal: entry.principal,
        };
        entry.principal = U256::zero();
        self.entries.set(&identity, entry);

        Ok(outcome)
    }

    /// Poll the adapter's `balance()`.
    pub fn adapter_balance(&self, identity: Address) -> Result<U256, VaultError> {
        self.active_entry(identity)?;
        Ok(StrategyAdapterContractRef::new(self.env(), identity).balance())
    }

    fn active_entry(&self, identity: Address) -> Result<StrategyEntry, VaultError> {
        self.strategy(identity).ok_or(VaultError::UnknownStrategy)
    }
}
