//! Validator Delegation Strategy
//!
//! Strategy adapter that books vault capital against Casper validators.
//!
//! ## Payload
//!
//! `execute` decodes its `data` as a `bytesrepr`-encoded
//! [`DelegationPayload`]; an empty payload delegates to the default
//! validator. `harvest` and `emergency_exit` ignore their payload.
//!
//! ## Balances
//!
//! Principal is tracked per validator. Any token balance above the total
//! principal is treated as rewards: `harvest` forwards it to the vault,
//! `emergency_exit` returns principal and rewards together and clears every
//! validator, however many there are.

use odra::prelude::*;
use odra::casper_types::bytesrepr::{Bytes, FromBytes, ToBytes};
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::ledger;
use crate::types::{DelegationPayload, HarvestReport};

/// Default validator public key (hex-encoded without 0x prefix)
pub const DEFAULT_VALIDATOR_PUBKEY: &str =
    "0106ca7c39cd272dbf21a86eeb3b36b7c26e2e9b94af64292419f7862936bca2ca";

/// Encode a payload for [`DelegationStrategy::execute`].
pub fn encode_payload(validator: &str) -> Bytes {
    let payload = DelegationPayload {
        validator: String::from(validator),
    };
    Bytes::from(payload.to_bytes().unwrap_or_default())
}

/// Validator Delegation Strategy Contract
#[odra::module]
pub struct DelegationStrategy {
    /// Vault allowed to drive this adapter
    vault: Var<Address>,
    /// Base asset contract address
    asset: Var<Address>,
    /// Validator used for empty payloads
    default_validator: Var<String>,
    /// Principal per validator
    delegations: Mapping<String, U256>,
    /// Validators with non-zero principal, in delegation order
    validators: Var<Vec<String>>,
    /// Sum of all delegations
    total_delegated: Var<U256>,
}

#[odra::module]
impl DelegationStrategy {
    /// Initialize the adapter for one vault
    pub fn init(&mut self, vault: Address, asset: Address, default_validator: Option<String>) {
        let default_validator =
            default_validator.unwrap_or_else(|| String::from(DEFAULT_VALIDATOR_PUBKEY));
        if default_validator.is_empty() {
            self.env().revert(VaultError::InvalidParameter);
        }

        self.vault.set(vault);
        self.asset.set(asset);
        self.default_validator.set(default_validator);
        self.total_delegated.set(U256::zero());
    }

    // ========== Adapter Entry Points ==========

    /// Book `amount`, already transferred by the vault, against a validator
    ///
    /// Reverts with `StakingFailed` when the payload cannot be decoded or the
    /// funds never arrived, and `UnknownValidator` for an empty validator key.
    pub fn execute(&mut self, amount: U256, data: Bytes) -> bool {
        self.require_vault();

        let validator = self.decode_validator(&data);

        // The vault transfers before calling; anything less means it never arrived
        if amount.is_zero() || self.idle_balance() < amount {
            self.env().revert(VaultError::StakingFailed);
        }

        let current = self.delegated_to(validator.clone());
        if current.is_zero() {
            let mut validators = self.validators();
            validators.push(validator.clone());
            self.validators.set(validators);
        }
        self.delegations.set(&validator, current + amount);
        self.total_delegated.set(self.total_delegated() + amount);
        true
    }

    /// Forward rewards (balance above principal) to the vault
    pub fn harvest(&mut self, data: Bytes) -> HarvestReport {
        self.require_vault();
        let _ = data;

        let rewards = self.idle_balance();
        if rewards.is_zero() {
            return HarvestReport::harvested(U256::zero());
        }

        let vault = self.vault();
        if !ledger::transfer(&self.env(), self.asset(), vault, rewards) {
            return HarvestReport::failed("reward transfer rejected by ledger");
        }
        HarvestReport::harvested(rewards)
    }

    /// Undelegate from every validator and return everything to the vault
    pub fn emergency_exit(&mut self, data: Bytes) -> U256 {
        self.require_vault();
        let _ = data;

        let recoverable = self.balance();
        if !recoverable.is_zero() {
            let vault = self.vault();
            if !ledger::transfer(&self.env(), self.asset(), vault, recoverable) {
                self.env().revert(VaultError::UnstakingFailed);
            }
        }

        for validator in self.validators() {
            self.delegations.set(&validator, U256::zero());
        }
        self.validators.set(Vec::new());
        self.total_delegated.set(U256::zero());

        recoverable
    }

    /// Principal plus unharvested rewards held for the vault
    pub fn balance(&self) -> U256 {
        ledger::balance_of(&self.env(), self.asset(), self.env().self_address())
    }

    // ========== View Functions ==========

    pub fn vault(&self) -> Address {
        match self.vault.get() {
            Some(vault) => vault,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    pub fn asset(&self) -> Address {
        match self.asset.get() {
            Some(asset) => asset,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    pub fn default_validator(&self) -> String {
        self.default_validator
            .get()
            .unwrap_or_else(|| String::from(DEFAULT_VALIDATOR_PUBKEY))
    }

    pub fn delegated_to(&self, validator: String) -> U256 {
        self.delegations.get(&validator).unwrap_or(U256::zero())
    }

    pub fn validators(&self) -> Vec<String> {
        self.validators.get().unwrap_or_default()
    }

    pub fn total_delegated(&self) -> U256 {
        self.total_delegated.get().unwrap_or(U256::zero())
    }

    // ========== Internal Functions ==========

    fn idle_balance(&self) -> U256 {
        self.balance().saturating_sub(self.total_delegated())
    }

    fn decode_validator(&self, data: &Bytes) -> String {
        if data.is_empty() {
            return self.default_validator();
        }
        let payload = match DelegationPayload::from_bytes(data) {
            Ok((payload, rest)) if rest.is_empty() => payload,
            _ => self.env().revert(VaultError::StakingFailed),
        };
        if payload.validator.is_empty() {
            self.env().revert(VaultError::UnknownValidator);
        }
        payload.validator
    }

    fn require_vault(&self) {
        if self.env().caller() != self.vault() {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}
