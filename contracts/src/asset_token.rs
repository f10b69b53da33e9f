//! Base Asset Token Contract
//!
//! CEP-18 compatible fungible token used as a vault's base asset on test
//! networks. Minting is restricted to an admin-managed minter list.
//!
//! Frozen accounts can neither send nor receive; transfers touching them
//! report `false` instead of reverting, so callers see an explicit ledger
//! failure.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;

/// Base Asset Token Contract
#[odra::module]
pub struct AssetToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin address
    admin: Var<Address>,
    /// Authorized minters
    minters: Mapping<Address, bool>,
    /// Frozen accounts
    frozen: Mapping<Address, bool>,
}

#[odra::module]
impl AssetToken {
    /// Initialize the token; the admin is also the first minter
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, admin: Address) {
        if name.is_empty() || symbol.is_empty() {
            self.env().revert(VaultError::InvalidParameter);
        }
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.admin.set(admin);
        self.minters.set(&admin, true);
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_default()
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(9)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount)
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(VaultError::InsufficientAllowance);
        }

        if !self.transfer_internal(owner, recipient, amount) {
            return false;
        }
        self.allowances.set(&(owner, spender), current_allowance - amount);
        true
    }

    // ========== Supply Functions ==========

    /// Mint new tokens (minters only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        if !self.is_minter(self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);
    }

    /// Burn tokens from caller
    pub fn burn(&mut self, amount: U256) {
        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }

        self.balances.set(&caller, current_balance - amount);
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);
    }

    // ========== Admin Functions ==========

    /// Add an authorized minter (admin only)
    pub fn add_minter(&mut self, minter: Address) {
        self.require_admin();
        self.minters.set(&minter, true);
    }

    /// Remove an authorized minter (admin only)
    pub fn remove_minter(&mut self, minter: Address) {
        self.require_admin();
        self.minters.set(&minter, false);
    }

    /// Check if address is authorized minter
    pub fn is_minter(&self, account: Address) -> bool {
        self.minters.get(&account).unwrap_or(false)
    }

    /// Freeze or unfreeze an account (admin only)
    pub fn set_frozen(&mut self, account: Address, frozen: bool) {
        self.require_admin();
        self.frozen.set(&account, frozen);
    }

    /// Check if account is frozen
    pub fn is_frozen(&self, account: Address) -> bool {
        self.frozen.get(&account).unwrap_or(false)
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if self.is_frozen(from) || self.is_frozen(to) {
            return false;
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
        true
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        if self.admin.get() != Some(caller) {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}
