//! Yield Vault Contract
//!
//! Yield-bearing vault over a CEP-18 base asset.
//! Follows the ybToken model where:
//! - shares = vault token balance
//! - assets = notional base-asset backing, accrued yield included
//! - R = total_assets / total_shares
//!
//! ## Operation Flow
//!
//! Every mutating entry point runs as one guarded unit:
//!
//! 1. Take the in-flight flag (a nested call reverts with `ReentrancyBlocked`)
//! 2. Accrue yield up to the current block time
//! 3. Apply the effect (mint/burn, fee sweep, strategy dispatch)
//! 4. Release the flag
//!
//! Any error reverts the transaction, which discards every write and nested
//! call made by the unit.
//!
//! ## Lifecycle
//!
//! Active <-> Paused. While paused, deposits, mints and strategy execution
//! are blocked; withdrawals, redemptions, harvests and emergency exits keep
//! working.
//!
//! ## Strategy Capital
//!
//! Moving capital into a strategy leaves `total_assets` unchanged; the
//! registry tracks it as principal. Harvest proceeds are credited as they
//! arrive. An emergency exit credits any surplus over principal and debits
//! any shortfall.

use odra::prelude::*;
use odra::casper_types::bytesrepr::Bytes;
use odra::casper_types::{U256, runtime_args};
use odra::CallDef;
use crate::accounting::{Rounding, VaultAccounting};
use crate::errors::VaultError;
use crate::events::*;
use crate::fee_policy::{FeePolicy, FeeSplit};
use crate::ledger;
use crate::strategy_registry::StrategyRegistry;
use crate::types::{is_null_address, Role, StrategyEntry, VaultStatus};

/// Casper block time is in milliseconds
const MILLIS_PER_SECOND: u64 = 1_000;

/// Yield Vault Contract
#[odra::module]
pub struct YieldVault {
    // ===== Share Token State =====
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Balance mapping (owner -> shares)
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner, spender) -> shares
    allowances: Mapping<(Address, Address), U256>,

    // ===== Vault State =====
    /// Base asset contract address
    asset: Var<Address>,
    /// Authorization collaborator address
    access_control: Var<Address>,
    /// Totals and accrual schedule
    accounting: Var<VaultAccounting>,
    /// Withdrawal fee and treasury
    fee_policy: Var<FeePolicy>,
    /// Registered strategy adapters
    registry: SubModule<StrategyRegistry>,
    /// Whether deposits and strategy execution are blocked
    paused: Var<bool>,
    /// Set while a mutating entry point is executing
    in_flight: Var<bool>,
}

#[odra::module]
impl YieldVault {
    /// Initialize the vault.
    ///
    /// `manager` and `agent` must already hold their roles on
    /// `access_control`.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        asset: Address,
        name: String,
        symbol: String,
        access_control: Address,
        manager: Address,
        agent: Address,
        treasury: Address,
        withdrawal_fee_bps: u32,
        yield_rate_bps: u32,
    ) {
        for address in [asset, access_control, manager, agent, treasury] {
            if is_null_address(&address) {
                self.env().revert(VaultError::InvalidParameter);
            }
        }
        if name.is_empty() || symbol.is_empty() {
            self.env().revert(VaultError::InvalidParameter);
        }

        let fee_policy = FeePolicy::new(withdrawal_fee_bps, treasury);
        let fee_policy = self.unwrap_or_revert(fee_policy);
        let accounting = VaultAccounting::new(yield_rate_bps, self.now());
        let accounting = self.unwrap_or_revert(accounting);

        self.name.set(name);
        self.symbol.set(symbol);
        self.asset.set(asset);
        self.access_control.set(access_control);
        self.accounting.set(accounting);
        self.fee_policy.set(fee_policy);
        self.paused.set(false);
        self.in_flight.set(false);

        if !self.has_role(Role::Manager, manager) || !self.has_role(Role::Agent, agent) {
            self.env().revert(VaultError::InvalidParameter);
        }
    }

    // ===== Share Token Functions =====

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_default()
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    /// Shares use the base asset's decimals
    pub fn decimals(&self) -> u8 {
        ledger::decimals(&self.env(), self.asset())
    }

    /// Get total supply (total shares)
    pub fn total_supply(&self) -> U256 {
        self.stored_accounting().total_shares
    }

    /// Get balance of account (in shares)
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer shares to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        self.guarded(|vault| {
            let sender = vault.env().caller();
            vault.transfer_shares(sender, recipient, amount)?;
            Ok(true)
        })
    }

    /// Approve spender to transfer shares
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.guarded(|vault| {
            let owner = vault.env().caller();
            vault.allowances.set(&(owner, spender), amount);
            Ok(true)
        })
    }

    /// Transfer from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        self.guarded(|vault| {
            let spender = vault.env().caller();
            vault.spend_allowance(owner, spender, amount)?;
            vault.transfer_shares(owner, recipient, amount)?;
            Ok(true)
        })
    }

    // ===== Vault Functions =====

    /// Deposit `assets` from the caller and mint shares to `receiver`
    ///
    /// # Returns
    /// * Shares minted
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.guarded(|vault| vault.deposit_internal(assets, receiver))
    }

    /// Mint exactly `shares` to `receiver`, pulling the assets they cost
    ///
    /// # Returns
    /// * Assets paid in
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.guarded(|vault| vault.mint_internal(shares, receiver))
    }

    /// Withdraw `assets` (gross of fee) out of `owner`'s position
    ///
    /// # Returns
    /// * Shares burned
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        self.guarded(|vault| vault.withdraw_internal(assets, receiver, owner))
    }

    /// Burn exactly `shares` of `owner` and pay out what they are worth
    ///
    /// # Returns
    /// * Net assets delivered to `receiver`
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        self.guarded(|vault| vault.redeem_internal(shares, receiver, owner))
    }

    /// Checkpoint yield up to the current block time (any caller)
    ///
    /// # Returns
    /// * Assets accrued by this call
    pub fn accrue(&mut self) -> U256 {
        self.guarded(|vault| {
            let before = vault.stored_accounting().total_assets;
            let accounting = vault.accrue_now()?;
            Ok(accounting.total_assets - before)
        })
    }

    // ===== Strategy Functions =====

    /// Register a strategy adapter (manager only)
    pub fn add_strategy(&mut self, strategy: Address) {
        self.guarded(|vault| {
            vault.require_role(Role::Manager)?;
            let now = vault.now();
            vault.registry.add(strategy, now)?;
            vault.env().emit_event(StrategyAdded { strategy });
            Ok(())
        })
    }

    /// Unregister an empty strategy adapter (manager only)
    pub fn remove_strategy(&mut self, strategy: Address) {
        self.guarded(|vault| {
            vault.require_role(Role::Manager)?;
            let mut accounting = vault.accrue_now()?;

            let outstanding = vault.registry.remove(strategy)?;
            let written_off = outstanding.min(accounting.total_assets);
            accounting.debit_assets(written_off)?;
            vault.accounting.set(accounting);

            vault.env().emit_event(StrategyRemoved { strategy, written_off });
            Ok(())
        })
    }

    /// Move `amount` of idle assets into a strategy (agent only)
    pub fn deposit_to_strategy(&mut self, strategy: Address, amount: U256, data: Bytes) {
        self.guarded(|vault| {
            vault.require_role(Role::Agent)?;
            vault.require_not_paused()?;
            if amount.is_zero() {
                return Err(VaultError::InvalidParameter);
            }
            vault.accrue_now()?;

            let asset = vault.asset();
            vault.registry.dispatch_execute(asset, strategy, amount, data)?;

            vault.env().emit_event(StrategyExecuted { strategy, amount });
            Ok(())
        })
    }

    /// Collect strategy rewards (agent only). Adapter failure is not fatal.
    ///
    /// # Returns
    /// * Proceeds credited to the vault
    pub fn harvest_strategy(&mut self, strategy: Address, data: Bytes) -> U256 {
        self.guarded(|vault| {
            vault.require_role(Role::Agent)?;
            let mut accounting = vault.accrue_now()?;

            let asset = vault.asset();
            let outcome = vault.registry.dispatch_harvest(asset, strategy, data)?;

            if let Some(reason) = outcome.report.failure {
                vault.env().emit_event(HarvestFailed { strategy, reason });
            }

            accounting.credit_assets(outcome.proceeds)?;
            let total_assets = accounting.total_assets;
            vault.accounting.set(accounting);

            vault.env().emit_event(StrategyHarvested {
                strategy,
                proceeds: outcome.proceeds,
                total_assets,
            });
            Ok(outcome.proceeds)
        })
    }

    /// Force a strategy to return everything (agent only)
    ///
    /// # Returns
    /// * Assets recovered
    pub fn emergency_exit_strategy(&mut self, strategy: Address, data: Bytes) -> U256 {
        self.guarded(|vault| {
            vault.require_role(Role::Agent)?;
            let mut accounting = vault.accrue_now()?;

            let asset = vault.asset();
            let outcome = vault.registry.dispatch_emergency_exit(asset, strategy, data)?;

            if outcome.recovered >= outcome.principal {
                accounting.credit_assets(outcome.recovered - outcome.principal)?;
            } else {
                let loss = outcome.principal - outcome.recovered;
                accounting.debit_assets(loss.min(accounting.total_assets))?;
            }
            let total_assets = accounting.total_assets;
            vault.accounting.set(accounting);

            vault.env().emit_event(EmergencyExited {
                strategy,
                recovered: outcome.recovered,
                principal: outcome.principal,
                total_assets,
            });
            Ok(outcome.recovered)
        })
    }

    // ===== Parameter Functions =====

    /// Change the annual yield rate (manager only)
    ///
    /// Yield up to now accrues at the old rate.
    pub fn set_yield_rate(&mut self, rate_bps: u32) {
        self.guarded(|vault| {
            vault.require_role(Role::Manager)?;
            let mut accounting = vault.accrue_now()?;

            let old_rate_bps = accounting.yield_rate_bps;
            accounting.set_yield_rate(rate_bps)?;
            vault.accounting.set(accounting);

            vault.env().emit_event(YieldRateUpdated {
                old_rate_bps,
                new_rate_bps: rate_bps,
            });
            Ok(())
        })
    }

    /// Change the withdrawal fee (manager only)
    pub fn set_withdrawal_fee(&mut self, fee_bps: u32) {
        self.guarded(|vault| {
            vault.require_role(Role::Manager)?;
            vault.accrue_now()?;

            let mut fee_policy = vault.stored_fee_policy();
            let old_fee_bps = fee_policy.withdrawal_fee_bps;
            fee_policy.set_fee(fee_bps)?;
            vault.fee_policy.set(fee_policy);

            vault.env().emit_event(WithdrawalFeeUpdated {
                old_fee_bps,
                new_fee_bps: fee_bps,
            });
            Ok(())
        })
    }

    /// Change the fee recipient (owner only)
    pub fn set_treasury(&mut self, treasury: Address) {
        self.guarded(|vault| {
            vault.require_role(Role::Owner)?;

            let mut fee_policy = vault.stored_fee_policy();
            let old_treasury = fee_policy.treasury;
            fee_policy.set_treasury(treasury)?;
            vault.fee_policy.set(fee_policy);

            vault.env().emit_event(TreasuryUpdated {
                old_treasury,
                new_treasury: treasury,
            });
            Ok(())
        })
    }

    /// Block deposits and strategy execution (pauser only)
    pub fn pause(&mut self) {
        self.guarded(|vault| {
            vault.require_role(Role::Pauser)?;
            vault.paused.set(true);
            vault.env().emit_event(VaultPaused { by: vault.env().caller() });
            Ok(())
        })
    }

    /// Resume normal operation (pauser only)
    pub fn unpause(&mut self) {
        self.guarded(|vault| {
            vault.require_role(Role::Pauser)?;
            vault.paused.set(false);
            vault.env().emit_event(VaultUnpaused { by: vault.env().caller() });
            Ok(())
        })
    }

    // ===== View Functions =====

    /// Base asset address
    pub fn asset(&self) -> Address {
        match self.asset.get() {
            Some(asset) => asset,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    /// Authorization collaborator address
    pub fn access_control(&self) -> Address {
        match self.access_control.get() {
            Some(access_control) => access_control,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    /// Total assets as of the last accrual
    pub fn total_assets(&self) -> U256 {
        self.stored_accounting().total_assets
    }

    /// Total assets if accrual ran at the current block time
    pub fn projected_total_assets(&self) -> U256 {
        self.projected_accounting().total_assets
    }

    /// Shares worth `assets` at the stored (not re-accrued) rate
    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        let shares = self.stored_accounting().assets_to_shares(assets, Rounding::Down);
        self.unwrap_or_revert(shares)
    }

    /// Assets backing `shares` at the stored (not re-accrued) rate
    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        let assets = self.stored_accounting().shares_to_assets(shares, Rounding::Down);
        self.unwrap_or_revert(assets)
    }

    /// Shares a deposit of `assets` would mint now
    pub fn preview_deposit(&self, assets: U256) -> U256 {
        let shares = self.projected_accounting().assets_to_shares(assets, Rounding::Down);
        self.unwrap_or_revert(shares)
    }

    /// Assets a mint of `shares` would cost now
    pub fn preview_mint(&self, shares: U256) -> U256 {
        let assets = self.projected_accounting().mint_cost(shares);
        self.unwrap_or_revert(assets)
    }

    /// Shares a withdrawal of `assets` would burn now
    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        let shares = self.projected_accounting().assets_to_shares(assets, Rounding::Up);
        self.unwrap_or_revert(shares)
    }

    /// Net assets a redemption of `shares` would deliver now
    pub fn preview_redeem(&self, shares: U256) -> U256 {
        let split = self.redeem_split(&self.projected_accounting(), shares);
        self.unwrap_or_revert(split).net_assets
    }

    /// Gross assets `owner` can withdraw now
    pub fn max_withdraw(&self, owner: Address) -> U256 {
        let assets = self
            .projected_accounting()
            .shares_to_assets(self.balance_of(owner), Rounding::Down);
        self.unwrap_or_revert(assets)
    }

    /// Shares `owner` can redeem
    pub fn max_redeem(&self, owner: Address) -> U256 {
        self.balance_of(owner)
    }

    /// Exchange rate scaled by 1e18, projected to now
    pub fn share_price(&self) -> U256 {
        let price = self.projected_accounting().share_price();
        self.unwrap_or_revert(price)
    }

    /// Fee split for a gross withdrawal of `assets`
    pub fn preview_fee(&self, assets: U256) -> FeeSplit {
        let split = self.stored_fee_policy().split(assets);
        self.unwrap_or_revert(split)
    }

    pub fn yield_rate_bps(&self) -> u32 {
        self.stored_accounting().yield_rate_bps
    }

    pub fn withdrawal_fee_bps(&self) -> u32 {
        self.stored_fee_policy().withdrawal_fee_bps
    }

    pub fn treasury(&self) -> Address {
        self.stored_fee_policy().treasury
    }

    pub fn total_fees_collected(&self) -> U256 {
        self.stored_fee_policy().total_fees_collected
    }

    pub fn last_accrual_timestamp(&self) -> u64 {
        self.stored_accounting().last_accrual_timestamp
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get().unwrap_or(false)
    }

    /// Registered strategies in registration order
    pub fn strategies(&self) -> Vec<Address> {
        self.registry.strategies()
    }

    /// Registry entry for `strategy`
    pub fn strategy(&self, strategy: Address) -> Option<StrategyEntry> {
        self.registry.strategy(strategy)
    }

    /// Adapter-reported balance of a registered strategy (diagnostics only)
    pub fn strategy_balance(&self, strategy: Address) -> U256 {
        let balance = self.registry.adapter_balance(strategy);
        self.unwrap_or_revert(balance)
    }

    /// Snapshot of the vault
    pub fn status(&self) -> VaultStatus {
        let accounting = self.stored_accounting();
        let fee_policy = self.stored_fee_policy();
        VaultStatus {
            total_assets: accounting.total_assets,
            total_shares: accounting.total_shares,
            last_accrual_timestamp: accounting.last_accrual_timestamp,
            yield_rate_bps: accounting.yield_rate_bps,
            withdrawal_fee_bps: fee_policy.withdrawal_fee_bps,
            treasury: fee_policy.treasury,
            paused: self.is_paused(),
            strategy_count: self.registry.count(),
            total_fees_collected: fee_policy.total_fees_collected,
        }
    }
}

impl YieldVault {
    // ===== Guard =====

    /// Run `op` as one non-reentrant unit; an `Err` reverts the transaction.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, VaultError>) -> T {
        if self.in_flight.get().unwrap_or(false) {
            self.env().revert(VaultError::ReentrancyBlocked);
        }
        self.in_flight.set(true);

        let result = op(self);

        match result {
            Ok(value) => {
                self.in_flight.set(false);
                value
            }
            Err(error) => self.env().revert(error),
        }
    }

    fn unwrap_or_revert<T>(&self, result: Result<T, VaultError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }

    // ===== Operations =====

    fn deposit_internal(&mut self, assets: U256, receiver: Address) -> Result<U256, VaultError> {
        self.require_not_paused()?;
        if assets.is_zero() || is_null_address(&receiver) {
            return Err(VaultError::InvalidParameter);
        }

        let mut accounting = self.accrue_now()?;
        let shares = accounting.assets_to_shares(assets, Rounding::Down)?;
        if shares.is_zero() {
            return Err(VaultError::ZeroShares);
        }

        self.settle_pay_in(&mut accounting, assets, shares, receiver)?;
        Ok(shares)
    }

    fn mint_internal(&mut self, shares: U256, receiver: Address) -> Result<U256, VaultError> {
        self.require_not_paused()?;
        if shares.is_zero() || is_null_address(&receiver) {
            return Err(VaultError::InvalidParameter);
        }

        let mut accounting = self.accrue_now()?;
        let assets = accounting.mint_cost(shares)?;
        if assets.is_zero() {
            return Err(VaultError::InvalidParameter);
        }

        self.settle_pay_in(&mut accounting, assets, shares, receiver)?;
        Ok(assets)
    }

    fn withdraw_internal(
        &mut self,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, VaultError> {
        if assets.is_zero() || is_null_address(&receiver) {
            return Err(VaultError::InvalidParameter);
        }

        let mut accounting = self.accrue_now()?;
        let shares = accounting.assets_to_shares(assets, Rounding::Up)?;
        let split = self.stored_fee_policy().split(assets)?;

        self.settle_pay_out(&mut accounting, assets, shares, split, receiver, owner)?;
        Ok(shares)
    }

    fn redeem_internal(
        &mut self,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, VaultError> {
        if shares.is_zero() || is_null_address(&receiver) {
            return Err(VaultError::InvalidParameter);
        }

        let mut accounting = self.accrue_now()?;
        let split = self.redeem_split(&accounting, shares)?;
        let assets = split.net_assets + split.fee_assets;
        if assets.is_zero() {
            return Err(VaultError::InvalidParameter);
        }

        self.settle_pay_out(&mut accounting, assets, shares, split, receiver, owner)?;
        Ok(split.net_assets)
    }

    /// Pull `assets` from the caller, then book and mint `shares`.
    fn settle_pay_in(
        &mut self,
        accounting: &mut VaultAccounting,
        assets: U256,
        shares: U256,
        receiver: Address,
    ) -> Result<(), VaultError> {
        let caller = self.env().caller();
        let vault = self.env().self_address();
        if !ledger::transfer_from(&self.env(), self.asset(), caller, vault, assets) {
            return Err(VaultError::TokenTransferFailed);
        }

        accounting.credit_assets(assets)?;
        accounting.mint_shares(shares)?;
        self.accounting.set(accounting.clone());
        self.mint_balance(receiver, shares)?;

        self.env().emit_event(Deposited {
            caller,
            receiver,
            assets,
            shares,
            total_assets: accounting.total_assets,
            total_shares: accounting.total_shares,
        });
        Ok(())
    }

    /// Burn `owner`'s shares and book the outflow, then sweep the fee and
    /// deliver the rest.
    fn settle_pay_out(
        &mut self,
        accounting: &mut VaultAccounting,
        assets: U256,
        shares: U256,
        split: FeeSplit,
        receiver: Address,
        owner: Address,
    ) -> Result<(), VaultError> {
        let caller = self.env().caller();
        if caller != owner {
            self.spend_allowance(owner, caller, shares)?;
        }

        self.burn_balance(owner, shares)?;
        accounting.burn_shares(shares)?;
        accounting.debit_assets(assets)?;
        self.accounting.set(accounting.clone());

        let asset = self.asset();
        let mut fee_policy = self.stored_fee_policy();
        fee_policy.sweep(&self.env(), asset, split.fee_assets)?;
        let treasury = fee_policy.treasury;
        self.fee_policy.set(fee_policy);

        if !ledger::transfer(&self.env(), asset, receiver, split.net_assets) {
            return Err(VaultError::TokenTransferFailed);
        }

        if !split.fee_assets.is_zero() {
            self.env().emit_event(FeeCollected {
                treasury,
                amount: split.fee_assets,
            });
        }
        self.env().emit_event(Withdrawn {
            caller,
            receiver,
            owner,
            assets,
            net_assets: split.net_assets,
            fee_assets: split.fee_assets,
            shares,
            total_assets: accounting.total_assets,
            total_shares: accounting.total_shares,
        });
        Ok(())
    }

    fn redeem_split(&self, accounting: &VaultAccounting, shares: U256) -> Result<FeeSplit, VaultError> {
        let assets = accounting.shares_to_assets(shares, Rounding::Down)?;
        self.stored_fee_policy().split(assets)
    }

    // ===== Accrual =====

    fn now(&self) -> u64 {
        self.env().get_block_time() / MILLIS_PER_SECOND
    }

    /// Accrue stored accounting to now, persist it, and hand back a copy.
    fn accrue_now(&mut self) -> Result<VaultAccounting, VaultError> {
        let mut accounting = self.accounting.get().ok_or(VaultError::NotInitialized)?;
        let last = accounting.last_accrual_timestamp;
        let now = self.now();

        let accrued = accounting.accrue(now)?;
        self.accounting.set(accounting.clone());

        if !accrued.is_zero() {
            self.env().emit_event(YieldAccrued {
                amount: accrued,
                elapsed_seconds: now - last,
                yield_rate_bps: accounting.yield_rate_bps,
                total_assets: accounting.total_assets,
            });
        }
        Ok(accounting)
    }

    fn stored_accounting(&self) -> VaultAccounting {
        self.accounting.get().unwrap_or_default()
    }

    fn projected_accounting(&self) -> VaultAccounting {
        let projected = self.stored_accounting().projected(self.now());
        self.unwrap_or_revert(projected)
    }

    fn stored_fee_policy(&self) -> FeePolicy {
        match self.fee_policy.get() {
            Some(fee_policy) => fee_policy,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    // ===== Share Ledger =====

    fn transfer_shares(&mut self, from: Address, to: Address, amount: U256) -> Result<(), VaultError> {
        if is_null_address(&to) {
            return Err(VaultError::InvalidParameter);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(VaultError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(SharesTransferred { from, to, amount });
        Ok(())
    }

    fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) -> Result<(), VaultError> {
        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            return Err(VaultError::InsufficientAllowance);
        }
        self.allowances.set(&(owner, spender), current_allowance - amount);
        Ok(())
    }

    fn mint_balance(&mut self, to: Address, amount: U256) -> Result<(), VaultError> {
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.balances.set(&to, balance);
        Ok(())
    }

    fn burn_balance(&mut self, from: Address, amount: U256) -> Result<(), VaultError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(VaultError::InsufficientBalance);
        }
        self.balances.set(&from, balance - amount);
        Ok(())
    }

    // ===== Authorization =====

    fn has_role(&self, role: Role, account: Address) -> bool {
        let args = runtime_args! {
            "role" => role,
            "account" => account
        };
        let call_def = CallDef::new("has_role", false, args);
        self.env().call_contract(self.access_control(), call_def)
    }

    fn require_role(&self, role: Role) -> Result<(), VaultError> {
        if !self.has_role(role, self.env().caller()) {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(&self) -> Result<(), VaultError> {
        if self.is_paused() {
            return Err(VaultError::VaultPaused);
        }
        Ok(())
    }
}
