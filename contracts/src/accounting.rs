//! Share/asset bookkeeping and yield accrual.
//!
//! Follows the ybToken model:
//! - shares = claim tokens minted by the vault
//! - assets = notional base-asset value, accrued yield included
//! - R = total_assets / total_shares
//!
//! Yield is reflected by R increasing, never by rebasing balances. The
//! accrual watermark only moves forward.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::yield_math::{accrued_yield, mul_div_down, mul_div_up, validate_rate, PRECISION};

/// Rounding direction for conversions.
///
/// Paths that pay the caller round down, paths where the caller pays in
/// round up. Either way the vault keeps the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Vault-wide totals and accrual schedule.
#[odra::odra_type]
#[derive(Default)]
pub struct VaultAccounting {
    /// Notional assets backing all shares
    pub total_assets: U256,
    /// Outstanding shares
    pub total_shares: U256,
    /// Last reconciliation time (seconds)
    pub last_accrual_timestamp: u64,
    /// Annualized yield rate in basis points
    pub yield_rate_bps: u32,
}

impl VaultAccounting {
    pub fn new(yield_rate_bps: u32, now: u64) -> Result<Self, VaultError> {
        validate_rate(yield_rate_bps)?;
        Ok(Self {
            total_assets: U256::zero(),
            total_shares: U256::zero(),
            last_accrual_timestamp: now,
            yield_rate_bps,
        })
    }

    /// Fold yield up to `now` into `total_assets` and return the amount added.
    ///
    /// A timestamp at or before the watermark is a no-op. With no shares
    /// outstanding there is nobody to accrue for, so only the watermark moves.
    pub fn accrue(&mut self, now: u64) -> Result<U256, VaultError> {
        if now <= self.last_accrual_timestamp {
            return Ok(U256::zero());
        }

        let elapsed = now - self.last_accrual_timestamp;
        let accrued = if self.total_shares.is_zero() {
            U256::zero()
        } else {
            accrued_yield(self.total_assets, self.yield_rate_bps, elapsed)?
        };

        self.total_assets = self
            .total_assets
            .checked_add(accrued)
            .ok_or(VaultError::ArithmeticOverflow)?;
        self.last_accrual_timestamp = now;
        Ok(accrued)
    }

    /// Copy of `self` accrued to `now`, for previews.
    pub fn projected(&self, now: u64) -> Result<Self, VaultError> {
        let mut projected = self.clone();
        projected.accrue(now)?;
        Ok(projected)
    }

    /// Shares worth `assets`. The first depositor gets 1:1.
    pub fn assets_to_shares(&self, assets: U256, rounding: Rounding) -> Result<U256, VaultError> {
        if self.total_shares.is_zero() {
            return Ok(assets);
        }
        if self.total_assets.is_zero() {
            return Err(VaultError::InsufficientBalance);
        }

        match rounding {
            Rounding::Down => mul_div_down(assets, self.total_shares, self.total_assets),
            Rounding::Up => mul_div_up(assets, self.total_shares, self.total_assets),
        }
    }

    /// Assets backing `shares`. Zero when no shares exist.
    pub fn shares_to_assets(&self, shares: U256, rounding: Rounding) -> Result<U256, VaultError> {
        if self.total_shares.is_zero() {
            return Ok(U256::zero());
        }

        match rounding {
            Rounding::Down => mul_div_down(shares, self.total_assets, self.total_shares),
            Rounding::Up => mul_div_up(shares, self.total_assets, self.total_shares),
        }
    }

    /// Assets a minter of `shares` pays in. Bootstraps 1:1 like deposits.
    pub fn mint_cost(&self, shares: U256) -> Result<U256, VaultError> {
        if self.total_shares.is_zero() {
            return Ok(shares);
        }
        self.shares_to_assets(shares, Rounding::Up)
    }

    /// Exchange rate scaled by 1e18; 1.0 when no shares exist.
    pub fn share_price(&self) -> Result<U256, VaultError> {
        if self.total_shares.is_zero() {
            return Ok(U256::from(PRECISION));
        }
        mul_div_down(self.total_assets, U256::from(PRECISION), self.total_shares)
    }

    pub fn credit_assets(&mut self, amount: U256) -> Result<(), VaultError> {
        self.total_assets = self
            .total_assets
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn debit_assets(&mut self, amount: U256) -> Result<(), VaultError> {
        if amount > self.total_assets {
            return Err(VaultError::InsufficientBalance);
        }
        self.total_assets = self.total_assets - amount;
        Ok(())
    }

    pub fn mint_shares(&mut self, amount: U256) -> Result<(), VaultError> {
        self.total_shares = self
            .total_shares
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn burn_shares(&mut self, amount: U256) -> Result<(), VaultError> {
        if amount > self.total_shares {
            return Err(VaultError::InsufficientBalance);
        }
        self.total_shares = self.total_shares - amount;
        Ok(())
    }

    /// Change the rate. Callers accrue at the old rate first.
    pub fn set_yield_rate(&mut self, rate_bps: u32) -> Result<(), VaultError> {
        validate_rate(rate_bps)?;
        self.yield_rate_bps = rate_bps;
        Ok(())
    }
}
