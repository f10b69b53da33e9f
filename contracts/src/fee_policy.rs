//! Withdrawal fee computation and treasury routing.
//!
//! The fee is taken out of the gross assets a withdrawer is owed, rounded
//! down so that ties favour the withdrawer. Collected fees are swept to the
//! treasury in the same transaction; a rejected sweep reverts the whole
//! withdrawal.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractEnv;
use crate::errors::VaultError;
use crate::ledger;
use crate::types::is_null_address;
use crate::yield_math::{mul_div_down, validate_fee, BPS_SCALE};

/// Split of a gross withdrawal into the withdrawer's and the treasury's part.
#[odra::odra_type]
#[derive(Copy, Default)]
pub struct FeeSplit {
    /// Assets delivered to the receiver
    pub net_assets: U256,
    /// Assets swept to the treasury
    pub fee_assets: U256,
}

/// `fee = gross * fee_bps / 10000` (rounded down), `net = gross - fee`.
pub fn compute_fee(gross_assets: U256, fee_bps: u32) -> Result<FeeSplit, VaultError> {
    validate_fee(fee_bps)?;

    let fee_assets = mul_div_down(gross_assets, U256::from(fee_bps), U256::from(BPS_SCALE))?;
    Ok(FeeSplit {
        net_assets: gross_assets - fee_assets,
        fee_assets,
    })
}

/// Fee configuration and running totals.
#[odra::odra_type]
pub struct FeePolicy {
    /// Withdrawal fee in basis points
    pub withdrawal_fee_bps: u32,
    /// Fee recipient
    pub treasury: Address,
    /// Fees swept to the treasury (all time)
    pub total_fees_collected: U256,
}

impl FeePolicy {
    pub fn new(withdrawal_fee_bps: u32, treasury: Address) -> Result<Self, VaultError> {
        validate_fee(withdrawal_fee_bps)?;
        if is_null_address(&treasury) {
            return Err(VaultError::InvalidParameter);
        }

        Ok(Self {
            withdrawal_fee_bps,
            treasury,
            total_fees_collected: U256::zero(),
        })
    }

    pub fn split(&self, gross_assets: U256) -> Result<FeeSplit, VaultError> {
        compute_fee(gross_assets, self.withdrawal_fee_bps)
    }

    pub fn set_fee(&mut self, fee_bps: u32) -> Result<(), VaultError> {
        validate_fee(fee_bps)?;
        self.withdrawal_fee_bps = fee_bps;
        Ok(())
    }

    pub fn set_treasury(&mut self, treasury: Address) -> Result<(), VaultError> {
        if is_null_address(&treasury) {
            return Err(VaultError::InvalidParameter);
        }
        self.treasury = treasury;
        Ok(())
    }

    /// Transfer `fee_assets` of `asset` to the treasury.
    ///
    /// Fee collection is not best-effort: a ledger that reports failure
    /// yields [`VaultError::FeeSweepFailed`].
    pub fn sweep(&mut self, env: &ContractEnv, asset: Address, fee_assets: U256) -> Result<(), VaultError> {
        if fee_assets.is_zero() {
            return Ok(());
        }

        if !ledger::transfer(env, asset, self.treasury, fee_assets) {
            return Err(VaultError::FeeSweepFailed);
        }

        self.total_fees_collected = self
            .total_fees_collected
            .checked_add(fee_assets)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }
}
