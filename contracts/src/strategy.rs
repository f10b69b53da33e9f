//! Strategy adapter capability contract.
//!
//! Every yield-source plugin the vault delegates capital to implements these
//! four entry points. The vault transfers the base asset to the adapter
//! before `execute`, and expects the adapter to push funds back on
//! `harvest` and `emergency_exit`.
//!
//! Payload decoding is per adapter. `data` is an opaque `bytesrepr` blob;
//! each adapter documents the type it decodes (see
//! [`crate::delegation_strategy`] for [`crate::types::DelegationPayload`]).

use odra::prelude::*;
use odra::casper_types::bytesrepr::Bytes;
use odra::casper_types::U256;
use crate::types::HarvestReport;

#[odra::external_contract]
pub trait StrategyAdapter {
    /// Put `amount` (already transferred by the vault) to work.
    ///
    /// Returns `false` when staking did not happen. An adapter may instead
    /// revert with its own code (`StakingFailed`, `UnknownValidator`, ...),
    /// which reaches the vault's caller unchanged.
    fn execute(&mut self, amount: U256, data: Bytes) -> bool;

    /// Forward accumulated rewards to the vault.
    ///
    /// Must not revert on a failed harvest; failure is reported in the
    /// returned [`HarvestReport`].
    fn harvest(&mut self, data: Bytes) -> HarvestReport;

    /// Unwind every position and return all recoverable funds to the vault.
    ///
    /// Returns the amount the adapter sent back.
    fn emergency_exit(&mut self, data: Bytes) -> U256;

    /// Funds the adapter currently holds on the vault's behalf.
    fn balance(&self) -> U256;
}
