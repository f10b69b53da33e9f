//! Access Control Contract
//!
//! Capability store consulted by the vault. Implements a flat role set:
//! - Owner (administers every role, sets the treasury)
//! - Manager (strategy registry, yield rate, withdrawal fee)
//! - Agent (moves capital into and out of strategies)
//! - Pauser (pause / unpause)
//!
//! The vault only ever calls `has_role`; role storage lives here.

use odra::prelude::*;
use crate::errors::VaultError;
use crate::events::{RoleGranted, RoleRevoked};
use crate::types::{is_null_address, Role};

/// Access Control Contract
#[odra::module]
pub struct AccessControl {
    /// Role assignments: (role, account) -> bool
    roles: Mapping<(Role, Address), bool>,
    /// Role admin mapping: role -> admin_role
    role_admin: Mapping<Role, Role>,
    /// Number of accounts with each role
    role_count: Mapping<Role, u32>,
    /// Whether the contract is initialized
    initialized: Var<bool>,
}

#[odra::module]
impl AccessControl {
    /// Initialize with the vault's role holders
    pub fn init(&mut self, owner: Address, manager: Address, agent: Address, pauser: Address) {
        if self.initialized.get().unwrap_or(false) {
            self.env().revert(VaultError::InvalidParameter);
        }
        for account in [owner, manager, agent, pauser] {
            if is_null_address(&account) {
                self.env().revert(VaultError::InvalidParameter);
            }
        }

        self.set_role_internal(Role::Owner, owner, true);
        self.set_role_internal(Role::Manager, manager, true);
        self.set_role_internal(Role::Agent, agent, true);
        self.set_role_internal(Role::Pauser, pauser, true);

        for role in Role::ALL {
            self.role_admin.set(&role, Role::Owner);
        }

        self.initialized.set(true);
    }

    // ========== Role Query Functions ==========

    /// Check if account has a specific role
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.roles.get(&(role, account)).unwrap_or(false)
    }

    /// Check if caller has a specific role
    pub fn caller_has_role(&self, role: Role) -> bool {
        self.has_role(role, self.env().caller())
    }

    /// Get the admin role for a given role
    pub fn get_role_admin(&self, role: Role) -> Role {
        self.role_admin.get(&role).unwrap_or(Role::Owner)
    }

    /// Get the number of accounts with a role
    pub fn get_role_member_count(&self, role: Role) -> u32 {
        self.role_count.get(&role).unwrap_or(0)
    }

    // ========== Role Management Functions ==========

    /// Grant a role to an account (requires role admin)
    pub fn grant_role(&mut self, role: Role, account: Address) {
        self.require_role_admin(role);

        if is_null_address(&account) {
            self.env().revert(VaultError::InvalidParameter);
        }
        if self.has_role(role, account) {
            return;
        }

        self.set_role_internal(role, account, true);
        self.env().emit_event(RoleGranted {
            role,
            account,
            by: self.env().caller(),
        });
    }

    /// Revoke a role from an account (requires role admin)
    pub fn revoke_role(&mut self, role: Role, account: Address) {
        self.require_role_admin(role);

        if !self.has_role(role, account) {
            return;
        }

        self.require_not_last_owner(role);
        self.set_role_internal(role, account, false);
        self.env().emit_event(RoleRevoked {
            role,
            account,
            by: self.env().caller(),
        });
    }

    /// Renounce a role (caller gives up their own role)
    pub fn renounce_role(&mut self, role: Role) {
        let caller = self.env().caller();

        if !self.has_role(role, caller) {
            return;
        }

        self.require_not_last_owner(role);
        self.set_role_internal(role, caller, false);
        self.env().emit_event(RoleRevoked {
            role,
            account: caller,
            by: caller,
        });
    }

    /// Set the admin role for a role (owner only)
    pub fn set_role_admin(&mut self, role: Role, admin_role: Role) {
        if !self.caller_has_role(Role::Owner) {
            self.env().revert(VaultError::Unauthorized);
        }
        // Owner stays administered by Owner, otherwise it could be locked out
        if role == Role::Owner && admin_role != Role::Owner {
            self.env().revert(VaultError::InvalidParameter);
        }
        self.role_admin.set(&role, admin_role);
    }

    // ========== Internal Functions ==========

    fn set_role_internal(&mut self, role: Role, account: Address, value: bool) {
        let had_role = self.roles.get(&(role, account)).unwrap_or(false);

        self.roles.set(&(role, account), value);

        // Update count
        let current_count = self.role_count.get(&role).unwrap_or(0);
        if value && !had_role {
            self.role_count.set(&role, current_count + 1);
        } else if !value && had_role && current_count > 0 {
            self.role_count.set(&role, current_count - 1);
        }
    }

    fn require_role_admin(&self, role: Role) {
        let admin_role = self.get_role_admin(role);
        if !self.caller_has_role(admin_role) {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn require_not_last_owner(&self, role: Role) {
        if role == Role::Owner && self.get_role_member_count(Role::Owner) <= 1 {
            self.env().revert(VaultError::InvalidParameter);
        }
    }
}
