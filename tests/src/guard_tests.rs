//! Authorization, pause and re-entrance scenarios.

use odra::casper_types::bytesrepr::Bytes;
use odra::casper_types::U256;
use odra::host::{Deployer, HostRef};
use odra::prelude::*;
use pretty_assertions::assert_eq;
use yield_vault_contracts::delegation_strategy::{DelegationStrategy, DelegationStrategyInitArgs};
use yield_vault_contracts::errors::VaultError;
use yield_vault_contracts::types::Role;

use crate::fixture::{units, Fixture};
use crate::mocks::{ReentrantStrategy, ReentrantStrategyInitArgs};

// ===== Capabilities =====

#[test]
fn test_manager_only_operations() {
    let mut fixture = Fixture::new();
    let strategy = fixture.bob;

    for caller in [fixture.agent, fixture.pauser, fixture.alice] {
        fixture.env.set_caller(caller);
        assert_eq!(
            fixture.vault.try_add_strategy(strategy),
            Err(VaultError::Unauthorized.into())
        );
        assert_eq!(
            fixture.vault.try_set_yield_rate(100),
            Err(VaultError::Unauthorized.into())
        );
        assert_eq!(
            fixture.vault.try_set_withdrawal_fee(50),
            Err(VaultError::Unauthorized.into())
        );
    }

    fixture.env.set_caller(fixture.manager);
    fixture.vault.set_withdrawal_fee(50);
    assert_eq!(fixture.vault.withdrawal_fee_bps(), 50);
    assert_eq!(
        fixture.vault.try_set_withdrawal_fee(1_001),
        Err(VaultError::InvalidParameter.into())
    );
}

#[test]
fn test_agent_only_operations() {
    let mut fixture = Fixture::new();
    let strategy = fixture.bob;

    for caller in [fixture.manager, fixture.alice] {
        fixture.env.set_caller(caller);
        assert_eq!(
            fixture.vault.try_deposit_to_strategy(strategy, units(1), Bytes::new()),
            Err(VaultError::Unauthorized.into())
        );
        assert_eq!(
            fixture.vault.try_harvest_strategy(strategy, Bytes::new()),
            Err(VaultError::Unauthorized.into())
        );
        assert_eq!(
            fixture.vault.try_emergency_exit_strategy(strategy, Bytes::new()),
            Err(VaultError::Unauthorized.into())
        );
    }
}

#[test]
fn test_treasury_is_owner_managed() {
    let mut fixture = Fixture::new();
    let new_treasury = fixture.bob;

    fixture.env.set_caller(fixture.manager);
    assert_eq!(
        fixture.vault.try_set_treasury(new_treasury),
        Err(VaultError::Unauthorized.into())
    );

    fixture.env.set_caller(fixture.owner);
    fixture.vault.set_treasury(new_treasury);
    assert_eq!(fixture.vault.treasury(), new_treasury);
}

#[test]
fn test_granted_role_takes_effect() {
    let mut fixture = Fixture::new();
    let bob = fixture.bob;

    fixture.env.set_caller(fixture.owner);
    fixture.access_control.grant_role(Role::Pauser, bob);

    fixture.env.set_caller(bob);
    fixture.vault.pause();
    assert!(fixture.vault.is_paused());

    fixture.env.set_caller(fixture.owner);
    fixture.access_control.revoke_role(Role::Pauser, bob);

    fixture.env.set_caller(bob);
    assert_eq!(fixture.vault.try_unpause(), Err(VaultError::Unauthorized.into()));
}

// ===== Pause =====

#[test]
fn test_pause_blocks_inflows_only() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(100));
    fixture.fund(alice, units(10));

    fixture.env.set_caller(fixture.alice);
    assert_eq!(fixture.vault.try_pause(), Err(VaultError::Unauthorized.into()));

    fixture.env.set_caller(fixture.pauser);
    fixture.vault.pause();

    fixture.env.set_caller(alice);
    assert_eq!(
        fixture.vault.try_deposit(units(10), alice),
        Err(VaultError::VaultPaused.into())
    );
    assert_eq!(
        fixture.vault.try_mint(units(10), alice),
        Err(VaultError::VaultPaused.into())
    );

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture.vault.try_deposit_to_strategy(fixture.bob, units(1), Bytes::new()),
        Err(VaultError::VaultPaused.into())
    );

    // exits stay open
    fixture.env.set_caller(alice);
    fixture.vault.withdraw(units(50), alice, alice);
    fixture.vault.redeem(units(10), alice, alice);
    assert_eq!(fixture.vault.balance_of(alice), units(40));

    fixture.env.set_caller(fixture.pauser);
    fixture.vault.unpause();

    fixture.env.set_caller(alice);
    assert_eq!(fixture.vault.deposit(units(10), alice), units(10));
}

#[test]
fn test_pause_keeps_strategy_recovery_open() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));

    fixture.env.set_caller(fixture.owner);
    let strategy = DelegationStrategy::deploy(
        &fixture.env,
        DelegationStrategyInitArgs {
            vault: fixture.vault_address(),
            asset: fixture.token_address(),
            default_validator: None,
        },
    );
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.manager);
    fixture.vault.add_strategy(identity);

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(200), Bytes::new());

    fixture.env.set_caller(fixture.owner);
    fixture.token.mint(identity, units(5));

    fixture.env.set_caller(fixture.pauser);
    fixture.vault.pause();

    fixture.env.set_caller(fixture.agent);
    assert_eq!(fixture.vault.harvest_strategy(identity, Bytes::new()), units(5));
    assert_eq!(fixture.vault.emergency_exit_strategy(identity, Bytes::new()), units(200));
    assert_eq!(fixture.vault.total_assets(), units(1_005));
    assert_eq!(fixture.vault_holdings(), units(1_005));
    assert!(fixture.vault.is_paused());
}

// ===== Re-entrance =====

#[test]
fn test_reentrant_adapter_is_blocked() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));

    fixture.env.set_caller(fixture.owner);
    let strategy = ReentrantStrategy::deploy(
        &fixture.env,
        ReentrantStrategyInitArgs {
            vault: fixture.vault_address(),
        },
    );
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.manager);
    fixture.vault.add_strategy(identity);

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture.vault.try_deposit_to_strategy(identity, units(100), Bytes::new()),
        Err(VaultError::ReentrancyBlocked.into())
    );
    assert_eq!(
        fixture.vault.try_harvest_strategy(identity, Bytes::new()),
        Err(VaultError::ReentrancyBlocked.into())
    );
    assert_eq!(
        fixture.vault.try_emergency_exit_strategy(identity, Bytes::new()),
        Err(VaultError::ReentrancyBlocked.into())
    );

    // nothing leaked and the guard was released
    assert_eq!(fixture.vault_holdings(), units(1_000));
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, U256::zero());
    fixture.env.set_caller(alice);
    fixture.vault.withdraw(units(1), alice, alice);
}
