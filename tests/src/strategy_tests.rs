//! Strategy registry and dispatch scenarios.

use odra::casper_types::bytesrepr::Bytes;
use odra::casper_types::U256;
use odra::host::{Deployer, HostRef};
use odra::prelude::*;
use pretty_assertions::assert_eq;
use yield_vault_contracts::delegation_strategy::{
    encode_payload, DelegationStrategy, DelegationStrategyHostRef, DelegationStrategyInitArgs,
    DEFAULT_VALIDATOR_PUBKEY,
};
use yield_vault_contracts::errors::VaultError;
use yield_vault_contracts::events::{HarvestFailed, StrategyRemoved};

use crate::fixture::{units, Fixture};
use crate::mocks::{FaultyStrategy, FaultyStrategyHostRef, FaultyStrategyInitArgs};

const OTHER_VALIDATOR: &str = "0203a2e4c3ad1e7b7f8fb64ed4b7d53d2ecb2fc4d1c4b7b8a9e0a2b1d9c8e7f6a5b4";

fn delegation_strategy(fixture: &mut Fixture) -> DelegationStrategyHostRef {
    fixture.env.set_caller(fixture.owner);
    let strategy = DelegationStrategy::deploy(
        &fixture.env,
        DelegationStrategyInitArgs {
            vault: fixture.vault_address(),
            asset: fixture.token_address(),
            default_validator: None,
        },
    );

    fixture.env.set_caller(fixture.manager);
    fixture.vault.add_strategy(strategy.address().clone());
    strategy
}

fn faulty_strategy(fixture: &mut Fixture) -> FaultyStrategyHostRef {
    fixture.env.set_caller(fixture.owner);
    let strategy = FaultyStrategy::deploy(
        &fixture.env,
        FaultyStrategyInitArgs {
            vault: fixture.vault_address(),
            asset: fixture.token_address(),
        },
    );

    fixture.env.set_caller(fixture.manager);
    fixture.vault.add_strategy(strategy.address().clone());
    strategy
}

// ===== Registry =====

#[test]
fn test_add_strategy_registers_entry() {
    let mut fixture = Fixture::new();
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    assert_eq!(fixture.vault.strategies(), vec![identity]);
    let entry = fixture.vault.strategy(identity).unwrap();
    assert!(entry.active);
    assert_eq!(entry.principal, U256::zero());
    assert_eq!(fixture.vault.status().strategy_count, 1);

    assert_eq!(
        fixture.vault.try_add_strategy(identity),
        Err(VaultError::DuplicateStrategy.into())
    );
}

#[test]
fn test_readded_strategy_moves_to_the_end() {
    let mut fixture = Fixture::new();
    let first = delegation_strategy(&mut fixture).address().clone();
    let second = faulty_strategy(&mut fixture).address().clone();
    assert_eq!(fixture.vault.strategies(), vec![first, second]);

    fixture.env.set_caller(fixture.manager);
    fixture.vault.remove_strategy(first);
    assert_eq!(fixture.vault.strategies(), vec![second]);
    assert_eq!(fixture.vault.status().strategy_count, 1);

    fixture.vault.add_strategy(first);
    assert_eq!(fixture.vault.strategies(), vec![second, first]);
    assert_eq!(fixture.vault.status().strategy_count, 2);
}

#[test]
fn test_unknown_strategy_rejected() {
    let mut fixture = Fixture::new();
    let stranger = fixture.bob;

    fixture.env.set_caller(fixture.manager);
    assert_eq!(
        fixture.vault.try_remove_strategy(stranger),
        Err(VaultError::UnknownStrategy.into())
    );

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture.vault.try_harvest_strategy(stranger, Bytes::new()),
        Err(VaultError::UnknownStrategy.into())
    );
}

#[test]
fn test_strategy_lifecycle_scenario() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture
        .vault
        .deposit_to_strategy(identity, units(200), encode_payload(DEFAULT_VALIDATOR_PUBKEY));

    assert_eq!(strategy.balance(), units(200));
    assert_eq!(fixture.vault.strategy_balance(identity), units(200));
    assert_eq!(strategy.delegated_to(String::from(DEFAULT_VALIDATOR_PUBKEY)), units(200));
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, units(200));

    fixture.env.set_caller(fixture.manager);
    assert_eq!(
        fixture.vault.try_remove_strategy(identity),
        Err(VaultError::StrategyNotEmpty.into())
    );

    fixture.env.set_caller(fixture.agent);
    let recovered = fixture.vault.emergency_exit_strategy(identity, Bytes::new());
    assert_eq!(recovered, units(200));
    assert_eq!(strategy.balance(), U256::zero());

    fixture.env.set_caller(fixture.manager);
    fixture.vault.remove_strategy(identity);
    assert!(fixture.vault.strategies().is_empty());
    assert!(fixture.vault.strategy(identity).is_none());
    assert_eq!(fixture.vault.total_assets(), units(1_000));
}

#[test]
fn test_round_trip_conserves_total_assets() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();
    let before = fixture.vault.total_assets();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(300), Bytes::new());
    assert_eq!(fixture.vault.total_assets(), before);
    assert_eq!(fixture.vault_holdings(), units(700));

    fixture.vault.emergency_exit_strategy(identity, Bytes::new());
    assert_eq!(fixture.vault.total_assets(), before);
    assert_eq!(fixture.vault_holdings(), units(1_000));
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, U256::zero());
}

#[test]
fn test_emergency_exit_drains_every_validator() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(100), Bytes::new());
    fixture
        .vault
        .deposit_to_strategy(identity, units(150), encode_payload(OTHER_VALIDATOR));
    assert_eq!(strategy.validators().len(), 2);
    assert_eq!(strategy.total_delegated(), units(250));

    fixture.vault.emergency_exit_strategy(identity, Bytes::new());
    assert!(strategy.validators().is_empty());
    assert_eq!(strategy.delegated_to(String::from(OTHER_VALIDATOR)), U256::zero());
    assert_eq!(fixture.vault_holdings(), units(1_000));
}

#[test]
fn test_malformed_payload_fails_execution() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture
            .vault
            .try_deposit_to_strategy(identity, units(100), Bytes::from(vec![0xffu8, 0x01])),
        Err(VaultError::StakingFailed.into())
    );
    assert_eq!(fixture.vault_holdings(), units(1_000));
    assert_eq!(strategy.balance(), U256::zero());
}

#[test]
fn test_empty_validator_is_unknown() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture
            .vault
            .try_deposit_to_strategy(identity, units(100), encode_payload("")),
        Err(VaultError::UnknownValidator.into())
    );
    assert_eq!(fixture.vault_holdings(), units(1_000));
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, U256::zero());
}

// ===== Harvest =====

#[test]
fn test_harvest_credits_measured_rewards() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(500), Bytes::new());

    // staking rewards land on the adapter
    fixture.env.set_caller(fixture.owner);
    fixture.token.mint(identity, units(12));

    fixture.env.set_caller(fixture.agent);
    let proceeds = fixture.vault.harvest_strategy(identity, Bytes::new());

    assert_eq!(proceeds, units(12));
    assert_eq!(fixture.vault.total_assets(), units(1_012));
    assert_eq!(fixture.vault_holdings(), units(512));
    assert_eq!(strategy.balance(), units(500));
    let entry = fixture.vault.strategy(identity).unwrap();
    assert_eq!(entry.total_harvested, units(12));
    assert_eq!(entry.principal, units(500));
}

#[test]
fn test_harvest_failure_is_not_fatal() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let mut strategy = faulty_strategy(&mut fixture);
    let identity = strategy.address().clone();
    strategy.set_fail_harvest(true);

    fixture.env.set_caller(fixture.agent);
    let proceeds = fixture.vault.harvest_strategy(identity, Bytes::new());

    assert_eq!(proceeds, U256::zero());
    assert_eq!(fixture.vault.total_assets(), units(1_000));
    assert!(fixture.env.emitted_event(
        &fixture.vault,
        HarvestFailed {
            strategy: identity,
            reason: String::from("validator rewards unavailable"),
        }
    ));

    // the vault keeps working afterwards
    fixture.env.set_caller(alice);
    fixture.vault.withdraw(units(100), alice, alice);
    assert_eq!(fixture.token.balance_of(alice), units(99));
}

// ===== Adapter Failures =====

#[test]
fn test_refused_execute_reverts_dispatch() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let mut strategy = faulty_strategy(&mut fixture);
    let identity = strategy.address().clone();
    strategy.set_refuse_execute(true);

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture.vault.try_deposit_to_strategy(identity, units(100), Bytes::new()),
        Err(VaultError::StrategyExecutionFailed.into())
    );
    assert_eq!(fixture.vault_holdings(), units(1_000));
    assert_eq!(strategy.balance(), U256::zero());
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, U256::zero());
}

#[test]
fn test_stuck_exit_is_fatal() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let mut strategy = faulty_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(100), Bytes::new());

    fixture.env.set_caller(fixture.owner);
    strategy.set_stuck_on_exit(true);

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        fixture.vault.try_emergency_exit_strategy(identity, Bytes::new()),
        Err(VaultError::UnstakingFailed.into())
    );
    assert_eq!(fixture.vault.strategy(identity).unwrap().principal, units(100));
    assert_eq!(fixture.vault.total_assets(), units(1_000));
}

#[test]
fn test_lossy_exit_debits_shortfall() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let mut strategy = faulty_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(200), Bytes::new());

    fixture.env.set_caller(fixture.owner);
    strategy.set_exit_loss(units(50));

    fixture.env.set_caller(fixture.agent);
    let recovered = fixture.vault.emergency_exit_strategy(identity, Bytes::new());

    assert_eq!(recovered, units(150));
    assert_eq!(fixture.vault.total_assets(), units(950));
    assert_eq!(fixture.vault_holdings(), units(950));
}

#[test]
fn test_removing_drained_strategy_writes_off_principal() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    let bob = fixture.bob;
    fixture.deposit(alice, units(1_000));
    let mut strategy = faulty_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(200), Bytes::new());

    // slashed: the adapter ends up empty with principal still on the books
    strategy.leak(bob);
    assert_eq!(strategy.balance(), U256::zero());

    fixture.env.set_caller(fixture.manager);
    fixture.vault.remove_strategy(identity);

    assert_eq!(fixture.vault.total_assets(), units(800));
    assert!(fixture.vault.strategy(identity).is_none());
    assert!(fixture.env.emitted_event(
        &fixture.vault,
        StrategyRemoved {
            strategy: identity,
            written_off: units(200),
        }
    ));
}

#[test]
fn test_surplus_on_exit_is_credited() {
    let mut fixture = Fixture::new();
    let alice = fixture.alice;
    fixture.deposit(alice, units(1_000));
    let strategy = delegation_strategy(&mut fixture);
    let identity = strategy.address().clone();

    fixture.env.set_caller(fixture.agent);
    fixture.vault.deposit_to_strategy(identity, units(200), Bytes::new());

    fixture.env.set_caller(fixture.owner);
    fixture.token.mint(identity, units(3));

    fixture.env.set_caller(fixture.agent);
    let recovered = fixture.vault.emergency_exit_strategy(identity, Bytes::new());
    assert_eq!(recovered, units(203));
    assert_eq!(fixture.vault.total_assets(), units(1_003));
}

#[test]
fn test_adapter_rejects_direct_calls() {
    let mut fixture = Fixture::new();
    let mut strategy = delegation_strategy(&mut fixture);

    fixture.env.set_caller(fixture.agent);
    assert_eq!(
        strategy.try_emergency_exit(Bytes::new()),
        Err(VaultError::Unauthorized.into())
    );
}
