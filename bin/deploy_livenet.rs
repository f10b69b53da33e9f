//! Deploy the yield vault to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!
//! Optional vault parameters (defaults in parentheses):
//!   VAULT_ASSET=hash-...            (deploy a fresh AssetToken)
//!   VAULT_NAME=...                  ("Yield Vault CSPR")
//!   VAULT_SYMBOL=...                ("yvCSPR")
//!   VAULT_WITHDRAWAL_FEE_BPS=...    (100)
//!   VAULT_YIELD_RATE_BPS=...        (500)
//!   VAULT_TREASURY / VAULT_MANAGER / VAULT_AGENT / VAULT_PAUSER  (deployer)
//!   VAULT_VALIDATOR=...             (DelegationStrategy default validator)

use std::str::FromStr;

use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv};
use odra::prelude::*;

use yield_vault_contracts::access_control::{AccessControl, AccessControlInitArgs};
use yield_vault_contracts::asset_token::{AssetToken, AssetTokenInitArgs};
use yield_vault_contracts::delegation_strategy::{DelegationStrategy, DelegationStrategyInitArgs};
use yield_vault_contracts::types::Role;
use yield_vault_contracts::vault::{YieldVault, YieldVaultInitArgs};

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u32(key: &str, default: u32) -> u32 {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{} is not a valid u32: {}", key, value)),
        Err(_) => default,
    }
}

fn env_address(key: &str, default: Address) -> Address {
    match std::env::var(key) {
        Ok(value) => Address::from_str(&value)
            .unwrap_or_else(|_| panic!("{} is not a valid address: {}", key, value)),
        Err(_) => default,
    }
}

fn deploy_asset(env: &HostEnv, deployer: Address) -> Address {
    println!("Deploying AssetToken...");
    let mut token = AssetToken::deploy(
        env,
        AssetTokenInitArgs {
            name: String::from("Wrapped CSPR"),
            symbol: String::from("WCSPR"),
            decimals: 9,
            admin: deployer,
        },
    );
    // Seed the deployer so the vault can be exercised right away
    let seed = U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(9u64));
    token.mint(deployer, seed);
    let token_addr = token.address().clone();
    println!("AssetToken deployed at: {:?}", token_addr);
    token_addr
}

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== Yield Vault Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    // Get deployer address
    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // Vault parameters
    let name = env_string("VAULT_NAME", "Yield Vault CSPR");
    let symbol = env_string("VAULT_SYMBOL", "yvCSPR");
    let withdrawal_fee_bps = env_u32("VAULT_WITHDRAWAL_FEE_BPS", 100); // 1%
    let yield_rate_bps = env_u32("VAULT_YIELD_RATE_BPS", 500); // 5% APR
    let treasury = env_address("VAULT_TREASURY", deployer);
    let manager = env_address("VAULT_MANAGER", deployer);
    let agent = env_address("VAULT_AGENT", deployer);
    let pauser = env_address("VAULT_PAUSER", deployer);
    let validator = std::env::var("VAULT_VALIDATOR").ok();

    // ==================== Phase 1: Collaborators ====================
    println!("=== Phase 1: Deploying Collaborators ===");
    println!();

    // 1. Base asset
    let asset_addr = match std::env::var("VAULT_ASSET") {
        Ok(_) => {
            let asset_addr = env_address("VAULT_ASSET", deployer);
            println!("Using existing asset at: {:?}", asset_addr);
            asset_addr
        }
        Err(_) => deploy_asset(&env, deployer),
    };

    // 2. AccessControl
    println!("Deploying AccessControl...");
    let access_control = AccessControl::deploy(
        &env,
        AccessControlInitArgs {
            owner: deployer,
            manager,
            agent,
            pauser,
        },
    );
    let access_control_addr = access_control.address().clone();
    println!("AccessControl deployed at: {:?}", access_control_addr);

    println!();

    // ==================== Phase 2: Vault ====================
    println!("=== Phase 2: Deploying Vault ===");
    println!();

    // 3. YieldVault
    println!("Deploying YieldVault...");
    let mut vault = YieldVault::deploy(
        &env,
        YieldVaultInitArgs {
            asset: asset_addr,
            name,
            symbol,
            access_control: access_control_addr,
            manager,
            agent,
            treasury,
            withdrawal_fee_bps,
            yield_rate_bps,
        },
    );
    let vault_addr = vault.address().clone();
    println!("YieldVault deployed at: {:?}", vault_addr);

    // 4. DelegationStrategy
    println!("Deploying DelegationStrategy...");
    let strategy = DelegationStrategy::deploy(
        &env,
        DelegationStrategyInitArgs {
            vault: vault_addr,
            asset: asset_addr,
            default_validator: validator,
        },
    );
    let strategy_addr = strategy.address().clone();
    println!("DelegationStrategy deployed at: {:?}", strategy_addr);

    println!();

    // ==================== Phase 3: Configuration ====================
    println!("=== Phase 3: Configuration ===");
    println!();

    if access_control.has_role(Role::Manager, deployer) {
        println!("Registering DelegationStrategy...");
        vault.add_strategy(strategy_addr);
        println!("Done.");
    } else {
        println!("Deployer is not a manager; register {:?} from the manager account.", strategy_addr);
    }

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  Asset:              {:?}", asset_addr);
    println!("  AccessControl:      {:?}", access_control_addr);
    println!("  YieldVault:         {:?}", vault_addr);
    println!("  DelegationStrategy: {:?}", strategy_addr);
    println!();
    println!("Parameters:");
    println!("  Withdrawal fee:     {} bps", vault.withdrawal_fee_bps());
    println!("  Yield rate:         {} bps", vault.yield_rate_bps());
    println!("  Treasury:           {:?}", vault.treasury());
}
