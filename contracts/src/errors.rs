//! Vault error definitions.

use odra::prelude::*;

/// Vault errors.
///
/// Codes are grouped by concern so a caller can tell a retryable adapter
/// failure from a bad parameter or a missing capability by range alone.
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VaultError {
    // Validation errors (1xx)
    InvalidParameter = 100,
    ZeroShares = 101,

    // Authorization errors (2xx)
    Unauthorized = 200,
    InsufficientAllowance = 201,

    // Accounting errors (3xx)
    InsufficientBalance = 300,

    // Arithmetic errors (4xx)
    ArithmeticOverflow = 400,

    // Concurrency errors (5xx)
    ReentrancyBlocked = 500,

    // Registry errors (6xx)
    DuplicateStrategy = 600,
    UnknownStrategy = 601,
    StrategyNotEmpty = 602,

    // Strategy adapter errors (7xx)
    StrategyExecutionFailed = 700,
    UnstakingFailed = 701,
    StakingFailed = 702,
    UnknownValidator = 703,

    // Lifecycle errors (8xx)
    VaultPaused = 800,
    NotInitialized = 801,

    // Ledger errors (9xx)
    TokenTransferFailed = 900,
    FeeSweepFailed = 901,
}

impl VaultError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Validation
            VaultError::InvalidParameter => "Invalid parameter",
            VaultError::ZeroShares => "Operation would mint or burn zero shares",

            // Authorization
            VaultError::Unauthorized => "Unauthorized: caller lacks the required role",
            VaultError::InsufficientAllowance => "Insufficient allowance",

            // Accounting
            VaultError::InsufficientBalance => "Insufficient balance",

            // Arithmetic
            VaultError::ArithmeticOverflow => "Arithmetic overflow",

            // Concurrency
            VaultError::ReentrancyBlocked => "Reentrant call blocked",

            // Registry
            VaultError::DuplicateStrategy => "Strategy already registered",
            VaultError::UnknownStrategy => "Strategy not registered",
            VaultError::StrategyNotEmpty => "Strategy still holds funds",

            // Strategy
            VaultError::StrategyExecutionFailed => "Strategy execution failed",
            VaultError::UnstakingFailed => "Strategy unstaking failed",
            VaultError::StakingFailed => "Strategy staking failed",
            VaultError::UnknownValidator => "Unknown validator",

            // Lifecycle
            VaultError::VaultPaused => "Operation blocked: vault paused",
            VaultError::NotInitialized => "Contract not initialized",

            // Ledger
            VaultError::TokenTransferFailed => "Token transfer failed",
            VaultError::FeeSweepFailed => "Fee transfer to treasury failed",
        }
    }

    /// Adapter-side failures are transient from the caller's point of view.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            VaultError::StrategyExecutionFailed
                | VaultError::UnstakingFailed
                | VaultError::StakingFailed
                | VaultError::ReentrancyBlocked
        )
    }
}

impl core::fmt::Display for VaultError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<VaultError> for OdraError {
    fn from(error: VaultError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
