//! Yield math for time-based accrual.
//!
//! - Linear accrual for horizons shorter than a week
//! - Continuous compounding via a truncated Taylor series of `e^x`
//! - Rate and fee bounds
//!
//! All arithmetic is integer fixed-point at 1e18 and checked; an overflow
//! surfaces as [`VaultError::ArithmeticOverflow`] instead of wrapping or
//! saturating.

use odra::casper_types::U256;
use crate::errors::VaultError;

/// Seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Basis points scale (100% = 10000 bps)
pub const BPS_SCALE: u64 = 10_000;

/// Internal precision scale (1e18)
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Horizon below which accrual is linear (7 days)
pub const LINEAR_HORIZON_SECONDS: u64 = 604_800;

/// Maximum annual yield rate (20%)
pub const MAX_YIELD_RATE_BPS: u32 = 2_000;

/// Maximum withdrawal fee (10%)
pub const MAX_WITHDRAWAL_FEE_BPS: u32 = 1_000;

/// Number of Taylor terms after the constant one
pub const COMPOUND_TERMS: u64 = 20;

/// Upper bound on the exponent `x` (2.0 at 1e18 scale)
pub const MAX_EXPONENT: u64 = 2 * PRECISION;

fn overflow() -> VaultError {
    VaultError::ArithmeticOverflow
}

/// `a * b / denominator`, rounded down.
pub fn mul_div_down(a: U256, b: U256, denominator: U256) -> Result<U256, VaultError> {
    if denominator.is_zero() {
        return Err(VaultError::InvalidParameter);
    }
    let product = a.checked_mul(b).ok_or_else(overflow)?;
    Ok(product / denominator)
}

/// `a * b / denominator`, rounded up.
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, VaultError> {
    if denominator.is_zero() {
        return Err(VaultError::InvalidParameter);
    }
    let product = a.checked_mul(b).ok_or_else(overflow)?;
    let quotient = product / denominator;
    if (product % denominator).is_zero() {
        Ok(quotient)
    } else {
        quotient.checked_add(U256::one()).ok_or_else(overflow)
    }
}

/// Simple interest: `principal * rate_bps * elapsed / (BPS_SCALE * SECONDS_PER_YEAR)`.
pub fn linear_yield(principal: U256, rate_bps: u32, elapsed_seconds: u64) -> Result<U256, VaultError> {
    if principal.is_zero() || rate_bps == 0 || elapsed_seconds == 0 {
        return Ok(U256::zero());
    }

    let numerator = principal
        .checked_mul(U256::from(rate_bps))
        .and_then(|v| v.checked_mul(U256::from(elapsed_seconds)))
        .ok_or_else(overflow)?;

    Ok(numerator / (U256::from(BPS_SCALE) * U256::from(SECONDS_PER_YEAR)))
}

/// Exponent `x = rate_bps / BPS_SCALE * elapsed / SECONDS_PER_YEAR` at 1e18
/// scale, clamped to [`MAX_EXPONENT`].
pub fn exponent(rate_bps: u32, elapsed_seconds: u64) -> Result<U256, VaultError> {
    let x = U256::from(rate_bps)
        .checked_mul(U256::from(elapsed_seconds))
        .and_then(|v| v.checked_mul(U256::from(PRECISION)))
        .ok_or_else(overflow)?
        / (U256::from(BPS_SCALE) * U256::from(SECONDS_PER_YEAR));

    Ok(x.min(U256::from(MAX_EXPONENT)))
}

/// `e^x - 1` at 1e18 scale, for `x` at 1e18 scale.
///
/// Each term is derived from the previous one (`t_n = t_{n-1} * x / n`), so
/// the expansion never materialises `x^n` or `n!`.
pub fn exp_minus_one(x: U256) -> Result<U256, VaultError> {
    let scale = U256::from(PRECISION);
    let mut term = scale;
    let mut sum = U256::zero();

    for n in 1..=COMPOUND_TERMS {
        term = term
            .checked_mul(x)
            .ok_or_else(overflow)?
            / (scale * U256::from(n));
        if term.is_zero() {
            break;
        }
        sum = sum.checked_add(term).ok_or_else(overflow)?;
    }

    Ok(sum)
}

/// Continuously compounded yield: `principal * (e^(r*t) - 1)`.
pub fn compound_yield(principal: U256, rate_bps: u32, elapsed_seconds: u64) -> Result<U256, VaultError> {
    if principal.is_zero() || rate_bps == 0 || elapsed_seconds == 0 {
        return Ok(U256::zero());
    }

    let growth = exp_minus_one(exponent(rate_bps, elapsed_seconds)?)?;
    mul_div_down(principal, growth, U256::from(PRECISION))
}

/// Yield accrued on `principal` over `elapsed_seconds`.
///
/// Below [`LINEAR_HORIZON_SECONDS`] this is [`linear_yield`]. At and beyond
/// it, the first horizon accrues linearly and the grown balance compounds
/// for the remainder, so the two regimes meet at the switchover.
pub fn accrued_yield(principal: U256, rate_bps: u32, elapsed_seconds: u64) -> Result<U256, VaultError> {
    if elapsed_seconds < LINEAR_HORIZON_SECONDS {
        return linear_yield(principal, rate_bps, elapsed_seconds);
    }

    let head = linear_yield(principal, rate_bps, LINEAR_HORIZON_SECONDS)?;
    let grown = principal.checked_add(head).ok_or_else(overflow)?;
    let tail = compound_yield(grown, rate_bps, elapsed_seconds - LINEAR_HORIZON_SECONDS)?;

    head.checked_add(tail).ok_or_else(overflow)
}

/// Reject yield rates above [`MAX_YIELD_RATE_BPS`].
pub fn validate_rate(rate_bps: u32) -> Result<(), VaultError> {
    if rate_bps > MAX_YIELD_RATE_BPS {
        return Err(VaultError::InvalidParameter);
    }
    Ok(())
}

/// Reject withdrawal fees above [`MAX_WITHDRAWAL_FEE_BPS`].
pub fn validate_fee(fee_bps: u32) -> Result<(), VaultError> {
    if fee_bps > MAX_WITHDRAWAL_FEE_BPS {
        return Err(VaultError::InvalidParameter);
    }
    Ok(())
}
