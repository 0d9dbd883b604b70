//! Overflow-safe arithmetic helpers for bond pricing.
//!
//! All functions use checked arithmetic and report overflow, underflow and
//! division by zero as `ContractError`s instead of trapping.

use protocol_errors::ContractError;

#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

#[inline]
pub fn mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn div(a: i128, b: i128) -> Result<i128, ContractError> {
    if b == 0 {
        return Err(ContractError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ContractError::Overflow)
}

/// `a * b / c`, rounded down.
#[inline]
pub fn mul_div(a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    div(mul(a, b)?, c)
}

/// Seconds elapsed since `since`, zero if `since` lies in the future.
#[inline]
pub fn elapsed(now: u64, since: u64) -> u64 {
    now.saturating_sub(since)
}
