//! Index-continuous migration.
//!
//! A successor instance does not inherit the deprecated instance's gons; it
//! starts a fresh ledger whose index is seeded from the closed-form
//! compounding formula `base_index * (1 + rate)^(epoch - first_epoch)`.
//! The seed must agree with the index the deprecated instance reports at the
//! same epoch to within one part in 10^9.

use crate::rebase_index::INDEX_PRECISION;
use crate::types::MigrationSnapshot;
use protocol_errors::ContractError;
use soroban_sdk::{Env, U256};

/// Fixed-point scale used while compounding.
const WAD: u128 = 1_000_000_000_000_000_000;

/// Reward rates are in millionths.
pub const RATE_DENOMINATOR: u128 = 1_000_000;

/// Allowed relative gap between the seeded and the observed index.
pub const CONTINUITY_TOLERANCE: u128 = INDEX_PRECISION;

/// Oldest generation a successor can carry; generation 1 is the original
/// deployment.
pub const MIN_SUCCESSOR_VERSION: u32 = 2;

/// `base_index * (1 + rate / 1e6)^epochs`, rounded down.
pub fn compound_index(
    e: &Env,
    base_index: u128,
    rate: u32,
    epochs: u32,
) -> Result<u128, ContractError> {
    if u128::from(rate) > RATE_DENOMINATOR {
        return Err(ContractError::InvalidRate);
    }
    let wad = U256::from_u128(e, WAD);
    let mut factor = U256::from_u128(e, WAD + u128::from(rate) * (WAD / RATE_DENOMINATOR));
    let mut acc = wad.clone();
    let mut n = epochs;
    // Square-and-multiply; the last squaring is skipped so the factor never
    // grows past the result.
    while n > 0 {
        if n & 1 == 1 {
            acc = acc.mul(&factor).div(&wad);
        }
        n >>= 1;
        if n > 0 {
            factor = factor.mul(&factor).div(&wad);
        }
    }
    U256::from_u128(e, base_index)
        .mul(&acc)
        .div(&wad)
        .to_u128()
        .ok_or(ContractError::Overflow)
}

/// `|a - b| <= max(a, b) / 10^9`.
pub fn within_tolerance(a: u128, b: u128) -> bool {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    (hi - lo).saturating_mul(CONTINUITY_TOLERANCE) <= hi
}

/// Validate `snapshot` against the predecessor's `observed_index` at
/// `observed_epoch` and derive the successor's starting index.
pub fn seed_index(
    e: &Env,
    snapshot: &MigrationSnapshot,
    observed_index: i128,
    observed_epoch: u32,
) -> Result<u128, ContractError> {
    if snapshot.version < MIN_SUCCESSOR_VERSION
        || snapshot.base_index <= 0
        || snapshot.first_epoch > snapshot.epoch.number
        || snapshot.epoch.length == 0
        || snapshot.epoch.number != observed_epoch
    {
        return Err(ContractError::InvalidSnapshot);
    }
    let base = u128::try_from(snapshot.base_index).map_err(|_| ContractError::InvalidSnapshot)?;
    let seeded = compound_index(
        e,
        base,
        snapshot.reward_rate,
        snapshot.epoch.number - snapshot.first_epoch,
    )?;

    let observed = u128::try_from(observed_index).map_err(|_| ContractError::InvalidSnapshot)?;
    if !within_tolerance(seeded, observed) {
        return Err(ContractError::IndexDiscontinuity);
    }
    Ok(seeded)
}
