//! Per-depositor bond records.
//!
//! A bond vests linearly: after `elapsed` of its `vesting` seconds the
//! holder may redeem `payout * elapsed / vesting`. A partial redeem pays the
//! vested part and restarts the clock on what is left, so the remainder keeps
//! vesting at the same pace toward the same end time.
//!
//! A top-up first moves whatever already vested into `claimable`, then
//! vests the unvested remainder together with the new payout over a full
//! term. No unit ever becomes redeemable earlier than it would if the holder
//! had redeemed before bonding again.

use crate::math;
use crate::types::BondInfo;
use protocol_errors::ContractError;

/// Basis points; `percent_vested` of 10 000 means fully vested.
pub const PERCENT_VESTED_PRECISION: i128 = 10_000;

/// Result of a redeem against a bond record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redemption {
    pub paid: i128,
    /// Record to keep, `None` once nothing is owed.
    pub remaining: Option<BondInfo>,
}

/// Share of the vesting payout vested at `now`, in basis points, capped at
/// 100%.
pub fn percent_vested(bond: &BondInfo, now: u64) -> i128 {
    if bond.vesting == 0 {
        return PERCENT_VESTED_PRECISION;
    }
    let elapsed = i128::from(math::elapsed(now, bond.last_time));
    (elapsed * PERCENT_VESTED_PRECISION / i128::from(bond.vesting)).min(PERCENT_VESTED_PRECISION)
}

/// Part of `bond.payout` vested at `now`, rounded down.
fn vested_amount(bond: &BondInfo, now: u64) -> Result<i128, ContractError> {
    let elapsed = math::elapsed(now, bond.last_time);
    if elapsed >= bond.vesting {
        return Ok(bond.payout);
    }
    math::mul_div(bond.payout, i128::from(elapsed), i128::from(bond.vesting))
}

/// Protocol tokens redeemable at `now`.
pub fn pending_payout(bond: &BondInfo, now: u64) -> Result<i128, ContractError> {
    math::add(bond.claimable, vested_amount(bond, now)?)
}

/// Record a new payout of `payout` vesting over `term`.
pub fn record_deposit(
    existing: Option<BondInfo>,
    payout: i128,
    term: u64,
    price: i128,
    now: u64,
) -> Result<BondInfo, ContractError> {
    let Some(old) = existing else {
        return Ok(BondInfo {
            payout,
            claimable: 0,
            vesting: term,
            last_time: now,
            price_paid: price,
        });
    };

    let vested = vested_amount(&old, now)?;
    let unvested = math::sub(old.payout, vested)?;
    Ok(BondInfo {
        payout: math::add(unvested, payout)?,
        claimable: math::add(old.claimable, vested)?,
        vesting: term,
        last_time: now,
        price_paid: price,
    })
}

/// Redeem whatever has vested at `now`. Nothing redeemable yet pays 0 and
/// keeps the record unchanged.
pub fn redeem(bond: &BondInfo, now: u64) -> Result<Redemption, ContractError> {
    let vested = vested_amount(bond, now)?;
    let paid = math::add(bond.claimable, vested)?;
    if vested == bond.payout {
        return Ok(Redemption {
            paid,
            remaining: None,
        });
    }
    if paid == 0 {
        return Ok(Redemption {
            paid,
            remaining: Some(bond.clone()),
        });
    }

    let elapsed = math::elapsed(now, bond.last_time);
    Ok(Redemption {
        paid,
        remaining: Some(BondInfo {
            payout: math::sub(bond.payout, vested)?,
            claimable: 0,
            vesting: bond.vesting - elapsed,
            last_time: now,
            price_paid: bond.price_paid,
        }),
    })
}
