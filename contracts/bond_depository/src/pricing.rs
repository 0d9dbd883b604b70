//! Bond pricing engine.
//!
//! The price follows the debt ratio: the more protocol tokens are still owed
//! to bonders relative to supply, the more expensive the next bond. Debt
//! decays linearly over one vesting term and the control variable can drift
//! toward a target through a scheduled adjustment.

use crate::math;
use crate::types::{Adjustment, BondTerms};
use protocol_errors::ContractError;

/// A price of `PRICE_PRECISION` sells one protocol token for one protocol
/// token of principal value.
pub const PRICE_PRECISION: i128 = 100_000;

/// Scaling of `debt_ratio`.
pub const DEBT_RATIO_PRECISION: i128 = 1_000_000_000;

/// `control_variable * debt_ratio / CONTROL_VARIABLE_SCALE` is a price.
pub const CONTROL_VARIABLE_SCALE: i128 = 10_000_000;

pub const MAX_PAYOUT_DENOMINATOR: i128 = 100_000;
/// 1% of supply.
pub const MAX_PAYOUT_CAP: i128 = 1_000;

pub const FEE_DENOMINATOR: i128 = 1_000_000;
/// 10% of the payout.
pub const FEE_CAP: i128 = 100_000;

pub const TITHE_DENOMINATOR: i128 = 1_000_000;
/// 10% of the principal.
pub const TITHE_CAP: i128 = 100_000;

/// Smallest payout worth recording: 0.01 protocol token.
pub const MIN_BOND_PAYOUT: i128 = 10_000_000;

pub const MIN_VESTING_TERM: u64 = 10_000;

/// An adjustment step may not exceed 2.5% of the control variable.
pub const MAX_ADJUSTMENT_PER_MILLE: i128 = 25;

/// `debt * 1e9 / supply`; zero before any supply exists.
pub fn debt_ratio(debt: i128, supply: i128) -> Result<i128, ContractError> {
    if supply <= 0 {
        return Ok(0);
    }
    math::mul_div(debt, DEBT_RATIO_PRECISION, supply)
}

/// `max(minimum_price, control_variable * debt_ratio)`.
pub fn bond_price(terms: &BondTerms, debt_ratio: i128) -> Result<i128, ContractError> {
    let price = math::mul_div(terms.control_variable, debt_ratio, CONTROL_VARIABLE_SCALE)?;
    Ok(price.max(terms.minimum_price))
}

/// Protocol tokens bought with `value` at `price`.
pub fn payout_for(value: i128, price: i128) -> Result<i128, ContractError> {
    math::mul_div(value, PRICE_PRECISION, price)
}

pub fn max_payout(terms: &BondTerms, supply: i128) -> Result<i128, ContractError> {
    math::mul_div(supply, terms.max_payout, MAX_PAYOUT_DENOMINATOR)
}

pub fn fee_for(terms: &BondTerms, payout: i128) -> Result<i128, ContractError> {
    math::mul_div(payout, terms.fee, FEE_DENOMINATOR)
}

/// Principal routed to the tithe recipient out of a deposit of `amount`.
pub fn tithe_for(terms: &BondTerms, amount: i128) -> Result<i128, ContractError> {
    math::mul_div(amount, terms.tithe, TITHE_DENOMINATOR)
}

/// Debt that has decayed `elapsed` seconds after the last realization,
/// clamped to the outstanding debt.
pub fn debt_decay(total_debt: i128, elapsed: u64, vesting_term: u64) -> Result<i128, ContractError> {
    if vesting_term == 0 {
        return Ok(total_debt);
    }
    let decay = math::mul_div(total_debt, i128::from(elapsed), i128::from(vesting_term))?;
    Ok(decay.min(total_debt))
}

/// Largest increment `set_adjustment` accepts for `control_variable`.
pub fn max_adjustment(control_variable: i128) -> Result<i128, ContractError> {
    math::mul_div(control_variable, MAX_ADJUSTMENT_PER_MILLE, 1_000)
}

impl Adjustment {
    /// Whether `add` moves `control_variable` toward `target`.
    pub fn points_toward(add: bool, control_variable: i128, target: i128) -> bool {
        if add {
            control_variable < target
        } else {
            control_variable > target
        }
    }

    /// Apply one step if the adjustment is active and its buffer has passed.
    /// The control variable moves at most one increment toward `target` and
    /// never crosses it; reaching it deactivates the adjustment. A control
    /// variable already at or past the target deactivates it without a move.
    /// Returns the new control variable when it changed.
    pub fn apply(&mut self, control_variable: i128, now: u64) -> Result<Option<i128>, ContractError> {
        if !self.active || math::elapsed(now, self.last_time) < self.buffer {
            return Ok(None);
        }
        if !Self::points_toward(self.add, control_variable, self.target) {
            self.active = false;
            return Ok(None);
        }
        let next = if self.add {
            math::add(control_variable, self.increment)?.min(self.target)
        } else {
            math::sub(control_variable, self.increment)?.max(self.target)
        };
        if next == self.target {
            self.active = false;
        }
        self.last_time = now;
        Ok(Some(next))
    }
}
