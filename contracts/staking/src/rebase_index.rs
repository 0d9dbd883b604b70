//! Gons/index accounting for the rebasing receipt token.
//!
//! Holders own a fixed number of gons. Their visible balance is
//! `gons / gons_per_fragment`; a rebase grows `total_supply` and shrinks
//! `gons_per_fragment`, so every balance grows by the same factor without
//! touching per-holder storage. The index is the visible value of a fixed
//! amount of gons (`index_gons`) and carries 9 decimals.
//!
//! Every rounding step favours the pool: `gons_per_fragment` rounds up, so
//! visible balances round down, and a rebase spreads profit over the
//! circulating balance rounded up. Holder balances never add up to more
//! than the tokens the pool received for them.

use protocol_errors::ContractError;
use soroban_sdk::{contracttype, Env, U256};

/// Index precision: an index of `INDEX_PRECISION` equals 1.0.
pub const INDEX_PRECISION: u128 = 1_000_000_000;

pub const INITIAL_FRAGMENTS_SUPPLY: u128 = 5_000_000 * INDEX_PRECISION;

/// Largest multiple of `INITIAL_FRAGMENTS_SUPPLY` that fits in a `u128`, so
/// the initial `gons_per_fragment` is exact.
pub const TOTAL_GONS: u128 = u128::MAX - (u128::MAX % INITIAL_FRAGMENTS_SUPPLY);

pub const MAX_SUPPLY: u128 = 1_000_000_000_000_000_000_000_000_000_000;

/// `TOTAL_GONS / supply`, rounded up.
fn gons_per_fragment_for(supply: u128) -> u128 {
    let per = TOTAL_GONS / supply;
    if TOTAL_GONS % supply == 0 {
        per
    } else {
        per + 1
    }
}

/// `a * b / c` with a 256-bit intermediate, rounded down.
pub fn mul_div(e: &Env, a: u128, b: u128, c: u128) -> Result<u128, ContractError> {
    if c == 0 {
        return Err(ContractError::DivisionByZero);
    }
    U256::from_u128(e, a)
        .mul(&U256::from_u128(e, b))
        .div(&U256::from_u128(e, c))
        .to_u128()
        .ok_or(ContractError::Overflow)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GonsLedger {
    /// Visible supply of the receipt token, including the undistributed
    /// fragments held by the pool itself.
    pub total_supply: u128,
    pub gons_per_fragment: u128,
    /// Gons whose visible value is the index.
    pub index_gons: u128,
    /// Gons owned by holders.
    pub circulating_gons: u128,
}

impl GonsLedger {
    /// Fresh ledger whose index starts at `initial_index`.
    pub fn new(initial_index: u128) -> Result<Self, ContractError> {
        if initial_index == 0 {
            return Err(ContractError::InvalidTerms);
        }
        let gons_per_fragment = TOTAL_GONS / INITIAL_FRAGMENTS_SUPPLY;
        let index_gons = initial_index
            .checked_mul(gons_per_fragment)
            .ok_or(ContractError::Overflow)?;
        Ok(Self {
            total_supply: INITIAL_FRAGMENTS_SUPPLY,
            gons_per_fragment,
            index_gons,
            circulating_gons: 0,
        })
    }

    pub fn index(&self) -> u128 {
        self.balance_for_gons(self.index_gons)
    }

    pub fn balance_for_gons(&self, gons: u128) -> u128 {
        gons / self.gons_per_fragment
    }

    pub fn gons_for_balance(&self, amount: u128) -> Result<u128, ContractError> {
        amount
            .checked_mul(self.gons_per_fragment)
            .ok_or(ContractError::Overflow)
    }

    /// Visible balance held by holders, excluding the pool's own fragments.
    pub fn circulating(&self) -> u128 {
        self.balance_for_gons(self.circulating_gons)
    }

    fn circulating_rounded_up(&self) -> u128 {
        let whole = self.circulating();
        if self.circulating_gons % self.gons_per_fragment == 0 {
            whole
        } else {
            whole + 1
        }
    }

    /// Issue `amount` of receipt balance at the current index. Returns the
    /// gons the holder receives.
    pub fn credit(&mut self, amount: u128) -> Result<u128, ContractError> {
        let gons = self.gons_for_balance(amount)?;
        let circulating = self
            .circulating_gons
            .checked_add(gons)
            .ok_or(ContractError::Overflow)?;
        if circulating > TOTAL_GONS {
            return Err(ContractError::Overflow);
        }
        self.circulating_gons = circulating;
        Ok(gons)
    }

    /// Retire `gons` from circulation.
    pub fn debit(&mut self, gons: u128) -> Result<(), ContractError> {
        self.circulating_gons = self
            .circulating_gons
            .checked_sub(gons)
            .ok_or(ContractError::Underflow)?;
        Ok(())
    }

    /// Spread `profit` over the circulating balance: every holder's balance
    /// (and the index) grows by `1 + profit / circulating`. A zero profit or
    /// an empty circulation leaves the ledger unchanged.
    ///
    /// Returns the new total supply.
    pub fn rebase(&mut self, e: &Env, profit: u128) -> Result<u128, ContractError> {
        let circulating = self.circulating_rounded_up();
        if profit == 0 || circulating == 0 {
            return Ok(self.total_supply);
        }
        let rebase_amount = mul_div(e, profit, self.total_supply, circulating)?;
        let supply = self
            .total_supply
            .checked_add(rebase_amount)
            .ok_or(ContractError::Overflow)?
            .min(MAX_SUPPLY);
        self.total_supply = supply;
        self.gons_per_fragment = gons_per_fragment_for(supply);
        Ok(supply)
    }
}
