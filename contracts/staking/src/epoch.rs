//! Epoch clock.
//!
//! An epoch ends at `end`; once the ledger clock reaches it the next rebase is
//! eligible. Each rebase moves the boundary forward by exactly one `length`,
//! so a clock that fell behind catches up one epoch per rebase.

use protocol_errors::ContractError;
use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Epoch {
    pub number: u32,
    /// Seconds per epoch.
    pub length: u64,
    /// Timestamp at which the current epoch ends.
    pub end: u64,
    /// Profit distributed by the most recent rebase.
    pub distribute: i128,
}

impl Epoch {
    pub fn new(number: u32, length: u64, end: u64) -> Result<Self, ContractError> {
        if length == 0 {
            return Err(ContractError::InvalidTerms);
        }
        Ok(Self {
            number,
            length,
            end,
            distribute: 0,
        })
    }

    pub fn is_due(&self, now: u64) -> bool {
        self.end <= now
    }

    /// Close the current epoch after distributing `distributed`.
    pub fn advance(&mut self, distributed: i128) -> Result<(), ContractError> {
        self.end = self
            .end
            .checked_add(self.length)
            .ok_or(ContractError::Overflow)?;
        self.number = self.number.checked_add(1).ok_or(ContractError::Overflow)?;
        self.distribute = distributed;
        Ok(())
    }
}
