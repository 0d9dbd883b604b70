#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Bond depository errors (codes 200-299).
    Bond,
    /// Staking engine errors (codes 300-399).
    Staking,
    /// Treasury errors (codes 400-499).
    Treasury,
    /// Distributor errors (codes 500-599).
    Distributor,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the depository, staking, treasury
///         and distributor contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Bond
///   300 - 399 : Staking
///   400 - 499 : Treasury
///   500 - 599 : Distributor
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract (or bond terms) has not been initialized yet.
    NotInitialized = 1,

    /// Contract (or bond terms) has already been initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller does not hold the manager role of the contract.
    Unauthorized = 100,

    /// Depositor is not approved by the treasury for this kind of deposit.
    DepositorNotApproved = 101,

    /// Deposits into this account's warmup are locked by its owner.
    DepositsLocked = 102,

    // --- Bond (200-299) ---
    /// Computed bond price exceeds the caller's maximum acceptable price.
    SlippageExceeded = 200,

    /// Bond payout exceeds the configured fraction of supply.
    MaxPayoutExceeded = 201,

    /// Deposit would push total debt above the configured maximum.
    MaxDebtExceeded = 202,

    /// Depositor has no bond with a remaining payout.
    NoActiveBond = 203,

    /// Bond payout is below the minimum payout.
    BondTooSmall = 204,

    /// Bond terms are outside their permitted ranges.
    InvalidTerms = 205,

    /// Adjustment increment exceeds the permitted step.
    InvalidAdjustment = 206,

    // --- Staking (300-399) ---
    /// Warmup period has not elapsed for this deposit.
    StillWarming = 300,

    /// Epoch boundary not reached. Surfaced to off-chain pokers only;
    /// `rebase` itself treats this as a no-op.
    RebaseTooEarly = 301,

    /// No warmup deposit exists for this account.
    NoWarmupDeposit = 302,

    /// Receipt balance is insufficient for the requested unstake or transfer.
    InsufficientStake = 303,

    /// Seeded index does not match the deprecated instance's trajectory.
    IndexDiscontinuity = 304,

    /// Migration snapshot is malformed or of an unsupported version.
    InvalidSnapshot = 305,

    /// A required collaborator contract has not been wired.
    ContractNotSet = 306,

    // --- Treasury (400-499) ---
    /// Amount argument must be strictly positive (> 0).
    InvalidAmount = 400,

    /// Queue delay for a depositor approval has not yet elapsed.
    QueueNotElapsed = 401,

    /// No floor has been declared for this reserve asset.
    FloorNotSet = 402,

    /// Requested mint exceeds the value of the deposited reserves.
    InsufficientReserves = 403,

    // --- Distributor (500-599) ---
    /// Recipient is not registered with the distributor.
    RecipientNotFound = 500,

    /// Recipient is already registered with the distributor.
    RecipientExists = 501,

    /// Reward rate is outside the permitted range.
    InvalidRate = 502,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,

    /// Division by zero during a checked arithmetic operation.
    DivisionByZero = 702,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            ContractError::Unauthorized
            | ContractError::DepositorNotApproved
            | ContractError::DepositsLocked => ErrorCategory::Authorization,

            ContractError::SlippageExceeded
            | ContractError::MaxPayoutExceeded
            | ContractError::MaxDebtExceeded
            | ContractError::NoActiveBond
            | ContractError::BondTooSmall
            | ContractError::InvalidTerms
            | ContractError::InvalidAdjustment => ErrorCategory::Bond,

            ContractError::StillWarming
            | ContractError::RebaseTooEarly
            | ContractError::NoWarmupDeposit
            | ContractError::InsufficientStake
            | ContractError::IndexDiscontinuity
            | ContractError::InvalidSnapshot
            | ContractError::ContractNotSet => ErrorCategory::Staking,

            ContractError::InvalidAmount
            | ContractError::QueueNotElapsed
            | ContractError::FloorNotSet
            | ContractError::InsufficientReserves => ErrorCategory::Treasury,

            ContractError::RecipientNotFound
            | ContractError::RecipientExists
            | ContractError::InvalidRate => ErrorCategory::Distributor,

            ContractError::Overflow | ContractError::Underflow | ContractError::DivisionByZero => {
                ErrorCategory::Arithmetic
            }
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::Unauthorized => "Caller does not hold the manager role",
            ContractError::DepositorNotApproved => {
                "Depositor is not approved by the treasury for this deposit kind"
            }
            ContractError::DepositsLocked => "Warmup deposits for this account are locked",
            ContractError::SlippageExceeded => "Bond price exceeds the maximum acceptable price",
            ContractError::MaxPayoutExceeded => "Bond payout exceeds the maximum payout",
            ContractError::MaxDebtExceeded => "Deposit would exceed the maximum total debt",
            ContractError::NoActiveBond => "No bond with a remaining payout for this depositor",
            ContractError::BondTooSmall => "Bond payout is below the minimum payout",
            ContractError::InvalidTerms => "Bond terms are outside their permitted ranges",
            ContractError::InvalidAdjustment => "Adjustment increment exceeds the permitted step",
            ContractError::StillWarming => "Warmup period has not elapsed",
            ContractError::RebaseTooEarly => "Epoch boundary has not been reached",
            ContractError::NoWarmupDeposit => "No warmup deposit for this account",
            ContractError::InsufficientStake => "Receipt balance is insufficient",
            ContractError::IndexDiscontinuity => {
                "Seeded index diverges from the deprecated instance's trajectory"
            }
            ContractError::InvalidSnapshot => "Migration snapshot is malformed or unsupported",
            ContractError::ContractNotSet => "Required collaborator contract is not wired",
            ContractError::InvalidAmount => "Amount must be strictly positive (> 0)",
            ContractError::QueueNotElapsed => "Depositor queue delay has not elapsed",
            ContractError::FloorNotSet => "No floor declared for this reserve asset",
            ContractError::InsufficientReserves => "Mint exceeds the value of deposited reserves",
            ContractError::RecipientNotFound => "Recipient is not registered",
            ContractError::RecipientExists => "Recipient is already registered",
            ContractError::InvalidRate => "Reward rate is outside the permitted range",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
            ContractError::DivisionByZero => "Division by zero in checked arithmetic",
        }
    }
}

#[cfg(test)]
mod test_errors;
