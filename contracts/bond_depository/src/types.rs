use soroban_sdk::{contracttype, Address};

// ─── Terms ─────────────────────────────────────────────────────────────────

/// Pricing and sizing terms of the bond.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondTerms {
    /// Scales the debt ratio into a price.
    pub control_variable: i128,
    /// Seconds over which a bond vests linearly.
    pub vesting_term: u64,
    /// Price floor, in `PRICE_PRECISION`.
    pub minimum_price: i128,
    /// Largest single payout, in thousandths of a percent of supply.
    pub max_payout: i128,
    /// Share of each payout sent to the fee recipient, in millionths.
    pub fee: i128,
    /// Ceiling on total debt, in protocol-token base units.
    pub max_debt: i128,
    /// Share of each deposit's principal sent to the tithe recipient, in
    /// millionths.
    pub tithe: i128,
}

/// Scheduled drift of the control variable toward `target`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Adjustment {
    pub active: bool,
    /// `true` moves the control variable up, `false` down.
    pub add: bool,
    /// Step applied per buffer interval.
    pub increment: i128,
    pub target: i128,
    /// Minimum seconds between two applications.
    pub buffer: u64,
    /// Timestamp of the last application (or of `set_adjustment`).
    pub last_time: u64,
}

/// Term editable through `set_bond_term`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BondParameter {
    Vesting,
    Payout,
    Fee,
    Debt,
    Tithe,
}

// ─── Bond state ────────────────────────────────────────────────────────────

/// A depositor's vesting bond.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondInfo {
    /// Protocol tokens still vesting.
    pub payout: i128,
    /// Protocol tokens that vested before a top-up and are redeemable now.
    pub claimable: i128,
    /// Seconds left to vest `payout`, measured from `last_time`.
    pub vesting: u64,
    /// Timestamp of the last deposit or redeem.
    pub last_time: u64,
    /// Price of the most recent deposit, in `PRICE_PRECISION`.
    pub price_paid: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Manager address.
    Manager,
    /// Token paid out to bonders.
    ProtocolToken,
    /// Asset accepted as principal.
    Principal,
    Treasury,
    /// Receives the fee share of each payout.
    FeeRecipient,
    /// Receives the tithe share of each deposit's principal.
    TitheRecipient,
    /// Present for liquidity bonds only.
    Calculator,
    /// Target of auto-staked redemptions.
    Staking,
    Terms,
    Adjustment,
    TotalDebt,
    /// Timestamp debt decay was last realized.
    LastDecay,
    Bond(Address),
}
