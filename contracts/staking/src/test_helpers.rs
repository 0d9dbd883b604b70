//! Shared test helpers for staking tests.

#![cfg(test)]

use crate::{ContractSlot, Staking, StakingClient};
use distributor::{Distributor, DistributorClient};
use protocol_interfaces::DepositorKind;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env};
use treasury::{Treasury, TreasuryClient};

pub const START: u64 = 1_000;
pub const EPOCH_LENGTH: u64 = 28_800;
pub const REWARD_RATE: u32 = 7_100;
/// Index 1.0.
pub const ONE: i128 = 1_000_000_000;

pub struct Fixture<'a> {
    pub staking: StakingClient<'a>,
    pub distributor: DistributorClient<'a>,
    pub treasury: TreasuryClient<'a>,
    pub token: TokenClient<'a>,
    pub manager: Address,
    /// Approved reward manager used to hand out protocol tokens.
    pub seeder: Address,
}

/// Treasury, distributor and a first-generation staking pool wired
/// together. The first epoch ends at `START + EPOCH_LENGTH`, which is also
/// the distributor's first payment time.
pub fn setup(e: &Env) -> Fixture<'_> {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = START);

    let manager = Address::generate(e);
    let treasury_id = e.register(Treasury, ());
    let treasury = TreasuryClient::new(e, &treasury_id);
    let protocol_token = e
        .register_stellar_asset_contract_v2(treasury_id.clone())
        .address();
    treasury.initialize(&manager, &protocol_token, &0);

    let distributor_id = e.register(Distributor, ());
    let distributor = DistributorClient::new(e, &distributor_id);
    distributor.initialize(&manager, &treasury_id, &EPOCH_LENGTH, &(START + EPOCH_LENGTH));

    let seeder = Address::generate(e);
    for who in [&distributor_id, &seeder] {
        treasury.queue(&manager, &DepositorKind::RewardManager, who);
        treasury.toggle(&manager, &DepositorKind::RewardManager, who, &None);
    }

    let staking_id = e.register(Staking, ());
    let staking = StakingClient::new(e, &staking_id);
    staking.initialize(&manager, &protocol_token, &EPOCH_LENGTH, &1, &(START + EPOCH_LENGTH), &ONE);
    staking.set_contract(&manager, &ContractSlot::Distributor, &distributor_id);
    distributor.add_recipient(&manager, &staking_id, &REWARD_RATE);

    Fixture {
        staking,
        distributor,
        treasury,
        token: TokenClient::new(e, &protocol_token),
        manager,
        seeder,
    }
}

/// Mint `amount` protocol tokens to `holder` and approve the pool for them.
pub fn fund(e: &Env, f: &Fixture<'_>, holder: &Address, amount: i128) {
    f.treasury.mint_rewards(&f.seeder, holder, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    f.token.approve(holder, &f.staking.address, &amount, &expiry);
}

/// Fund, stake and claim in one go (warmup must be zero).
pub fn stake_and_claim(e: &Env, f: &Fixture<'_>, holder: &Address, amount: i128) {
    fund(e, f, holder, amount);
    f.staking.stake(holder, &amount, holder);
    f.staking.claim(holder);
}

/// Move the clock to the end of the current epoch.
pub fn to_epoch_end(e: &Env, f: &Fixture<'_>) {
    let end = f.staking.epoch().end;
    e.ledger().with_mut(|li| li.timestamp = end);
}

/// Stand-in for a deprecated pool that reports a fixed index and epoch.
#[contract]
pub struct RecordedPool;

#[contractimpl]
impl RecordedPool {
    pub fn record(e: Env, index: i128, epoch_number: u32) {
        e.storage().instance().set(&symbol_short!("index"), &index);
        e.storage().instance().set(&symbol_short!("epoch"), &epoch_number);
    }

    pub fn index(e: Env) -> i128 {
        e.storage().instance().get(&symbol_short!("index")).unwrap_or(0)
    }

    pub fn epoch_number(e: Env) -> u32 {
        e.storage().instance().get(&symbol_short!("epoch")).unwrap_or(0)
    }
}

pub fn recorded_pool(e: &Env, index: i128, epoch_number: u32) -> RecordedPoolClient<'_> {
    let pool = RecordedPoolClient::new(e, &e.register(RecordedPool, ()));
    pool.record(&index, &epoch_number);
    pool
}
