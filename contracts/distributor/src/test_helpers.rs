//! Shared test helpers for distributor tests.

#![cfg(test)]

use crate::{Distributor, DistributorClient};
use protocol_interfaces::DepositorKind;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};
use treasury::{Treasury, TreasuryClient};

pub const EPOCH_LENGTH: u64 = 28_800;
pub const FIRST_EPOCH_TIME: u64 = 100_000;
pub const INITIAL_SUPPLY: i128 = 1_000_000_000_000_000;

pub struct Fixture<'a> {
    pub distributor: DistributorClient<'a>,
    pub treasury: TreasuryClient<'a>,
    pub manager: Address,
    pub protocol_token: Address,
}

/// Deploys treasury + distributor, approves the distributor as reward
/// manager and seeds `INITIAL_SUPPLY` protocol tokens to a holder.
pub fn setup(e: &Env) -> Fixture<'_> {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = 1_000);

    let manager = Address::generate(e);
    let treasury_id = e.register(Treasury, ());
    let treasury = TreasuryClient::new(e, &treasury_id);
    let protocol_token = e
        .register_stellar_asset_contract_v2(treasury_id.clone())
        .address();
    treasury.initialize(&manager, &protocol_token, &0);

    let distributor_id = e.register(Distributor, ());
    let distributor = DistributorClient::new(e, &distributor_id);
    distributor.initialize(&manager, &treasury_id, &EPOCH_LENGTH, &FIRST_EPOCH_TIME);

    treasury.queue(&manager, &DepositorKind::RewardManager, &distributor_id);
    treasury.toggle(&manager, &DepositorKind::RewardManager, &distributor_id, &None);

    let seeder = Address::generate(e);
    treasury.queue(&manager, &DepositorKind::RewardManager, &seeder);
    treasury.toggle(&manager, &DepositorKind::RewardManager, &seeder, &None);
    treasury.mint_rewards(&seeder, &Address::generate(e), &INITIAL_SUPPLY);

    Fixture {
        distributor,
        treasury,
        manager,
        protocol_token,
    }
}
