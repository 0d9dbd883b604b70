//! Shared test helpers for bond depository tests.

#![cfg(test)]

use crate::{BondDepository, BondDepositoryClient, BondTerms};
use protocol_interfaces::DepositorKind;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use treasury::{Treasury, TreasuryClient};

pub const START: u64 = 1_000;
/// 5.275 principal per protocol token of backing.
pub const FLOOR: i128 = 5_275_000_000;
/// Protocol supply minted before bonding opens: 1 000 000 tokens.
pub const INITIAL_SUPPLY: i128 = 1_000_000_000_000_000;
/// 1 000 principal tokens.
pub const DEPOSIT: i128 = 1_000_000_000_000;
pub const VESTING: u64 = 33_110;
/// 0.05% of the principal.
pub const TITHE: i128 = 500;

pub struct Fixture<'a> {
    pub depository: BondDepositoryClient<'a>,
    pub treasury: TreasuryClient<'a>,
    pub protocol: TokenClient<'a>,
    pub principal: TokenClient<'a>,
    pub manager: Address,
    pub fee_recipient: Address,
    pub tithe_recipient: Address,
}

pub fn default_terms() -> BondTerms {
    BondTerms {
        control_variable: 665,
        vesting_term: VESTING,
        minimum_price: 180_000,
        max_payout: 100,
        fee: 9_500,
        max_debt: INITIAL_SUPPLY,
        tithe: TITHE,
    }
}

/// Treasury with a reserve principal at `FLOOR`, `INITIAL_SUPPLY` protocol
/// tokens in circulation and an approved depository with default terms.
pub fn setup(e: &Env) -> Fixture<'_> {
    setup_with(e, &default_terms(), 0)
}

pub fn setup_with<'a>(e: &'a Env, terms: &BondTerms, initial_debt: i128) -> Fixture<'a> {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = START);

    let manager = Address::generate(e);
    let treasury_id = e.register(Treasury, ());
    let treasury = TreasuryClient::new(e, &treasury_id);
    let protocol = e
        .register_stellar_asset_contract_v2(treasury_id.clone())
        .address();
    treasury.initialize(&manager, &protocol, &0);

    let principal = e
        .register_stellar_asset_contract_v2(Address::generate(e))
        .address();

    let depository_id = e.register(BondDepository, ());
    let depository = BondDepositoryClient::new(e, &depository_id);
    let fee_recipient = Address::generate(e);
    let tithe_recipient = Address::generate(e);
    depository.initialize(
        &manager,
        &protocol,
        &principal,
        &treasury_id,
        &fee_recipient,
        &tithe_recipient,
        &None,
    );
    depository.initialize_bond_terms(&manager, terms, &initial_debt);

    let seeder = Address::generate(e);
    approve(&treasury, &manager, DepositorKind::RewardManager, &seeder);
    approve(&treasury, &manager, DepositorKind::ReserveToken, &principal);
    approve(&treasury, &manager, DepositorKind::ReserveDepositor, &depository_id);
    treasury.set_floor(&manager, &principal, &FLOOR);
    treasury.mint_rewards(&seeder, &Address::generate(e), &INITIAL_SUPPLY);

    Fixture {
        depository,
        treasury,
        protocol: TokenClient::new(e, &protocol),
        principal: TokenClient::new(e, &principal),
        manager,
        fee_recipient,
        tithe_recipient,
    }
}

fn approve(treasury: &TreasuryClient<'_>, manager: &Address, kind: DepositorKind, who: &Address) {
    treasury.queue(manager, &kind, who);
    treasury.toggle(manager, &kind, who, &None);
}

/// Mint principal to `depositor` and approve the depository for it.
pub fn fund(e: &Env, f: &Fixture<'_>, depositor: &Address, amount: i128) {
    StellarAssetClient::new(e, &f.principal.address).mint(depositor, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    f.principal
        .approve(depositor, &f.depository.address, &amount, &expiry);
}

pub fn advance(e: &Env, seconds: u64) {
    e.ledger().with_mut(|li| li.timestamp += seconds);
}
