extern crate std;

use ::referral::ReferralProgram;
use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use crate::{ContractError, UltraFarm, UltraFarmClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, UltraFarmClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let referral_program = env.register(ReferralProgram, ());

    let contract_id = env.register(UltraFarm, ());
    let client = UltraFarmClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &reward_token.address(),
        &referral_program,
        &10,
        &0,
        &1,
        &0,
        &Address::generate(&env),
    );

    (env, client, owner)
}

fn assert_unauthorized<T, C, I>(result: Result<Result<T, C>, Result<ContractError, I>>) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Owner can call every admin setter ────────────────────────────────────────

#[test]
fn test_owner_sets_parameters() {
    let (env, client, owner) = setup();

    client.set_reward_per_second(&owner, &99, &true);
    client.set_referral_percent(&owner, &250);
    client.set_min_referral_reward(&owner, &1_000);
    client.set_ref_withdraw_await(&owner, &3_600);
    client.set_lock_duration(&owner, &60);
    client.set_pool_fee_percentage(&owner, &0, &10_000);
    client.set_pool_alloc_point(&owner, &0, &5, &false);

    assert_eq!(client.reward_per_second(), 99);
    assert_eq!(client.referral_percent(), 250);
    assert_eq!(client.min_referral_reward(), 1_000);
    assert_eq!(client.referral_owner_withdraw_await(), 3_600);
    assert_eq!(client.lock_duration(), 60);
    assert_eq!(client.pool_info(&0).fee_bps, 10_000);
    assert_eq!(client.total_alloc_point(), 5);

    let account = Address::generate(&env);
    client.exclude_from_fee(&owner, &vec![&env, account.clone()]);
    assert!(client.is_excluded_from_fee(&account));
}

// ── Validation ───────────────────────────────────────────────────────────────

#[test]
fn test_basis_points_above_100_percent_rejected() {
    let (env, client, owner) = setup();

    match client.try_set_referral_percent(&owner, &10_001) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidBasisPoints),
        _ => unreachable!("Expected InvalidBasisPoints error"),
    }
    match client.try_set_pool_fee_percentage(&owner, &0, &10_001) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidBasisPoints),
        _ => unreachable!("Expected InvalidBasisPoints error"),
    }
    let token = Address::generate(&env);
    match client.try_add_pool(&owner, &token, &1, &20_000, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidBasisPoints),
        _ => unreachable!("Expected InvalidBasisPoints error"),
    }
    assert_eq!(client.pool_length(), 1);
}

#[test]
fn test_negative_amounts_rejected() {
    let (_env, client, owner) = setup();

    match client.try_set_reward_per_second(&owner, &-1, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
    match client.try_set_min_referral_reward(&owner, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

#[test]
fn test_alloc_point_on_unknown_pool_fails() {
    let (_env, client, owner) = setup();
    match client.try_set_pool_alloc_point(&owner, &3, &1, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolNotFound),
        _ => unreachable!("Expected PoolNotFound error"),
    }
}

// ── Non-owner cannot call any admin function ─────────────────────────────────

#[test]
fn test_non_owner_cannot_change_pools() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);
    let token = Address::generate(&env);

    match client.try_add_pool(&intruder, &token, &1, &0, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_unauthorized(client.try_set_pool_alloc_point(&intruder, &0, &9, &true));
    assert_unauthorized(client.try_set_pool_fee_percentage(&intruder, &0, &1));
    assert_unauthorized(client.try_set_reward_per_second(&intruder, &1, &true));
}

#[test]
fn test_non_owner_cannot_change_parameters() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_set_referral_percent(&intruder, &1));
    assert_unauthorized(client.try_set_min_referral_reward(&intruder, &1));
    assert_unauthorized(client.try_set_ref_withdraw_await(&intruder, &1));
    assert_unauthorized(client.try_set_lock_duration(&intruder, &1));
    assert_unauthorized(client.try_exclude_from_fee(&intruder, &vec![&env, intruder.clone()]));
    assert_unauthorized(client.try_include_in_fee(&intruder, &vec![&env, intruder.clone()]));
    assert!(!client.is_excluded_from_fee(&intruder));
}

#[test]
fn test_non_owner_cannot_sweep() {
    let (env, client, _owner) = setup();
    let intruder = Address::generate(&env);

    match client.try_get_fees(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_get_referral_reward_for(&intruder, &None) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Ownership transfer ───────────────────────────────────────────────────────

#[test]
fn test_transfer_ownership() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);

    client.transfer_ownership(&owner, &next);
    assert_eq!(client.owner(), next);

    // The previous owner lost every privilege.
    assert_unauthorized(client.try_set_lock_duration(&owner, &1));
    assert_unauthorized(client.try_transfer_ownership(&owner, &owner));

    client.set_lock_duration(&next, &1);
    assert_eq!(client.lock_duration(), 1);
}

#[test]
fn test_non_owner_cannot_transfer_ownership() {
    let (env, client, owner) = setup();
    let intruder = Address::generate(&env);

    assert_unauthorized(client.try_transfer_ownership(&intruder, &intruder));
    assert_eq!(client.owner(), owner);
}
