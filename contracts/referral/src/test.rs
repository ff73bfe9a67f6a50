extern crate std;

use common::CommonError;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ReferralProgram, ReferralProgramClient};

fn setup() -> (Env, ReferralProgramClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(ReferralProgram, ());
    let client = ReferralProgramClient::new(&env, &contract_id);

    (env, client)
}

#[test]
fn test_register_and_lookup() {
    let (env, client) = setup();
    let user = Address::generate(&env);
    let referrer = Address::generate(&env);

    assert_eq!(client.referrer_of(&user), None);

    client.register(&user, &referrer);

    assert_eq!(client.referrer_of(&user), Some(referrer.clone()));
    assert_eq!(client.referral_count(&referrer), 1);
}

#[test]
fn test_register_twice_fails() {
    let (env, client) = setup();
    let user = Address::generate(&env);
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    client.register(&user, &first);

    let result = client.try_register(&user, &second);
    match result {
        Err(Ok(e)) => assert_eq!(e, CommonError::AlreadyRegistered),
        _ => unreachable!("Expected AlreadyRegistered error"),
    }
    assert_eq!(client.referrer_of(&user), Some(first));
}

#[test]
fn test_self_referral_fails() {
    let (env, client) = setup();
    let user = Address::generate(&env);

    let result = client.try_register(&user, &user);
    match result {
        Err(Ok(e)) => assert_eq!(e, CommonError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_two_cycle_fails() {
    let (env, client) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.register(&bob, &alice);

    let result = client.try_register(&alice, &bob);
    match result {
        Err(Ok(e)) => assert_eq!(e, CommonError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_referral_count_tracks_referees() {
    let (env, client) = setup();
    let referrer = Address::generate(&env);

    for _ in 0..3 {
        let user = Address::generate(&env);
        client.register(&user, &referrer);
    }

    assert_eq!(client.referral_count(&referrer), 3);
}
