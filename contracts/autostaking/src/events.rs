#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub farm: Address,
    pub pool_id: u32,
    pub token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: i128,
    pub shares: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub shares: i128,
    pub amount: i128,
    pub fee: i128,
    pub timestamp: u64,
}

/// Fired when harvested reward is folded back into the farm.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestakeEvent {
    pub caller: Address,
    pub harvested: i128,
    pub restaked: i128,
    pub bounty: i128,
    pub performance_fee: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSetEvent {
    pub name: Symbol,
    pub bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRecoveredEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    farm: Address,
    pool_id: u32,
    token: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            farm,
            pool_id,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(env: &Env, user: Address, amount: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositEvent {
            user,
            amount,
            shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(env: &Env, user: Address, shares: i128, amount: i128, fee: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawEvent {
            user,
            shares,
            amount,
            fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_restake(
    env: &Env,
    caller: Address,
    harvested: i128,
    restaked: i128,
    bounty: i128,
    performance_fee: i128,
) {
    env.events().publish(
        (symbol_short!("RESTAKE"), caller.clone()),
        RestakeEvent {
            caller,
            harvested,
            restaked,
            bounty,
            performance_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_set(env: &Env, name: Symbol, bps: u32) {
    env.events().publish(
        (symbol_short!("FEE_SET"), name.clone()),
        FeeSetEvent {
            name,
            bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_recovered(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RECOVER"), token.clone()),
        TokenRecoveredEvent {
            token,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWNER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
