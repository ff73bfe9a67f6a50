#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::payout::Payout;
use crate::referral::ReferralBucket;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub referral_program: Address,
    pub reward_per_second: i128,
    pub start_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_token: Address,
    pub alloc_point: u64,
    pub fee_bps: u32,
    pub total_alloc_point: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocPointSetEvent {
    pub pool_id: u32,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFeeSetEvent {
    pub pool_id: u32,
    pub fee_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub reward_per_second: i128,
    pub timestamp: u64,
}

/// Fired for owner setters that only change a scalar.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamSetEvent {
    pub name: Symbol,
    pub value: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired whenever a non-zero reward is realised, with the full split.
/// The bucket that received `payout.referral_bonus` is named by the
/// accompanying `ReferralCreditedEvent`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEvent {
    pub pool_id: u32,
    pub user: Address,
    pub recipient: Address,
    pub payout: Payout,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralCreditedEvent {
    pub bucket: ReferralBucket,
    pub pool_id: u32,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralClaimedEvent {
    pub referrer: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralSweptEvent {
    pub bucket: ReferralBucket,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesClaimedEvent {
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeExemptionEvent {
    pub account: Address,
    pub exempt: bool,
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
    reward_token: Address,
    referral_program: Address,
    reward_per_second: i128,
    start_time: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            referral_program,
            reward_per_second,
            start_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    stake_token: Address,
    alloc_point: u64,
    fee_bps: u32,
    total_alloc_point: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            stake_token,
            alloc_point,
            fee_bps,
            total_alloc_point,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_alloc_point_set(env: &Env, pool_id: u32, alloc_point: u64, total_alloc_point: u64) {
    env.events().publish(
        (symbol_short!("ALLOC"), pool_id),
        AllocPointSetEvent {
            pool_id,
            alloc_point,
            total_alloc_point,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_fee_set(env: &Env, pool_id: u32, fee_bps: u32) {
    env.events().publish(
        (symbol_short!("POOL_FEE"), pool_id),
        PoolFeeSetEvent {
            pool_id,
            fee_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, reward_per_second: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RewardRateSetEvent {
            reward_per_second,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_param_set(env: &Env, name: Symbol, value: i128) {
    env.events().publish(
        (symbol_short!("PARAM"), name.clone()),
        ParamSetEvent {
            name,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(env: &Env, pool_id: u32, user: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositEvent {
            pool_id,
            user,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(env: &Env, pool_id: u32, user: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawEvent {
            pool_id,
            user,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvest(
    env: &Env,
    pool_id: u32,
    user: Address,
    recipient: Address,
    payout: Payout,
) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone()),
        HarvestEvent {
            pool_id,
            user,
            recipient,
            payout,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_referral_credited(env: &Env, bucket: ReferralBucket, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("REF_CRD"), pool_id),
        ReferralCreditedEvent {
            bucket,
            pool_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_referral_claimed(env: &Env, referrer: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("REF_CLM"), referrer.clone()),
        ReferralClaimedEvent {
            referrer,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_referral_swept(env: &Env, bucket: ReferralBucket, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("REF_SWP"), to.clone()),
        ReferralSweptEvent {
            bucket,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fees_claimed(env: &Env, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FEES"), to.clone()),
        FeesClaimedEvent {
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_exemption(env: &Env, account: Address, exempt: bool) {
    env.events().publish(
        (symbol_short!("NO_FEE"), account.clone()),
        FeeExemptionEvent {
            account,
            exempt,
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
