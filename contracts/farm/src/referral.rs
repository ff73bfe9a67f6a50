//! Referral side-ledger.
//!
//! Every harvest mints a bonus on top of the gross reward and parks it in a
//! record keyed by (bucket, pool). A bucket is either a registered referrer
//! or the protocol bucket used for depositors nobody referred.

use common::ReferralDirectoryClient;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const RECORD: Symbol = symbol_short!("REF");
const PROGRAM: Symbol = symbol_short!("REF_PROG");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReferralBucket {
    Protocol,
    Referrer(Address),
}

impl ReferralBucket {
    pub fn from_referrer(referrer: Option<Address>) -> Self {
        match referrer {
            Some(addr) => ReferralBucket::Referrer(addr),
            None => ReferralBucket::Protocol,
        }
    }
}

/// Accumulated bonus for one (bucket, pool). `accrued_at` is the ledger time
/// of the most recent credit.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferralRecord {
    pub amount: i128,
    pub accrued_at: u64,
}

fn record_key(bucket: &ReferralBucket, pool_id: u32) -> (Symbol, ReferralBucket, u32) {
    (RECORD, bucket.clone(), pool_id)
}

pub fn set_program(env: &Env, program: &Address) {
    env.storage().instance().set(&PROGRAM, program);
}

pub fn program(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&PROGRAM)
        .ok_or(ContractError::NotInitialized)
}

/// Bucket that receives bonuses generated by `user`'s harvests.
pub fn bucket_for(env: &Env, user: &Address) -> Result<ReferralBucket, ContractError> {
    let directory = ReferralDirectoryClient::new(env, &program(env)?);
    Ok(ReferralBucket::from_referrer(directory.referrer_of(user)))
}

pub fn load(env: &Env, bucket: &ReferralBucket, pool_id: u32) -> ReferralRecord {
    let key = record_key(bucket, pool_id);
    match env.storage().persistent().get::<_, ReferralRecord>(&key) {
        Some(record) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            record
        }
        None => ReferralRecord::default(),
    }
}

fn save(env: &Env, bucket: &ReferralBucket, pool_id: u32, record: &ReferralRecord) {
    let key = record_key(bucket, pool_id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn credit(
    env: &Env,
    bucket: &ReferralBucket,
    pool_id: u32,
    amount: i128,
) -> Result<ReferralRecord, ContractError> {
    let mut record = load(env, bucket, pool_id);
    record.amount = record
        .amount
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    record.accrued_at = env.ledger().timestamp();
    save(env, bucket, pool_id, &record);
    Ok(record)
}

/// Sum of `bucket`'s records over the first `pool_count` pools.
pub fn total(env: &Env, bucket: &ReferralBucket, pool_count: u32) -> Result<i128, ContractError> {
    let mut sum: i128 = 0;
    for id in 0..pool_count {
        sum = sum
            .checked_add(load(env, bucket, id).amount)
            .ok_or(ContractError::MathOverflow)?;
    }
    Ok(sum)
}

/// Latest credit time across the bucket's non-empty records.
pub fn last_accrual(env: &Env, bucket: &ReferralBucket, pool_count: u32) -> Option<u64> {
    (0..pool_count)
        .map(|id| load(env, bucket, id))
        .filter(|record| record.amount > 0)
        .map(|record| record.accrued_at)
        .max()
}

/// Zero every non-empty record of `bucket`.
pub fn clear(env: &Env, bucket: &ReferralBucket, pool_count: u32) {
    for id in 0..pool_count {
        let mut record = load(env, bucket, id);
        if record.amount != 0 {
            record.amount = 0;
            save(env, bucket, id, &record);
        }
    }
}
