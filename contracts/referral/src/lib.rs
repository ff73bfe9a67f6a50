#![no_std]
#![allow(deprecated)] // events().publish migration tracked separately

//! Referral directory: who introduced whom.
//!
//! Users register their referrer exactly once. The farm reads the graph
//! through [`ReferralDirectory::referrer_of`] and never writes to it.

use common::{CommonError, ReferralDirectory};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

// Per-user persistent storage uses tuple keys: (prefix, address)
const REFERRER: Symbol = symbol_short!("REFERRER");
const REF_COUNT: Symbol = symbol_short!("REF_CNT");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

// ── Events ───────────────────────────────────────────────────────────────────

/// Fired when a user records who referred them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerRegisteredEvent {
    pub user: Address,
    pub referrer: Address,
    pub timestamp: u64,
}

fn publish_registered(env: &Env, user: Address, referrer: Address) {
    env.events().publish(
        (symbol_short!("REGISTER"), referrer.clone()),
        ReferrerRegisteredEvent {
            user,
            referrer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn load_referrer(env: &Env, user: &Address) -> Option<Address> {
    let key = (REFERRER, user.clone());
    let referrer: Option<Address> = env.storage().persistent().get(&key);
    if referrer.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    referrer
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ReferralProgram;

#[contractimpl]
impl ReferralProgram {
    /// Record `referrer` as the account that introduced `user`.
    ///
    /// Registration is write-once. Self-referral and direct two-cycles
    /// (A refers B while B refers A) are rejected with `InvalidInput`.
    pub fn register(env: Env, user: Address, referrer: Address) -> Result<(), CommonError> {
        user.require_auth();

        if user == referrer {
            return Err(CommonError::InvalidInput);
        }
        let key = (REFERRER, user.clone());
        if env.storage().persistent().has(&key) {
            return Err(CommonError::AlreadyRegistered);
        }
        if load_referrer(&env, &referrer) == Some(user.clone()) {
            return Err(CommonError::InvalidInput);
        }

        env.storage().persistent().set(&key, &referrer);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        let count_key = (REF_COUNT, referrer.clone());
        let count: u32 = env.storage().persistent().get(&count_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&count_key, &count.saturating_add(1));

        publish_registered(&env, user, referrer);

        Ok(())
    }

    /// Number of users that registered `referrer` as their referrer.
    pub fn referral_count(env: Env, referrer: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(REF_COUNT, referrer))
            .unwrap_or(0)
    }
}

#[contractimpl]
impl ReferralDirectory for ReferralProgram {
    fn referrer_of(env: Env, user: Address) -> Option<Address> {
        load_referrer(&env, &user)
    }
}

#[cfg(test)]
mod test;
