use common::bps_of;
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol};

use crate::referral::{self, ReferralBucket};
use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const FEES: Symbol = symbol_short!("FEES");
const BURN: Symbol = symbol_short!("BURN");
const REFERRAL_BPS: Symbol = symbol_short!("REF_BPS");
const NO_FEE: Symbol = symbol_short!("NO_FEE");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

// ── Split ────────────────────────────────────────────────────────────────────

/// How one gross reward is divided.
///
/// `net + fee == gross`; `burned` and `treasury` are each half the fee, so
/// an odd fee leaves one unit unminted. `referral_bonus` is minted on top.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payout {
    pub gross: i128,
    pub fee: i128,
    pub burned: i128,
    pub treasury: i128,
    pub net: i128,
    pub referral_bonus: i128,
}

impl Payout {
    pub fn split(gross: i128, fee_bps: u32, referral_bps: u32, exempt: bool) -> Option<Self> {
        if exempt {
            return Some(Payout {
                gross,
                net: gross,
                ..Payout::default()
            });
        }
        let fee = bps_of(gross, fee_bps)?;
        let half = fee / 2;
        Some(Payout {
            gross,
            fee,
            burned: half,
            treasury: half,
            net: gross.checked_sub(fee)?,
            referral_bonus: bps_of(gross, referral_bps)?,
        })
    }
}

// ── Scalars ──────────────────────────────────────────────────────────────────

pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, token);
}

pub fn burn_address(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&BURN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_burn_address(env: &Env, burn: &Address) {
    env.storage().instance().set(&BURN, burn);
}

pub fn referral_bps(env: &Env) -> u32 {
    env.storage().instance().get(&REFERRAL_BPS).unwrap_or(0)
}

pub fn set_referral_bps(env: &Env, bps: u32) {
    env.storage().instance().set(&REFERRAL_BPS, &bps);
}

pub fn fees_collected(env: &Env) -> i128 {
    env.storage().instance().get(&FEES).unwrap_or(0)
}

pub fn set_fees_collected(env: &Env, amount: i128) {
    env.storage().instance().set(&FEES, &amount);
}

pub fn is_exempt(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(NO_FEE, addr.clone()))
        .unwrap_or(false)
}

pub fn set_exempt(env: &Env, addr: &Address, exempt: bool) {
    let key = (NO_FEE, addr.clone());
    if exempt {
        env.storage().persistent().set(&key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Mint a gross reward earned by `depositor` in `pool_id`.
///
/// Net goes to `recipient`, half the fee to the burn address, and the other
/// half plus the referral bonus to the farm itself. The bonus is booked to
/// the depositor's referral bucket.
pub fn distribute(
    env: &Env,
    pool_id: u32,
    fee_bps: u32,
    depositor: &Address,
    recipient: &Address,
    gross: i128,
) -> Result<(Payout, Option<ReferralBucket>), ContractError> {
    if gross <= 0 {
        return Ok((Payout::default(), None));
    }
    let payout = Payout::split(
        gross,
        fee_bps,
        referral_bps(env),
        is_exempt(env, depositor),
    )
    .ok_or(ContractError::MathOverflow)?;

    let token = token::StellarAssetClient::new(env, &reward_token(env)?);
    let farm = env.current_contract_address();

    if payout.net > 0 {
        token.mint(recipient, &payout.net);
    }
    if payout.burned > 0 {
        token.mint(&burn_address(env)?, &payout.burned);
    }
    let retained = payout
        .treasury
        .checked_add(payout.referral_bonus)
        .ok_or(ContractError::MathOverflow)?;
    if retained > 0 {
        token.mint(&farm, &retained);
    }
    if payout.treasury > 0 {
        let fees = fees_collected(env)
            .checked_add(payout.treasury)
            .ok_or(ContractError::MathOverflow)?;
        set_fees_collected(env, fees);
    }

    let mut bucket = None;
    if payout.referral_bonus > 0 {
        let b = referral::bucket_for(env, depositor)?;
        referral::credit(env, &b, pool_id, payout.referral_bonus)?;
        bucket = Some(b);
    }
    Ok((payout, bucket))
}

/// Send `amount` reward tokens held by the farm to `to`.
pub fn pay_out(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    token::Client::new(env, &reward_token(env)?).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
    Ok(())
}
