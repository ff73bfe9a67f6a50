use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");

// ── Core Functions ───────────────────────────────────────────────────────────

/// Records `owner` as the single privileged account.
/// Only callable internally; callers must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Returns the current owner, if one has been set.
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns true if `caller` is the current owner.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

/// Hands ownership from `caller` to `new_owner` in a single step.
///
/// The caller must have already been authenticated via `require_auth()`.
///
/// Returns the previous owner on success, `None` if `caller` is not the owner.
pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> Option<Address> {
    if !is_owner(env, caller) {
        return None;
    }
    set_owner(env, new_owner);
    Some(caller.clone())
}
