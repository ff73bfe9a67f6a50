use soroban_sdk::{contractclient, Address, Env};

/// Read-only view of the referral graph.
///
/// The farm only ever calls [`ReferralDirectory::referrer_of`]; registering
/// referrers is the directory's own business.
#[contractclient(name = "ReferralDirectoryClient")]
pub trait ReferralDirectory {
    /// Returns the address that referred `user`, if any.
    fn referrer_of(env: Env, user: Address) -> Option<Address>;
}
