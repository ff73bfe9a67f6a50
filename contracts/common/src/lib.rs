//! Shared building blocks for the Ultra Farm contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by the auxiliary contracts.
//! - [`ownable`]: single-owner storage and gating used by the farm.
//! - [`math`]: checked basis-point and fixed-point helpers.
//! - [`ReferralDirectory`]: the read-only referral graph interface the farm
//!   consumes, plus its generated [`ReferralDirectoryClient`].
//! - [`StakingFarm`]: the farm entry points the auto-compounding vault
//!   drives, plus its generated [`StakingFarmClient`].

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod directory;
pub mod farm;
pub mod math;
pub mod ownable;

pub use directory::*;
pub use farm::*;
pub use math::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by the auxiliary contracts.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Validation (30–39) ───────────────────────────────────
    /// One or more input parameters are invalid (e.g. a user naming
    /// themselves as their own referrer).
    InvalidInput = 30,

    // ── Contract state (40–49) ───────────────────────────────
    /// The user already has a registered referrer; registration is
    /// write-once.
    AlreadyRegistered = 40,
}
