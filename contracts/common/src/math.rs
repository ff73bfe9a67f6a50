//! Checked arithmetic shared by the farm's accounting.
//!
//! Every helper returns `None` instead of panicking so callers can map the
//! failure onto their own error enum.

use soroban_sdk::{Env, I256};

/// Denominator for basis-point values (10 000 bps = 100 %).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Largest basis-point value accepted for fees and referral percentages.
pub const MAX_BPS: u32 = 10_000;

/// Seconds in a day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// `a * b / denominator`, rounding toward zero.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}

/// `a * b / denominator` with a 256-bit intermediate product. Only the
/// quotient has to fit in `i128`.
pub fn mul_div_wide(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
}

/// `amount * bps / 10 000`.
pub fn bps_of(amount: i128, bps: u32) -> Option<i128> {
    mul_div(amount, bps as i128, BPS_DENOMINATOR)
}

/// Validate that a basis-point value is within `0..=10 000`.
pub fn validate_bps(bps: u32) -> bool {
    bps <= MAX_BPS
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn bps_of_rounds_down() {
        assert_eq!(bps_of(10_000, 300), Some(300));
        assert_eq!(bps_of(99, 300), Some(2));
        assert_eq!(bps_of(0, 300), Some(0));
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert_eq!(mul_div(1, 1, 0), None);
    }

    #[test]
    fn mul_div_reports_overflow() {
        assert_eq!(mul_div(i128::MAX, 2, 1), None);
    }

    #[test]
    fn mul_div_wide_survives_large_products() {
        let env = Env::default();
        let one = 1_000_000_000_000_000_000i128;
        // 1.76e42 intermediate, 1.76e22 result.
        assert_eq!(
            mul_div_wide(&env, 100 * one, 17_597 * one, 100 * one),
            Some(17_597 * one)
        );
        assert_eq!(mul_div(100 * one, 17_597 * one, 100 * one), None);
        assert_eq!(mul_div_wide(&env, i128::MAX, 2, 1), None);
        assert_eq!(mul_div_wide(&env, 1, 1, 0), None);
    }

    #[test]
    fn validate_bps_bounds() {
        assert!(validate_bps(0));
        assert!(validate_bps(MAX_BPS));
        assert!(!validate_bps(MAX_BPS + 1));
    }
}
