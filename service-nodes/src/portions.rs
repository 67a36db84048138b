//! Portion arithmetic
//!
//! A full stake is [`STAKING_PORTIONS`] portions. Conversions between portions
//! and atomic amounts multiply two `u64`s, so every intermediate is `u128`.

use crate::constants::STAKING_PORTIONS;

/// Half of one millionth of a full stake
const HALF_MICROPORTION: u64 = 9_223_372_036_855;

/// Atomic amount that `portions` of `staking_requirement` is worth, rounded
/// down.
pub fn portions_to_amount(portions: u64, staking_requirement: u64) -> u64 {
    (staking_requirement as u128 * portions as u128 / STAKING_PORTIONS as u128) as u64
}

/// Portions of a full stake needed to make `amount`, rounded up.
pub fn get_portions_to_make_amount(staking_requirement: u64, amount: u64) -> u64 {
    get_portions_to_make_amount_of(staking_requirement, amount, STAKING_PORTIONS)
}

/// Portions out of `max_portions` needed to make `amount`, rounded up.
///
/// A zero requirement is met by any share, so it yields `max_portions`. An
/// amount well above the requirement saturates at `u64::MAX` rather than
/// wrapping; callers clamp to what is still available.
pub fn get_portions_to_make_amount_of(
    staking_requirement: u64,
    amount: u64,
    max_portions: u64,
) -> u64 {
    if staking_requirement == 0 {
        return max_portions;
    }
    let requirement = staking_requirement as u128;
    let portions = (amount as u128 * max_portions as u128 + requirement - 1) / requirement;
    u64::try_from(portions).unwrap_or(u64::MAX)
}

/// Smallest amount whose share of a full stake reaches `portions`.
///
/// The inverse of [`get_portions_to_make_amount`] for display: rounding up
/// means the amount shown is always enough.
pub fn get_amount_to_make_portions(amount: u64, portions: u64) -> u64 {
    let full = STAKING_PORTIONS as u128;
    u64::try_from((amount as u128 * portions as u128 + full - 1) / full).unwrap_or(u64::MAX)
}

/// `portions` in millionths of a full stake, rounded to nearest.
pub fn microportion(portions: u64) -> u32 {
    if portions < HALF_MICROPORTION {
        0
    } else {
        ((portions - HALF_MICROPORTION) / (2 * HALF_MICROPORTION) + 1) as u32
    }
}

/// Parse an operator fee such as `"18"`, `"4.5%"` or `"100%"` into portions.
///
/// Returns `None` for anything that is not a number in `[0, 100]`. Exactly
/// 100 maps to [`STAKING_PORTIONS`] so a full fee never loses a portion to
/// floating-point error.
pub fn get_portions_from_percent_str(s: &str) -> Option<u64> {
    let number = s.strip_suffix('%').unwrap_or(s);
    let percent: f64 = number.parse().ok()?;
    get_portions_from_percent(percent)
}

fn get_portions_from_percent(percent: f64) -> Option<u64> {
    if !(0.0..=100.0).contains(&percent) {
        return None;
    }
    if percent == 100.0 {
        return Some(STAKING_PORTIONS);
    }
    let portions = (percent / 100.0 * STAKING_PORTIONS as f64).round() as u64;
    Some(portions.min(STAKING_PORTIONS))
}
