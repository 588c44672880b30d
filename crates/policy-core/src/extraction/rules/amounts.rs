//! Amount, day-count and derived-percentage helpers.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a rupee amount as written in policy text (e.g. "5,000" or "1,00,000").
///
/// Thousands separators are stripped regardless of grouping style.
pub fn parse_rupee_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Parse a whole day or trip count.
pub fn parse_count(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// How a derived share of a reference amount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareScale {
    /// 0-1 ratio.
    Ratio,
    /// 0-100 percentage.
    Percent,
}

/// Compute `amount / reference` in the given scale, optionally rounded.
///
/// Returns `None` unless both operands are strictly positive.
pub fn share_of_reference(
    amount: Decimal,
    reference: Decimal,
    scale: ShareScale,
    decimals: Option<u32>,
) -> Option<Decimal> {
    if amount <= Decimal::ZERO || reference <= Decimal::ZERO {
        return None;
    }

    let ratio = amount.checked_div(reference)?;
    let share = match scale {
        ShareScale::Ratio => ratio,
        ShareScale::Percent => ratio.checked_mul(Decimal::ONE_HUNDRED)?,
    };

    Some(match decimals {
        Some(dp) => share.round_dp(dp),
        None => share,
    })
}
