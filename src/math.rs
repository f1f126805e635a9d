// Fixed-point math module
// This file implements exact scaled-integer arithmetic used for amounts,
// prices, price impact and slippage across the router
//
// Numan Thabit 2025 Nov

use alloy::primitives::{U256, U512};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DECIMALS: u8 = 18;

/// `rust_decimal` cannot represent more fractional digits than this.
const MAX_DECIMAL_SCALE: u8 = 28;

fn pow10(exp: u32) -> Option<U512> {
    U512::from(10u64).checked_pow(U512::from(exp))
}

fn widen(value: U256) -> U512 {
    U512::from(value)
}

/// Narrow a wide intermediate back to 256 bits. Overflow saturates.
fn narrow(value: Option<U512>) -> U256 {
    value.map(U256::saturating_from).unwrap_or(U256::MAX)
}

/// floor(x * y * 10^dec_out / 10^(dec_x + dec_y)); zero if either operand is zero.
pub fn mul(x: U256, y: U256, dec_x: u8, dec_y: u8, dec_out: u8) -> U256 {
    if x.is_zero() || y.is_zero() {
        return U256::ZERO;
    }
    let numerator = widen(x)
        .checked_mul(widen(y))
        .zip(pow10(dec_out as u32))
        .and_then(|(xy, scale)| xy.checked_mul(scale));
    let Some(denominator) = pow10(dec_x as u32 + dec_y as u32) else {
        return U256::ZERO;
    };
    narrow(numerator.map(|n| n / denominator))
}

/// floor(x * 10^(dec_y + dec_out) / (y * 10^dec_x)); zero if either operand is zero.
///
/// Never fails on a zero divisor: a zero result doubles as "no rate" and callers
/// that care must tell the two apart themselves.
pub fn div(x: U256, y: U256, dec_x: u8, dec_y: u8, dec_out: u8) -> U256 {
    if x.is_zero() || y.is_zero() {
        return U256::ZERO;
    }
    let numerator = pow10(dec_y as u32 + dec_out as u32).and_then(|s| widen(x).checked_mul(s));
    let denominator = pow10(dec_x as u32).and_then(|s| widen(y).checked_mul(s));
    match denominator {
        Some(d) => narrow(numerator.map(|n| n / d)),
        // divisor beyond 512 bits: the quotient floors to zero
        None => U256::ZERO,
    }
}

pub fn mul_default(x: U256, y: U256) -> U256 {
    mul(x, y, DEFAULT_DECIMALS, DEFAULT_DECIMALS, DEFAULT_DECIMALS)
}

pub fn div_default(x: U256, y: U256) -> U256 {
    div(x, y, DEFAULT_DECIMALS, DEFAULT_DECIMALS, DEFAULT_DECIMALS)
}

/// How much `amount` is of `base`, as a percentage (or plain fraction) scaled by 10^decimals.
pub fn percent_of(base: U256, amount: U256, decimals: u8, as_fraction: bool) -> U256 {
    if base.is_zero() {
        return U256::ZERO;
    }
    let multiplier = if as_fraction { 1u64 } else { 100u64 };
    let numerator = pow10(decimals as u32)
        .and_then(|s| widen(amount).checked_mul(U512::from(multiplier))?.checked_mul(s));
    narrow(numerator.map(|n| n / widen(base)))
}

/// Convert a decimal into an integer scaled by 10^decimals, truncating extra
/// fractional digits. Negative values clamp to zero.
pub fn scale_decimal(value: Decimal, decimals: u8) -> U256 {
    if value.is_sign_negative() || value.is_zero() {
        return U256::ZERO;
    }
    let truncated = value.round_dp_with_strategy(
        decimals.min(MAX_DECIMAL_SCALE) as u32,
        RoundingStrategy::ToZero,
    );
    let mantissa = U512::from(truncated.mantissa().unsigned_abs());
    let missing = decimals as u32 - truncated.scale();
    narrow(pow10(missing).and_then(|s| mantissa.checked_mul(s)))
}

/// Take `base_pct` percent of `amount`, then discount it by `slippage` percent of
/// that share. Both percentages are truncated to `decimals` fractional digits.
///
/// `apply_percent(a, 18, 10, 100)` is 90% of `a`; `apply_percent(a, 18, 0, 10)` is 10% of `a`.
pub fn apply_percent(amount: U256, decimals: u8, slippage: Decimal, base_pct: Decimal) -> U256 {
    if slippage.is_zero() && base_pct == Decimal::ONE_HUNDRED {
        return amount;
    }

    let scaled_base = scale_decimal(base_pct, decimals);
    let denominator = pow10(decimals as u32).map(|s| s * U512::from(100u64));
    let result = match denominator {
        Some(d) => narrow(widen(amount).checked_mul(widen(scaled_base)).map(|n| n / d)),
        None => U256::ZERO,
    };

    if slippage.is_zero() {
        return result;
    }
    amount.saturating_sub(apply_percent(result, decimals, Decimal::ZERO, slippage))
}

/// Minimum acceptable output for `amount` under a slippage percentage.
pub fn apply_slippage(amount: U256, decimals: u8, slippage_pct: Decimal) -> U256 {
    apply_percent(amount, decimals, slippage_pct, Decimal::ONE_HUNDRED)
}

/// Rescale an amount between decimal bases, flooring when decimals shrink.
pub fn rescale(amount: U256, from_decimals: u8, to_decimals: u8) -> U256 {
    if from_decimals == to_decimals {
        return amount;
    }
    mul(amount, U256::from(1u64), from_decimals, 0, to_decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn e18(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn div_by_zero_is_zero() {
        assert_eq!(div(U256::from(7u64), U256::ZERO, 18, 18, 18), U256::ZERO);
        assert_eq!(div(U256::ZERO, U256::from(7u64), 18, 18, 18), U256::ZERO);
        assert_eq!(div(U256::MAX, U256::ZERO, 0, 0, 0), U256::ZERO);
    }

    #[test]
    fn div_vectors() {
        assert_eq!(div(U256::from(5u64), U256::from(11u64), 18, 18, 0), U256::ZERO);
        assert_eq!(div_default(U256::from(6u64), U256::from(3u64)), e18(2));
        assert_eq!(div(U256::from(6u64), U256::from(3u64), 0, 0, 0), U256::from(2u64));
    }

    #[test]
    fn mul_vectors() {
        assert_eq!(mul(U256::from(60u64), U256::from(30u64), 1, 1, 18), e18(18));
        assert_eq!(mul(U256::from(6u64), U256::from(3u64), 0, 0, 0), U256::from(18u64));
        assert_eq!(mul(U256::ZERO, U256::from(3u64), 0, 0, 0), U256::ZERO);
    }

    #[test]
    fn mul_saturates_instead_of_panicking() {
        assert_eq!(mul(U256::MAX, U256::MAX, 0, 0, 18), U256::MAX);
    }

    #[test]
    fn percent_of_vectors() {
        assert_eq!(percent_of(U256::ZERO, e18(5), 18, false), U256::ZERO);
        assert_eq!(
            percent_of(e18(1), U256::from(10_000_000_000_000_000u64), 18, false),
            e18(1)
        );
        assert_eq!(
            percent_of(e18(4), e18(1), 18, true),
            U256::from(250_000_000_000_000_000u64)
        );
    }

    #[test]
    fn apply_percent_discounts_by_slippage() {
        let amount = e18(1000);
        assert_eq!(apply_percent(amount, 18, dec("10"), Decimal::ONE_HUNDRED), e18(900));
        assert_eq!(apply_percent(amount, 18, Decimal::ZERO, dec("10")), e18(100));
        assert_eq!(apply_percent(amount, 18, Decimal::ZERO, Decimal::ONE_HUNDRED), amount);
    }

    #[test]
    fn apply_percent_floors_small_amounts() {
        // 0.5% of 999 is 4.995 -> discount floors to 4
        assert_eq!(apply_slippage(U256::from(999u64), 18, dec("0.5")), U256::from(995u64));
        assert_eq!(apply_slippage(U256::from(1u64), 6, dec("1")), U256::from(1u64));
    }

    #[test]
    fn apply_percent_truncates_percentages_to_decimals() {
        // 12.345678% with 2 decimals is treated as 12.34%
        let amount = U256::from(1_000_000u64);
        assert_eq!(apply_percent(amount, 2, Decimal::ZERO, dec("12.345678")), U256::from(123_400u64));
    }

    #[test]
    fn scale_decimal_handles_scale_and_sign() {
        assert_eq!(scale_decimal(dec("1.5"), 6), U256::from(1_500_000u64));
        assert_eq!(scale_decimal(dec("-3"), 18), U256::ZERO);
        assert_eq!(scale_decimal(dec("0.123456789"), 3), U256::from(123u64));
    }

    #[test]
    fn rescale_between_bases() {
        assert_eq!(rescale(U256::from(1_500_000u64), 6, 18), e18(1) + e18(1) / U256::from(2u64));
        assert_eq!(rescale(e18(3), 18, 6), U256::from(3_000_000u64));
    }
}
