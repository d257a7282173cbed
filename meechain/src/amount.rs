//! Exact conversion between human-readable token amounts and integer
//! token units.
//!
//! Scaling is done entirely in integer arithmetic on [`U256`]; binary
//! floating point never touches the value, so `"1.5"` at 18 decimals is
//! exactly `1_500_000_000_000_000_000`.

use alloy_primitives::U256;

/// Errors from parsing a human-readable amount string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount string is empty (or just a decimal point).
    #[error("empty amount string")]
    Empty,

    /// The amount contains something other than digits and one decimal
    /// point. Signs are rejected too; token amounts are unsigned.
    #[error("invalid character {character:?} in amount {amount:?}")]
    InvalidCharacter {
        /// The offending input.
        amount: String,
        /// The first character that is neither a digit nor the single
        /// decimal point.
        character: char,
    },

    /// The fractional part is finer than the token's declared precision.
    #[error("amount {amount:?} has {fractional} fractional digits, but the token has {decimals} decimals")]
    TooManyFractionalDigits {
        /// The offending input.
        amount: String,
        /// Number of fractional digits supplied.
        fractional: usize,
        /// The token's declared precision.
        decimals: u8,
    },

    /// The scaled value does not fit in a `uint256`.
    #[error("amount {amount:?} does not fit in a uint256 at {decimals} decimals")]
    Overflow {
        /// The offending input.
        amount: String,
        /// The token's declared precision.
        decimals: u8,
    },
}

/// Scales a decimal amount string by `10^decimals` into integer token
/// units.
///
/// Accepts plain unsigned decimal notation: digits, optionally followed
/// by a point and more digits (`"1"`, `"1.5"`, `".5"`, `"1."`). The
/// fractional part may not be longer than `decimals`.
///
/// # Errors
///
/// Returns an [`AmountError`] for empty input, stray characters, excess
/// fractional digits, or a result exceeding `uint256`.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(character) = whole
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(AmountError::InvalidCharacter {
            amount: amount.to_owned(),
            character,
        });
    }

    if fraction.len() > usize::from(decimals) {
        return Err(AmountError::TooManyFractionalDigits {
            amount: amount.to_owned(),
            fractional: fraction.len(),
            decimals,
        });
    }

    let overflow = || AmountError::Overflow {
        amount: amount.to_owned(),
        decimals,
    };

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole_units = parse_digits(whole)
        .ok_or_else(overflow)?
        .checked_mul(scale)
        .ok_or_else(overflow)?;

    // fraction digits d1..dn stand for d / 10^n; scaled by 10^decimals
    // that is d * 10^(decimals - n).
    let fraction_scale =
        U256::from(10u64).pow(U256::from(usize::from(decimals) - fraction.len()));
    let fraction_units = parse_digits(fraction)
        .ok_or_else(overflow)?
        .checked_mul(fraction_scale)
        .ok_or_else(overflow)?;

    whole_units.checked_add(fraction_units).ok_or_else(overflow)
}

/// Renders integer token units as a decimal amount string.
///
/// The inverse of [`parse_units`] up to trailing zeros: a whole-number
/// value renders with a single `.0` fraction (`"1.0"` at 18 decimals for
/// `10^18`), and trailing fractional zeros are trimmed otherwise. With
/// zero decimals the value renders as a plain integer.
#[must_use]
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / scale;
    let fraction = value % scale;

    let digits = fraction.to_string();
    let mut padded = "0".repeat(usize::from(decimals) - digits.len());
    padded.push_str(&digits);
    let trimmed = padded.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Parses a run of ASCII digits as a `U256`; empty input is zero.
///
/// Returns `None` only on `uint256` overflow — callers have already
/// checked that the input is digits-only.
fn parse_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> U256 {
        U256::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn scales_whole_and_fractional_parts_exactly() {
        assert_eq!(parse_units("1.5", 18).unwrap(), units("1500000000000000000"));
        assert_eq!(parse_units("1", 18).unwrap(), units("1000000000000000000"));
        assert_eq!(parse_units("0.000000000000000001", 18).unwrap(), U256::from(1));
    }

    #[test]
    fn zero_and_partial_notations() {
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units("0.0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5));
        assert_eq!(parse_units("2.", 1).unwrap(), U256::from(20));
    }

    #[test]
    fn zero_decimals_takes_integers_only() {
        assert_eq!(parse_units("42", 0).unwrap(), U256::from(42));
        assert!(matches!(
            parse_units("1.5", 0),
            Err(AmountError::TooManyFractionalDigits { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_units("", 18), Err(AmountError::Empty));
        assert_eq!(parse_units(".", 18), Err(AmountError::Empty));
    }

    #[test]
    fn rejects_stray_characters() {
        for bad in ["-1", "+1", "1,5", "1.5e3", "1.2.3", " 1"] {
            assert!(
                matches!(
                    parse_units(bad, 18),
                    Err(AmountError::InvalidCharacter { .. })
                ),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_excess_fractional_digits() {
        let err = parse_units("0.0000000000000000001", 18).unwrap_err();
        assert!(matches!(
            err,
            AmountError::TooManyFractionalDigits {
                fractional: 19,
                decimals: 18,
                ..
            }
        ));
    }

    #[test]
    fn rejects_uint256_overflow() {
        // 2^256 is about 1.16e77; 1e60 scaled by 10^18 exceeds it.
        let huge = format!("1{}", "0".repeat(60));
        assert!(matches!(
            parse_units(&huge, 18),
            Err(AmountError::Overflow { .. })
        ));
    }

    #[test]
    fn max_precision_is_supported() {
        let one = parse_units("1", 36).unwrap();
        assert_eq!(one, units(&format!("1{}", "0".repeat(36))));
        assert_eq!(
            parse_units(&format!("0.{}1", "0".repeat(35)), 36).unwrap(),
            U256::from(1)
        );
    }

    #[test]
    fn formats_whole_values_with_single_zero_fraction() {
        assert_eq!(format_units(units("1000000000000000000"), 18), "1.0");
        assert_eq!(format_units(U256::ZERO, 18), "0.0");
    }

    #[test]
    fn formats_fractions_with_trailing_zeros_trimmed() {
        assert_eq!(format_units(units("1500000000000000000"), 18), "1.5");
        assert_eq!(format_units(U256::from(1), 18), "0.000000000000000001");
    }

    #[test]
    fn formats_zero_decimals_as_plain_integer() {
        assert_eq!(format_units(U256::from(42), 0), "42");
    }

    #[test]
    fn round_trips_through_parse_and_format() {
        for (text, decimals) in [("1.5", 18u8), ("0.000001", 6), ("123456.789", 9)] {
            let parsed = parse_units(text, decimals).unwrap();
            assert_eq!(format_units(parsed, decimals), text);
        }
    }
}
