//! Money helpers shared across the subsidy calculations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount '{input}'")]
pub struct ParseAmountError {
    input: String,
}

/// Parses a price as typed into the form.
///
/// Surrounding whitespace is ignored. Plain decimal notation is tried first,
/// then scientific notation (`"1e3"`), which number inputs may produce.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            tracing::debug!(input = %s, "invalid amount: {}", e);
            ParseAmountError {
                input: s.to_string(),
            }
        })
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use subsidy_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(849.995)), dec!(850.00));
/// assert_eq!(round_half_up(dec!(849.994)), dec!(849.99));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display with exactly two decimals.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}
