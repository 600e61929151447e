use payroll_core::calculations::common::round_half_up;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops digit separators (`,` and `_`).
fn normalize_amount_input(s: &str) -> String {
    s.trim().chars().filter(|c| *c != ',' && *c != '_').collect()
}

/// Parses a currency amount.
///
/// Accepts both Western and Indian digit grouping (`1,200,000` and
/// `12,00,000`) as well as underscores (`1_200_000`). Empty input is
/// treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount with Indian digit grouping (`12,00,000`).
///
/// Rounded to two decimal places; the fraction is shown only when it is
/// non-zero.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let grouped = group_indian(whole);
    if fraction == "00" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Groups the last three digits, then every two digits before them.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut rest, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while rest.len() > 2 {
        let (head, group) = rest.split_at(rest.len() - 2);
        groups.push(group);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats a ratio as a percentage with one decimal place.
pub fn format_percent(ratio: Decimal) -> String {
    let percent = ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.1}%")
}
