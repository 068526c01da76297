//! Value formatting for alert text.
//!
//! Amounts are rendered the way municipal payroll reports print them:
//! Brazilian real, `.` for thousands and `,` for decimals. Only the
//! numbers take this format; alert text and month labels stay English.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Formats an amount as currency with two decimal places.
///
/// # Example
///
/// ```
/// use payroll_audit::audit::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
/// assert_eq!(format_currency(Decimal::new(5, 1)), "R$ 0,50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let (integer, fraction) = split_fixed(rounded.abs(), 2);
    format!("{sign}{CURRENCY_SYMBOL} {},{fraction}", group_thousands(&integer))
}

/// Formats a percentage with one decimal place, e.g. `30,0%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let (integer, fraction) = split_fixed(rounded.abs(), 1);
    format!("{sign}{integer},{fraction}%")
}

fn split_fixed(value: Decimal, places: usize) -> (String, String) {
    let text = format!("{:.*}", places, value);
    match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
        None => (text, "0".repeat(places)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
