//! Low-level string parsing for price-sheet cells.
//!
//! See [`crate::normalize`] for how these compose into full row
//! normalization.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Cell values that mean "no listed price" rather than a malformed one.
const PRICE_SENTINELS: [&str; 2] = ["call", "n/a"];

const PER_LOAD_SUFFIX: &str = "per load";

/// Outcome of cleaning one price cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CleanedPrice {
    /// A non-negative exact amount.
    Amount(Decimal),
    /// Blank, `CALL`, or `N/A`.
    Unlisted,
    /// Anything else; the caller decides how loudly to complain.
    Unparsable,
}

/// Cleans a currency cell such as `"$50.00 per load"` into an exact decimal.
///
/// Strips a leading `$`, thousands separators, and a trailing `per load`
/// (any case). Negative amounts count as unparsable.
#[must_use]
pub(crate) fn clean_price(raw: &str) -> CleanedPrice {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_sentinel(trimmed) {
        return CleanedPrice::Unlisted;
    }

    let without_suffix = strip_suffix_ignore_case(trimmed, PER_LOAD_SUFFIX).unwrap_or(trimmed);
    let without_symbol = without_suffix.trim();
    let without_symbol = without_symbol.strip_prefix('$').unwrap_or(without_symbol).trim();
    let Some(digits) = strip_thousands_separators(without_symbol) else {
        return CleanedPrice::Unparsable;
    };

    match Decimal::from_str(&digits) {
        Ok(value) if !value.is_sign_negative() => CleanedPrice::Amount(value),
        _ => CleanedPrice::Unparsable,
    }
}

/// Removes commas that separate groups of three digits in the whole part,
/// e.g. `"1,250.00"` to `"1250.00"`. Any other comma placement is `None`.
fn strip_thousands_separators(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let mut groups = whole.split(',');
    let lead = groups.next()?;
    let is_digits = |g: &str| g.chars().all(|c| c.is_ascii_digit());
    if lead.is_empty() || lead.len() > 3 || !is_digits(lead) {
        return None;
    }

    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

/// Splits `"Name/Type/Number"` into up to three trimmed parts.
///
/// Missing or blank parts are `None`; anything past the third `/` is ignored.
#[must_use]
pub(crate) fn split_location(descriptor: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut parts = descriptor.split('/').map(|part| {
        let part = part.trim();
        (!part.is_empty()).then(|| part.to_string())
    });

    let name = parts.next().flatten();
    let kind = parts.next().flatten();
    let number = parts.next().flatten();
    (name, kind, number)
}

fn is_sentinel(value: &str) -> bool {
    PRICE_SENTINELS
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split_at = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split_at) {
        return None;
    }
    let (head, tail) = value.split_at(split_at);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
