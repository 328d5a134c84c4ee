//! Field normalization.
//!
//! Roster and positioning cells arrive as untyped JSON values. These
//! functions turn them into level letters, currency codes and decimals
//! without ever failing: anything unusable becomes empty or `None`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Largest exponent magnitude accepted in scientific notation.
const MAX_EXPONENT: u32 = 28;

/// Returns the trimmed text form of a cell. `null` becomes the empty string.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Extracts the level letter from free text.
///
/// The first token (split on anything that is not a letter or digit) that
/// is a letter between A and J, optionally followed by digits, wins
/// upper-cased. Returns an empty string when there is none.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::normalize_level;
///
/// assert_eq!(normalize_level("Level C - Senior"), "C");
/// assert_eq!(normalize_level("e"), "E");
/// assert_eq!(normalize_level("Sonova Level C2"), "C");
/// assert_eq!(normalize_level("junior"), "");
/// ```
pub fn normalize_level(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .find_map(|token| {
            let mut chars = token.chars();
            let letter = chars.next()?.to_ascii_uppercase();
            let grade_only = chars.all(|c| c.is_ascii_digit());
            (('A'..='J').contains(&letter) && grade_only).then(|| letter.to_string())
        })
        .unwrap_or_default()
}

/// Upper-cases and trims a currency code, substituting `default` when the
/// result is empty. Codes are not checked against any list.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::normalize_currency;
///
/// assert_eq!(normalize_currency(" usd ", "BRL"), "USD");
/// assert_eq!(normalize_currency("", "BRL"), "BRL");
/// assert_eq!(normalize_currency("xyz", "BRL"), "XYZ");
/// ```
pub fn normalize_currency(raw: &str, default: &str) -> String {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        default.trim().to_uppercase()
    } else {
        code
    }
}

/// Parses a number written with either comma or dot as decimal separator.
///
/// Whitespace is ignored. When both separators appear, the later one is the
/// decimal point and the other is a thousands separator. A lone comma is a
/// decimal point; otherwise dot is the decimal point and commas are
/// dropped. Returns `None` for blank or unparseable text.
///
/// # Examples
///
/// ```
/// use compa_engine::calculation::parse_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_number("1.234,56"), Some(Decimal::new(123456, 2)));
/// assert_eq!(parse_number("1,234.56"), Some(Decimal::new(123456, 2)));
/// assert_eq!(parse_number("1234"), Some(Decimal::new(1234, 0)));
/// assert_eq!(parse_number(""), None);
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replacen(',', ".", 1),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replacen(',', ".", 1),
        _ => compact.replace(',', ""),
    };

    decimal_literal(&normalized)
}

/// Parses a JSON cell as a number. Numbers go through their text form so
/// they follow the same rules as strings; other types are `None`.
pub fn parse_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_number(&n.to_string()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Accepts `[+-]digits[.digits][e[+-]digits]` with at least one mantissa
/// digit.
fn decimal_literal(text: &str) -> Option<Decimal> {
    let negative = text.starts_with('-');
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut canonical = String::with_capacity(mantissa.len() + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }

    match exponent {
        None => Decimal::from_str(&canonical).ok(),
        Some(exp) => {
            let exp_negative = exp.starts_with('-');
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let magnitude: u32 = digits.parse().ok()?;
            if magnitude > MAX_EXPONENT {
                return None;
            }
            let sign = if exp_negative { "-" } else { "" };
            Decimal::from_scientific(&format!("{canonical}e{sign}{magnitude}")).ok()
        }
    }
}
