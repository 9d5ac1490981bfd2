use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

fn non_price_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.,]").unwrap())
}

/// Normalizes scraped price text to a decimal value.
///
/// Strips currency symbols and whitespace, then treats the last `.` or `,` as
/// the decimal separator when one or two digits follow it; every other
/// separator is grouping. Handles `209,90`, `1.209,90`, `1,209.90` and plain
/// `1209` alike.
pub fn normalize(text: &str) -> Option<Decimal> {
    let cleaned = non_price_chars().replace_all(text, "");
    if cleaned.is_empty() {
        return None;
    }

    let decimal_pos = cleaned.rfind(['.', ',']).filter(|&pos| {
        let fraction_len = cleaned.len() - pos - 1;
        (1..=2).contains(&fraction_len)
    });

    let mut canonical = String::with_capacity(cleaned.len());
    for (i, c) in cleaned.char_indices() {
        match c {
            '.' | ',' if Some(i) == decimal_pos => canonical.push('.'),
            '.' | ',' => {}
            digit => canonical.push(digit),
        }
    }

    if canonical.is_empty() || canonical == "." {
        return None;
    }

    Decimal::from_str(&canonical).ok()
}

/// Joins a price rendered as separate whole and fractional markup nodes.
/// A missing or empty fractional node defaults to "00".
pub fn from_parts(whole: &str, fraction: Option<&str>) -> Option<Decimal> {
    let whole_digits: String = whole.chars().filter(char::is_ascii_digit).collect();
    if whole_digits.is_empty() {
        return None;
    }

    let fraction_digits = fraction
        .map(|f| f.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "00".to_string());

    Decimal::from_str(&format!("{whole_digits}.{fraction_digits}")).ok()
}
