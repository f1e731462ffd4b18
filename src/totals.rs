//! # Totals
//!
//! Pure computation of per-item and grand totals, plus locale-aware
//! formatting of amounts.
//!
//! Totals are never cached: every read derives them again from the current
//! items, so they cannot drift from the document.

use serde::{Deserialize, Serialize};

use crate::document::{ItemId, LineItem};

/// Sum of all item totals, accumulated left to right from zero.
///
/// A sum that overflows to infinity is reported as 0, the same as an
/// overflowing line total.
pub fn grand_total(items: &[LineItem]) -> f64 {
    let sum = items.iter().fold(0.0, |sum, item| sum + item.total());
    if sum.is_finite() { sum } else { 0.0 }
}

/// Totals derived from a sequence of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub items: Vec<ItemTotal>,
    pub grand_total: f64,
}

/// Total of one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemTotal {
    pub id: ItemId,
    pub total: f64,
}

impl Totals {
    pub fn compute(items: &[LineItem]) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| ItemTotal {
                    id: item.id(),
                    total: item.total(),
                })
                .collect(),
            grand_total: grand_total(items),
        }
    }
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    /// `$50,000`
    Prefix,
    /// `50 000 ₽`
    Suffix,
}

/// Number and currency formatting conventions.
///
/// The default follows the Russian convention: digits grouped by a
/// no-break space, comma as decimal separator, ruble sign after the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub max_fraction_digits: u8,
    pub currency: String,
    pub currency_position: CurrencyPosition,
}

impl Default for Locale {
    fn default() -> Self {
        Self::ru()
    }
}

impl Locale {
    pub fn ru() -> Self {
        Self {
            thousands_separator: '\u{00A0}',
            decimal_separator: ',',
            max_fraction_digits: 3,
            currency: "\u{20BD}".to_string(),
            currency_position: CurrencyPosition::Suffix,
        }
    }

    pub fn en_us() -> Self {
        Self {
            thousands_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: 3,
            currency: "$".to_string(),
            currency_position: CurrencyPosition::Prefix,
        }
    }

    /// Format a number with grouping and at most `max_fraction_digits`
    /// fraction digits (trailing zeros dropped).
    pub fn format_number(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let digits = self.max_fraction_digits as usize;

        let exact = format!("{:.*}", digits, value.abs());
        let (int_part, frac_part) = exact.split_once('.').unwrap_or((&exact, ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut out = String::with_capacity(exact.len() + exact.len() / 3);
        if value < 0.0 && exact.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.thousands_separator));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }

        out
    }

    /// Format an amount with the currency symbol.
    pub fn format_amount(&self, value: f64) -> String {
        let number = self.format_number(value);
        if self.currency.is_empty() {
            return number;
        }
        match self.currency_position {
            CurrencyPosition::Prefix => format!("{}{}", self.currency, number),
            CurrencyPosition::Suffix => format!("{} {}", number, self.currency),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
