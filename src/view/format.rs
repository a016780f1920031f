//! Display formatting for amounts, percentages, and the month header.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::{BudgetSnapshot, EntryKind, Percentage};

const PERCENTAGE_PLACEHOLDER: &str = "---";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Separators used when rendering amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

/// Renders `value` as `+ 1,234.00` for income or `- 1,234.00` for expenses.
///
/// The sign comes from `kind`; the magnitude is always the absolute value.
pub fn format_amount(value: f64, kind: EntryKind, format: &NumberFormat) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = match kind {
        EntryKind::Income => '+',
        EntryKind::Expense => '-',
    };
    format!(
        "{sign} {}{}{dec_part}",
        group_thousands(int_part, format.grouping_separator),
        format.decimal_separator
    )
}

/// The budget headline: income style only when strictly positive.
pub fn format_budget(snapshot: &BudgetSnapshot, format: &NumberFormat) -> String {
    let kind = if snapshot.budget > 0.0 {
        EntryKind::Income
    } else {
        EntryKind::Expense
    };
    format_amount(snapshot.budget, kind, format)
}

/// `NN%` for positive percentages, a placeholder for zero or undefined.
pub fn percentage_label(percentage: Percentage) -> String {
    match percentage.value() {
        Some(value) if value > 0 => format!("{value}%"),
        _ => PERCENTAGE_PLACEHOLDER.to_string(),
    }
}

pub fn month_label(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{month} {}", date.year())
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
