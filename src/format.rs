//! Display helpers for the stats panel and chart labels.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{CURRENCY_SUFFIX, MONTH_NAMES};

// ---------------------------------------------------------------------------
// Period: Year-month key
// ---------------------------------------------------------------------------

/// Calendar month parsed from a `YYYY-MM` key. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Parse `YYYY-MM`, also accepting a trailing day or time
    /// (`YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`).
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        let year_part = key.get(..4)?;
        if key.get(4..5)? != "-" {
            return None;
        }
        let month_part = key.get(5..7)?;
        if let Some(rest) = key.get(7..) {
            if !rest.is_empty() && !rest.starts_with('-') {
                return None;
            }
        }
        if !year_part.bytes().all(|b| b.is_ascii_digit())
            || !month_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let year = year_part.parse().ok()?;
        let month = month_part.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn month_name(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i))
            .copied()
            .unwrap_or("?")
    }
}

impl fmt::Display for Period {
    /// `Январь 2024`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Calendar label for a period key, or the key itself when it is not a
/// valid `YYYY-MM`.
pub fn month_label(key: &str) -> String {
    Period::parse(key)
        .map(|p| p.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Sort key placing valid periods chronologically and malformed keys last.
pub fn chronological_key(key: &str) -> (bool, Option<Period>, &str) {
    let period = Period::parse(key);
    (period.is_none(), period, key)
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Pick the Russian noun form agreeing with the cardinal `n`.
pub fn plural_ru<'a>(n: i64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let n10 = n.rem_euclid(10);
    let n100 = n.rem_euclid(100);
    if n10 == 1 && n100 != 11 {
        one
    } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
        few
    } else {
        many
    }
}

/// Render a day count as words: `1 день`, `3 дня`, `11 дней`.
///
/// The count is rounded half-to-even before pluralization, so `2.5` becomes
/// `2 дня`.
pub fn format_days(days: f64) -> String {
    let n = days.round_ties_even() as i64;
    format!("{} {}", n, plural_ru(n, "день", "дня", "дней"))
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Render an amount with no decimals, comma thousands separators and the
/// ruble suffix: `150,000 ₽`.
///
/// Kopecks are rounded half-to-even, like [`format_days`].
pub fn format_rub(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i128()
        .unwrap_or_default();
    format!("{} {}", group_thousands(rounded), CURRENCY_SUFFIX)
}

fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
