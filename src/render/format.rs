//! Currency, percentage and label formatting.

use crate::metadata::Money;

/// Format an amount as US-style currency: `$30,000` or `$1,250.50`.
pub fn format_currency(amount: Money) -> String {
    let dollars = group_thousands(amount.whole_dollars());
    match amount.remainder_cents() {
        0 => format!("${dollars}"),
        cents => format!("${dollars}.{cents:02}"),
    }
}

/// Insert `,` separators every three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (index, ch) in digits.chars().enumerate() {
        let remaining = len.saturating_sub(index);
        if index > 0 && remaining % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage given in basis points: `15000` → `150%`, `1250` → `12.5%`.
pub fn format_percent(basis_points: i64) -> String {
    let sign = if basis_points < 0 { "-" } else { "" };
    let magnitude = basis_points.unsigned_abs();
    let whole = group_thousands(magnitude / 100);
    let fraction = magnitude % 100;
    if fraction == 0 {
        format!("{sign}{whole}%")
    } else if fraction % 10 == 0 {
        format!("{sign}{whole}.{}%", fraction / 10)
    } else {
        format!("{sign}{whole}.{fraction:02}%")
    }
}

/// Return on investment in basis points, computed from integer cents.
///
/// Returns `None` when the investment is zero or the result does not fit.
pub fn roi_basis_points(investment: Money, revenue: Money) -> Option<i64> {
    if investment.cents() == 0 {
        return None;
    }
    let invested = i128::from(investment.cents());
    let gain = i128::from(revenue.cents()).checked_sub(invested)?;
    let scaled = gain.checked_mul(10_000)?.checked_div(invested)?;
    i64::try_from(scaled).ok()
}

/// Show a free-text rate with a trailing `%`.
pub fn format_rate(rate: &str) -> String {
    let trimmed = rate.trim();
    if trimmed.ends_with('%') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}%")
    }
}

/// Turn a snake_case key into a heading: `paid_social` → `Paid Social`,
/// `month_1_3` → `Month 1-3`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous_numeric = false;
    for token in key.split(['_', '-', ' ']).filter(|t| !t.is_empty()) {
        let numeric = token.chars().all(|c| c.is_ascii_digit());
        if numeric && previous_numeric {
            if let Some(last) = words.last_mut() {
                last.push('-');
                last.push_str(token);
                continue;
            }
        }
        previous_numeric = numeric;
        words.push(capitalize(token));
    }
    words.join(" ")
}

/// Lowercase id fragment: ASCII alphanumerics kept, everything else becomes `-`.
pub fn anchor_slug(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    for ch in key.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
