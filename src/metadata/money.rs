//! Monetary amounts held as integer cents.
//!
//! Amounts arrive as JSON numbers (`12000`, `1250.5`) or as display strings
//! (`"$12,000"`). Parsing goes through the decimal text so no binary float
//! rounding ever reaches a rendered total.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of fractional digits an amount may carry.
const MAX_FRACTION_DIGITS: usize = 2;

/// A non-negative monetary amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Build an amount from whole cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole dollars, saturating on overflow.
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// The amount in cents.
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Whole-dollar part of the amount.
    pub const fn whole_dollars(self) -> u64 {
        self.0 / 100
    }

    /// Remaining cents after the whole dollars.
    pub const fn remainder_cents(self) -> u64 {
        self.0 % 100
    }

    /// Add two amounts, clamping at the maximum representable value.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse an amount from its decimal text form.
    ///
    /// Accepts an optional leading `$`, thousands separators and up to two
    /// fractional digits (trailing zeros beyond that are ignored).
    ///
    /// # Errors
    ///
    /// Returns a description of the problem for negative, empty, exponent-form
    /// or over-precise input.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if unsigned.starts_with('-') {
            return Err(format!("monetary value must be non-negative, got {raw:?}"));
        }
        let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return Err("monetary value is empty".to_owned());
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction.trim_end_matches('0')),
            None => (cleaned.as_str(), ""),
        };
        let whole = if whole.is_empty() { "0" } else { whole };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(format!("invalid monetary value {raw:?}"));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(format!(
                "monetary value {raw:?} has more than {MAX_FRACTION_DIGITS} decimal places"
            ));
        }

        let dollars: u64 = whole
            .parse()
            .map_err(|_| format!("monetary value {raw:?} is out of range"))?;
        let fraction_cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction
                .parse::<u64>()
                .map(|tenths| tenths.saturating_mul(10))
                .map_err(|_| format!("invalid monetary value {raw:?}"))?,
            _ => fraction
                .parse()
                .map_err(|_| format!("invalid monetary value {raw:?}"))?,
        };

        dollars
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self)
            .ok_or_else(|| format!("monetary value {raw:?} is out of range"))
    }
}

impl std::fmt::Display for Money {
    /// Plain decimal form without currency symbol or separators.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.remainder_cents() == 0 {
            write!(f, "{}", self.whole_dollars())
        } else {
            write!(f, "{}.{:02}", self.whole_dollars(), self.remainder_cents())
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(number) => number.to_string(),
            RawAmount::Text(text) => text,
        };
        if text.contains(['e', 'E']) {
            return Err(serde::de::Error::custom(format!(
                "monetary value {text:?} must not use exponent notation"
            )));
        }
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
