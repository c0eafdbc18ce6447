//! Money type for offer prices.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues. Landing pages quote prices in the storefront's
//! single display currency, so no currency dimension is carried here.
//!
//! Admin-authored prices arrive as display strings (`"$19.99"`,
//! `"19.99"`) and CTA button copy may embed a price in free text
//! (`"Order now for $19.99"`); both forms are parsed here. Malformed
//! input parses to `None` and callers fall back to their documented
//! defaults instead of failing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// A zero amount.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$19.99").
    pub fn display(&self) -> String {
        format!("${:.2}", self.to_decimal())
    }

    /// Parse an admin-authored price string.
    ///
    /// Accepts a bare decimal or a `$`-prefixed one, with surrounding
    /// whitespace. Anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^\s*\$?\s*([0-9]+(?:\.[0-9]{1,2})?)\s*$").expect("valid price regex")
        });
        let caps = re.captures(input)?;
        caps[1].parse::<f64>().ok().map(Self::from_decimal)
    }

    /// Extract the first `$`-prefixed price embedded in free text.
    ///
    /// Used against CTA button copy such as `"Order now, only $19.99"`.
    pub fn extract(text: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"\$\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("valid price regex")
        });
        let caps = re.captures(text)?;
        caps[1].parse::<f64>().ok().map(Self::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
