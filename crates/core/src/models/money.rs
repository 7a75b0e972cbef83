use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Weeks per month under the fixed 365.25-day convention.
pub const WEEKS_PER_MONTH: f64 = 4.345;

/// Days per month under the same convention.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Cadence of a recurring money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Fixed factor converting one amount at this cadence into its
    /// monthly equivalent.
    #[must_use]
    pub fn monthly_multiplier(self) -> f64 {
        match self {
            Frequency::Daily => DAYS_PER_MONTH,
            Frequency::Weekly => WEEKS_PER_MONTH,
            Frequency::Biweekly => 2.1725,
            Frequency::Monthly => 1.0,
            Frequency::Yearly => 1.0 / 12.0,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(CoreError::unknown("frequency", s)),
        }
    }
}

/// Normalize an amount at `frequency` to its monthly equivalent.
///
/// No rounding happens here; see [`round_to_cents`] for presentation.
#[must_use]
pub fn to_monthly(amount: f64, frequency: Frequency) -> f64 {
    amount * frequency.monthly_multiplier()
}

/// A money amount paired with the cadence it recurs at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyAmount {
    pub amount: f64,
    pub frequency: Frequency,
}

impl MoneyAmount {
    pub fn new(amount: f64, frequency: Frequency) -> Self {
        Self { amount, frequency }
    }

    pub fn monthly(amount: f64) -> Self {
        Self::new(amount, Frequency::Monthly)
    }

    #[must_use]
    pub fn to_monthly(&self) -> f64 {
        to_monthly(self.amount, self.frequency)
    }

    /// Finite and strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        is_positive_amount(self.amount)
    }
}

/// The amount predicate shared by income validation and the expense filter.
#[must_use]
pub fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parse a form-entered amount such as `"1,200.50"` or `"$ 40"`.
///
/// Returns `None` for empty or non-numeric text.
#[must_use]
pub fn parse_amount_input(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to two decimal places for display.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
