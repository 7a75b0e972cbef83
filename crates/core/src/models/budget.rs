use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::money::{is_positive_amount, round_to_cents, to_monthly, Frequency};
use crate::errors::CoreError;

/// How much of monthly income is set aside as savings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsGoal {
    /// 10% of income
    Light,
    /// 20% of income
    #[default]
    Moderate,
    /// 30% of income
    Aggressive,
}

impl SavingsGoal {
    #[must_use]
    pub fn rate(self) -> f64 {
        match self {
            SavingsGoal::Light => 0.10,
            SavingsGoal::Moderate => 0.20,
            SavingsGoal::Aggressive => 0.30,
        }
    }
}

impl std::fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavingsGoal::Light => write!(f, "light"),
            SavingsGoal::Moderate => write!(f, "moderate"),
            SavingsGoal::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for SavingsGoal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(SavingsGoal::Light),
            "moderate" => Ok(SavingsGoal::Moderate),
            "aggressive" => Ok(SavingsGoal::Aggressive),
            _ => Err(CoreError::unknown("savings goal", s)),
        }
    }
}

/// One row of the expense form.
///
/// `amount` is `None` when the user typed something non-numeric. Such rows,
/// and rows with a zero or negative amount, stay in the list but are left
/// out of every total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: Uuid,
    pub category: String,
    pub amount: Option<f64>,
    pub frequency: Frequency,
}

impl ExpenseEntry {
    /// Create a new entry. The category must not be blank.
    pub fn new(
        category: impl Into<String>,
        amount: Option<f64>,
        frequency: Frequency,
    ) -> Result<Self, CoreError> {
        let category = validate_category(category.into())?;
        Ok(Self {
            id: Uuid::new_v4(),
            category,
            amount,
            frequency,
        })
    }

    /// Monthly-normalized amount, or `None` if this row does not count.
    #[must_use]
    pub fn countable_monthly(&self) -> Option<f64> {
        self.amount
            .filter(|a| is_positive_amount(*a))
            .map(|a| to_monthly(a, self.frequency))
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Result<(), CoreError> {
        self.category = validate_category(category.into())?;
        Ok(())
    }
}

fn validate_category(category: String) -> Result<String, CoreError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Expense category must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Immutable result of one forecast calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetForecast {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub daily_spendable: f64,
    pub weekly_spendable: f64,
    pub monthly_spendable: f64,
    pub monthly_savings: f64,
    pub yearly_savings: f64,
}

impl BudgetForecast {
    /// Spending exceeds what is left after savings.
    #[must_use]
    pub fn is_overspending(&self) -> bool {
        self.monthly_spendable < 0.0
    }

    /// Copy with every figure rounded to cents, for display.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            monthly_income: round_to_cents(self.monthly_income),
            monthly_expenses: round_to_cents(self.monthly_expenses),
            daily_spendable: round_to_cents(self.daily_spendable),
            weekly_spendable: round_to_cents(self.weekly_spendable),
            monthly_spendable: round_to_cents(self.monthly_spendable),
            monthly_savings: round_to_cents(self.monthly_savings),
            yearly_savings: round_to_cents(self.yearly_savings),
        }
    }
}
