use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::budget::{BudgetForecast, ExpenseEntry, SavingsGoal};
use crate::models::money::{MoneyAmount, DAYS_PER_MONTH, WEEKS_PER_MONTH};

/// Turns income, expenses and a savings goal into spendable amounts.
///
/// Pure business logic with no I/O or hidden state. The same inputs always
/// produce a bit-identical forecast.
pub struct ForecastService;

impl ForecastService {
    pub fn new() -> Self {
        Self
    }

    /// Compute a forecast.
    ///
    /// Steps:
    /// 1. Normalize income to monthly
    /// 2. Sum monthly-normalized expenses, skipping rows without a positive amount
    /// 3. Savings = income × goal rate
    /// 4. Spendable = income − expenses − savings (negative means overspending)
    /// 5. Weekly / daily spendable use the same fixed month divisors
    ///
    /// Income must be a finite amount greater than zero; otherwise a
    /// validation error is returned and no forecast is produced.
    pub fn calculate(
        &self,
        income: &MoneyAmount,
        expenses: &[ExpenseEntry],
        goal: SavingsGoal,
    ) -> Result<BudgetForecast, CoreError> {
        if !income.is_positive() {
            return Err(CoreError::ValidationError(
                "Please enter a valid income amount greater than zero".into(),
            ));
        }

        let monthly_income = income.to_monthly();
        let monthly_expenses = self.monthly_expenses(expenses);
        let monthly_savings = monthly_income * goal.rate();
        let monthly_spendable = monthly_income - monthly_expenses - monthly_savings;

        let forecast = BudgetForecast {
            monthly_income,
            monthly_expenses,
            daily_spendable: monthly_spendable / DAYS_PER_MONTH,
            weekly_spendable: monthly_spendable / WEEKS_PER_MONTH,
            monthly_spendable,
            monthly_savings,
            yearly_savings: monthly_savings * 12.0,
        };

        info!(
            monthly_income,
            monthly_expenses,
            monthly_spendable,
            goal = %goal,
            "Budget forecast computed"
        );
        Ok(forecast)
    }

    /// Sum of monthly-normalized expenses that carry a positive amount.
    #[must_use]
    pub fn monthly_expenses(&self, expenses: &[ExpenseEntry]) -> f64 {
        let mut total = 0.0;
        let mut skipped = 0usize;
        for entry in expenses {
            match entry.countable_monthly() {
                Some(monthly) => total += monthly,
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "Expense rows without a positive amount left out of totals");
        }
        total
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}
