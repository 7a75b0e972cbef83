use crate::models::budget::{BudgetForecast, ExpenseEntry};
use crate::models::chart::{BreakdownEntry, DISCRETIONARY_LABEL, SAVINGS_LABEL};

/// Generates chart-ready data sets from a budget forecast.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService {
    palette_len: usize,
}

impl ChartService {
    pub fn new(palette_len: usize) -> Self {
        Self {
            palette_len: palette_len.max(1),
        }
    }

    /// Build the monthly budget breakdown.
    ///
    /// One slice per expense category (rows without a positive amount are
    /// skipped, repeated categories are merged in first-seen order), then
    /// `Savings`, then `Discretionary` only when spendable money is left.
    /// Slices never carry a negative value.
    #[must_use]
    pub fn to_breakdown(
        &self,
        expenses: &[ExpenseEntry],
        forecast: &BudgetForecast,
    ) -> Vec<BreakdownEntry> {
        let mut slices: Vec<(String, f64)> = Vec::new();
        for entry in expenses {
            let Some(monthly) = entry.countable_monthly() else {
                continue;
            };
            match slices.iter_mut().find(|(label, _)| *label == entry.category) {
                Some((_, value)) => *value += monthly,
                None => slices.push((entry.category.clone(), monthly)),
            }
        }

        slices.push((SAVINGS_LABEL.to_string(), forecast.monthly_savings));
        if forecast.monthly_spendable > 0.0 {
            slices.push((DISCRETIONARY_LABEL.to_string(), forecast.monthly_spendable));
        }

        let total: f64 = slices.iter().map(|(_, v)| *v).sum();

        slices
            .into_iter()
            .enumerate()
            .map(|(idx, (label, value))| BreakdownEntry {
                label,
                value,
                color_index: idx % self.palette_len,
                share_pct: if total > 0.0 {
                    (value / total) * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}
