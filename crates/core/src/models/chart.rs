use serde::{Deserialize, Serialize};

/// Label of the savings slice in the budget breakdown.
pub const SAVINGS_LABEL: &str = "Savings";

/// Label of the leftover-spending slice in the budget breakdown.
pub const DISCRETIONARY_LABEL: &str = "Discretionary";

/// One slice of the budget breakdown chart.
///
/// The core computes the numbers; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// Expense category, `Savings` or `Discretionary`
    pub label: String,

    /// Monthly-normalized amount (never negative)
    pub value: f64,

    /// Position in the colour palette, assigned round-robin by slice order
    pub color_index: usize,

    /// Share of the whole chart, in percent
    pub share_pct: f64,
}
