use serde::{Deserialize, Serialize};

use super::holding::Holding;
use super::price::PricePoint;

/// A bank, brokerage or wallet account shown next to the holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            institution: String::new(),
            account_type: String::new(),
            balance,
        }
    }
}

/// The investments view of a session.
///
/// Loaded once from stored session data, held in memory, and handed back
/// for write-back after holdings or accounts change. Every field falls back
/// to empty when missing from the stored blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub change_percent: f64,
    pub history: Vec<PricePoint>,
    pub holdings: Vec<Holding>,
    pub accounts: Vec<Account>,
}

impl PortfolioSnapshot {
    /// Sum of all holding values.
    #[must_use]
    pub fn holdings_value(&self) -> f64 {
        self.holdings.iter().map(Holding::value).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty() && self.accounts.is_empty() && self.history.is_empty()
    }
}
