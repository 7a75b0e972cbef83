use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::price::PricePoint;
use crate::errors::CoreError;

/// The kind of instrument a holding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingType {
    Stock,
    Etf,
    Crypto,
}

impl HoldingType {
    /// Stocks and ETFs are shown together; crypto gets its own list.
    #[must_use]
    pub fn is_equity(self) -> bool {
        matches!(self, HoldingType::Stock | HoldingType::Etf)
    }
}

impl std::fmt::Display for HoldingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingType::Stock => write!(f, "stock"),
            HoldingType::Etf => write!(f, "etf"),
            HoldingType::Crypto => write!(f, "crypto"),
        }
    }
}

impl FromStr for HoldingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(HoldingType::Stock),
            "etf" => Ok(HoldingType::Etf),
            "crypto" => Ok(HoldingType::Crypto),
            _ => Err(CoreError::unknown("holding type", s)),
        }
    }
}

/// A position in the portfolio.
///
/// `value` is always `quantity × current_price`. It is not read back from
/// stored data and is recomputed by every setter, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL", "VTI", "BTC")
    pub ticker: String,

    pub name: String,

    #[serde(rename = "type")]
    pub holding_type: HoldingType,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub current_price: f64,

    #[serde(default, skip_deserializing)]
    value: f64,

    #[serde(default)]
    pub change_percent_today: f64,

    /// Recent daily prices; synthesized when fewer than two are stored.
    #[serde(default, rename = "priceHistory7d", alias = "priceHistory")]
    pub price_history: Vec<PricePoint>,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        holding_type: HoldingType,
        quantity: f64,
        current_price: f64,
    ) -> Self {
        let mut holding = Self {
            ticker: ticker.into().trim().to_uppercase(),
            name: name.into(),
            holding_type,
            quantity,
            current_price,
            value: 0.0,
            change_percent_today: 0.0,
            price_history: Vec::new(),
        };
        holding.recompute_value();
        holding
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.recompute_value();
    }

    pub fn set_current_price(&mut self, price: f64) {
        self.current_price = price;
        self.recompute_value();
    }

    /// Re-derive `value` after fields were filled in directly
    /// (deserialization, struct update).
    pub fn recompute_value(&mut self) {
        self.value = self.quantity * self.current_price;
    }
}
