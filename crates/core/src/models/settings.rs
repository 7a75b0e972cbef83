use serde::{Deserialize, Serialize};

use super::holding::HoldingType;
use crate::errors::CoreError;

/// Tunables for the synthetic series generators and the breakdown chart.
///
/// Missing keys in a JSON document take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Number of daily points synthesized for a holding without history.
    pub holding_history_days: u32,

    pub stock_volatility: f64,
    pub etf_volatility: f64,
    pub crypto_volatility: f64,

    /// Largest single-day move of a synthesized portfolio series, as a
    /// fraction of `max(|current value|, 1000)`.
    pub portfolio_step_scale: f64,

    /// Hex colours for breakdown slices, used round-robin.
    pub chart_palette: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            holding_history_days: 7,
            stock_volatility: 0.02,
            etf_volatility: 0.015,
            crypto_volatility: 0.05,
            portfolio_step_scale: 0.02,
            chart_palette: [
                "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#EC4899",
                "#84CC16",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.holding_history_days < 2 {
            return Err(CoreError::InvalidSettings(format!(
                "holdingHistoryDays must be at least 2, got {}",
                self.holding_history_days
            )));
        }
        for (name, v) in [
            ("stockVolatility", self.stock_volatility),
            ("etfVolatility", self.etf_volatility),
            ("cryptoVolatility", self.crypto_volatility),
        ] {
            if !(v > 0.0 && v < 1.0) {
                return Err(CoreError::InvalidSettings(format!(
                    "{name} must be between 0 and 1 (exclusive), got {v}"
                )));
            }
        }
        if !(self.portfolio_step_scale.is_finite() && self.portfolio_step_scale > 0.0) {
            return Err(CoreError::InvalidSettings(format!(
                "portfolioStepScale must be positive, got {}",
                self.portfolio_step_scale
            )));
        }
        if self.chart_palette.is_empty() {
            return Err(CoreError::InvalidSettings(
                "chartPalette must contain at least one colour".into(),
            ));
        }
        Ok(())
    }

    /// Volatility used when synthesizing history for this kind of holding.
    #[must_use]
    pub fn volatility_for(&self, holding_type: HoldingType) -> f64 {
        match holding_type {
            HoldingType::Stock => self.stock_volatility,
            HoldingType::Etf => self.etf_volatility,
            HoldingType::Crypto => self.crypto_volatility,
        }
    }
}
