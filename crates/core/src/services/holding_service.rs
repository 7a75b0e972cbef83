use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::holding::Holding;
use crate::models::price::is_renderable;
use crate::models::settings::EngineSettings;
use crate::random::RandomSource;
use crate::services::history_service::HistoryService;

/// Holdings split for display. Borrows from the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingPartition<'a> {
    /// Stocks and ETFs
    pub equities: Vec<&'a Holding>,
    pub crypto: Vec<&'a Holding>,
}

/// Recomputes derived holding fields and orders holdings for display.
pub struct HoldingService {
    history_service: HistoryService,
    settings: EngineSettings,
}

impl HoldingService {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            history_service: HistoryService::new(settings.portfolio_step_scale),
            settings,
        }
    }

    /// Uppercase tickers, recompute `value`, synthesize a short history for
    /// holdings with fewer than two stored prices, and sort by value
    /// (largest first).
    pub fn aggregate<R: RandomSource + ?Sized>(
        &self,
        mut holdings: Vec<Holding>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<Holding> {
        for holding in &mut holdings {
            holding.ticker = holding.ticker.trim().to_uppercase();
            holding.recompute_value();
            if !is_renderable(&holding.price_history) {
                self.refresh_history(holding, today, rng);
            }
        }
        sort_by_value(&mut holdings);
        holdings
    }

    /// Replace a holding's price history with a synthesized one.
    pub fn refresh_history<R: RandomSource + ?Sized>(
        &self,
        holding: &mut Holding,
        today: NaiveDate,
        rng: &mut R,
    ) {
        let price = if holding.current_price.is_finite() {
            holding.current_price.max(0.0)
        } else {
            0.0
        };
        let volatility = self.settings.volatility_for(holding.holding_type);
        match self.history_service.generate_history(
            price,
            self.settings.holding_history_days,
            volatility,
            today,
            rng,
        ) {
            Ok(points) => {
                debug!(ticker = %holding.ticker, points = points.len(), "Synthesized holding history");
                holding.price_history = points;
            }
            Err(e) => warn!(ticker = %holding.ticker, error = %e, "Could not synthesize holding history"),
        }
    }

    /// Split holdings into equities (stock + ETF) and crypto, keeping order.
    #[must_use]
    pub fn partition<'a>(&self, holdings: &'a [Holding]) -> HoldingPartition<'a> {
        let (equities, crypto): (Vec<&Holding>, Vec<&Holding>) = holdings
            .iter()
            .partition(|h| h.holding_type.is_equity());
        HoldingPartition { equities, crypto }
    }
}

/// Sort holdings by value, largest first.
pub fn sort_by_value(holdings: &mut [Holding]) {
    holdings.sort_by(|a, b| {
        b.value()
            .partial_cmp(&a.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
