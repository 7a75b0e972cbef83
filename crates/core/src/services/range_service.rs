use chrono::NaiveDate;
use tracing::debug;

use crate::models::price::{days_before, is_renderable, PricePoint, TimeRange};
use crate::random::RandomSource;
use crate::services::history_service::HistoryService;

/// Markdown applied to the only retained point when a second point has to
/// be invented at the cutoff.
const CUTOFF_MARKDOWN: f64 = 0.98;

/// Ways to turn a too-short filtered window into a renderable one, tried
/// in [`RECOVERY_LADDER`] order until the window has enough points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Prepend the last stored point dated strictly before the cutoff.
    PrependPredecessor,
    /// Add a point at the cutoff worth 98% of the window's first point.
    SynthesizeAtCutoff,
}

pub const RECOVERY_LADDER: [Recovery; 2] =
    [Recovery::PrependPredecessor, Recovery::SynthesizeAtCutoff];

impl Recovery {
    /// Apply this rung to `window`, the points of `full` retained for a
    /// range starting at `cutoff`.
    #[must_use]
    pub fn apply(
        self,
        full: &[PricePoint],
        cutoff: NaiveDate,
        mut window: Vec<PricePoint>,
    ) -> Vec<PricePoint> {
        match self {
            Recovery::PrependPredecessor => {
                if let Some(prev) = full.iter().rev().find(|p| p.date < cutoff) {
                    window.insert(0, *prev);
                }
                window
            }
            Recovery::SynthesizeAtCutoff => {
                let Some(first) = window.first().copied() else {
                    return window;
                };
                let value = first.value * CUTOFF_MARKDOWN;
                if first.date < cutoff {
                    // the window holds only a predecessor; the cutoff comes after it
                    window.push(PricePoint::new(cutoff, value));
                } else {
                    let date = if first.date > cutoff {
                        cutoff
                    } else {
                        days_before(cutoff, 1)
                    };
                    window.insert(0, PricePoint::new(date, value));
                }
                window
            }
        }
    }
}

/// Narrows stored portfolio history to a display range, always returning
/// something a chart can draw.
pub struct RangeService {
    history_service: HistoryService,
}

impl RangeService {
    pub fn new(history_service: HistoryService) -> Self {
        Self { history_service }
    }

    /// Filter `history` to `range` as of `today`.
    ///
    /// - Empty history: synthesize a series for `total_value`.
    /// - `ALL`: the stored history as-is, provided it is renderable.
    /// - Otherwise keep points on or after the range start, then walk the
    ///   recovery ladder while fewer than two points remain.
    /// - If even that fails, synthesize a series for `total_value`.
    pub fn filter_to_range<R: RandomSource + ?Sized>(
        &self,
        history: &[PricePoint],
        total_value: f64,
        range: TimeRange,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<PricePoint> {
        if history.is_empty() {
            debug!(range = %range, "No stored history, synthesizing");
            return self
                .history_service
                .generate_portfolio_history(total_value, range, today, rng);
        }

        if range == TimeRange::All && is_renderable(history) {
            return history.to_vec();
        }

        let cutoff = range.start_date(today);
        let mut window: Vec<PricePoint> = history
            .iter()
            .filter(|p| p.date >= cutoff)
            .copied()
            .collect();

        for rung in RECOVERY_LADDER {
            if is_renderable(&window) {
                break;
            }
            debug!(range = %range, ?rung, points = window.len(), "Window too short, recovering");
            window = rung.apply(history, cutoff, window);
        }

        if is_renderable(&window) {
            return window;
        }

        debug!(range = %range, "Recovery ladder exhausted, synthesizing");
        self.history_service
            .generate_portfolio_history(total_value, range, today, rng)
    }
}
