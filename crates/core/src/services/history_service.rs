use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::price::{days_after, days_before, PricePoint, TimeRange, MIN_RENDERABLE_POINTS};
use crate::random::RandomSource;

/// Start of a synthesized portfolio series, as a fraction of the current value.
const SEED_MULTIPLIER_RANGE: (f64, f64) = (0.8, 0.95);

/// Probability that a synthesized portfolio step moves up.
const UP_PROBABILITY: f64 = 0.51;

/// Smallest magnitude a portfolio step is scaled from, so tiny or zero
/// portfolios still move visibly.
const MIN_STEP_BASE: f64 = 1000.0;

/// Centre of the per-step draw for holding prices; 0.49 instead of 0.5
/// tilts the walk slightly upwards.
const STEP_CENTER: f64 = 0.49;

/// Synthesizes placeholder price histories when stored history is missing.
///
/// Output is illustrative only. What is guaranteed: the last point equals
/// the current value exactly, dates are one per day and ascending, and
/// values never cross zero.
pub struct HistoryService {
    step_scale: f64,
}

impl HistoryService {
    pub fn new(step_scale: f64) -> Self {
        Self { step_scale }
    }

    /// Generate `days` daily prices ending on `today` at `current_value`.
    ///
    /// The series starts up to `volatility × days × 0.2` (as a fraction)
    /// away from the current value, then moves multiplicatively by at most
    /// `±volatility` per day, floored at zero.
    pub fn generate_history<R: RandomSource + ?Sized>(
        &self,
        current_value: f64,
        days: u32,
        volatility: f64,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if !(current_value.is_finite() && current_value >= 0.0) {
            return Err(CoreError::InvalidArgument(format!(
                "current value must be a non-negative number, got {current_value}"
            )));
        }
        if days == 0 {
            return Err(CoreError::InvalidArgument(
                "history must span at least one day".into(),
            ));
        }
        if !(volatility > 0.0 && volatility < 1.0) {
            return Err(CoreError::InvalidArgument(format!(
                "volatility must be between 0 and 1 (exclusive), got {volatility}"
            )));
        }

        let spread = volatility * f64::from(days) * 0.2;
        let mut value = (current_value * (1.0 + (rng.next_f64() * 2.0 - 1.0) * spread)).max(0.0);

        let first_day = days_before(today, u64::from(days - 1));
        let mut points = Vec::with_capacity(days as usize);

        for i in 0..days {
            let date = days_after(first_day, u64::from(i));
            if i == days - 1 {
                value = current_value;
            } else if i > 0 {
                let change = (rng.next_f64() - STEP_CENTER) * 2.0 * volatility;
                value = (value * (1.0 + change)).max(0.0);
            }
            points.push(PricePoint::new(date, value));
        }

        Ok(points)
    }

    /// Generate a daily portfolio series covering `range` and ending on
    /// `today` at exactly `current_value`.
    ///
    /// The walk starts at 80–95% of the current value and takes additive
    /// steps scaled from `max(|current_value|, 1000)`, slightly more often
    /// up than down. It never crosses zero away from the sign of
    /// `current_value`: such steps are clamped to zero. At least two points
    /// are always returned.
    pub fn generate_portfolio_history<R: RandomSource + ?Sized>(
        &self,
        current_value: f64,
        range: TimeRange,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<PricePoint> {
        let current_value = if current_value.is_finite() {
            current_value
        } else {
            warn!(current_value, "Non-finite portfolio value, synthesizing around zero");
            0.0
        };

        let start = range.start_date(today);
        let day_count = (today - start).num_days().max(0) as u64 + 1;

        let seed = current_value * rng.next_range(SEED_MULTIPLIER_RANGE.0, SEED_MULTIPLIER_RANGE.1);
        let step_base = current_value.abs().max(MIN_STEP_BASE) * self.step_scale;

        let mut value = seed;
        let mut points = Vec::with_capacity(day_count as usize + 1);

        for i in 0..day_count {
            let date = days_after(start, i);
            if i == day_count - 1 {
                value = current_value;
            } else if i > 0 {
                let magnitude = rng.next_f64() * step_base;
                let step = if rng.chance(UP_PROBABILITY) {
                    magnitude
                } else {
                    -magnitude
                };
                value = clamp_to_sign(value + step, current_value);
            }
            points.push(PricePoint::new(date, value));
        }

        if points.len() < MIN_RENDERABLE_POINTS {
            debug!(range = %range, "Single-day range, prepending the prior day");
            points.insert(0, PricePoint::new(days_before(start, 1), seed));
        }

        points
    }
}

/// Keep `value` on the same side of zero as `anchor`.
fn clamp_to_sign(value: f64, anchor: f64) -> f64 {
    if anchor >= 0.0 {
        value.max(0.0)
    } else {
        value.min(0.0)
    }
}
