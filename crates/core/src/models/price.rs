use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Fewest points a chart needs to draw a line or area.
pub const MIN_RENDERABLE_POINTS: usize = 2;

/// A single (date → value) sample of a price or portfolio series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// True when `points` has enough samples for a chart to draw.
#[must_use]
pub fn is_renderable(points: &[PricePoint]) -> bool {
    points.len() >= MIN_RENDERABLE_POINTS
}

/// True when dates never go backwards.
#[must_use]
pub fn is_chronological(points: &[PricePoint]) -> bool {
    points.windows(2).all(|w| w[0].date <= w[1].date)
}

/// `date` minus `days` calendar days, saturating at the earliest
/// representable date.
#[must_use]
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// `date` plus `days` calendar days, saturating at the latest
/// representable date.
#[must_use]
pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Display window applied to a series on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "YTD")]
    YearToDate,
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 5] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::YearToDate,
        TimeRange::All,
    ];

    /// First calendar day covered by this range when the window ends on `today`.
    ///
    /// `ALL` has no natural start for synthesized data and spans one year.
    /// Month arithmetic clamps to the end of shorter months (Mar 31 → Feb 28).
    #[must_use]
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        match self {
            TimeRange::OneWeek => days_before(today, 6),
            TimeRange::OneMonth => months_before(today, 1),
            TimeRange::ThreeMonths => months_before(today, 3),
            TimeRange::YearToDate => {
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
            }
            TimeRange::All => months_before(today, 12),
        }
    }
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::OneWeek => write!(f, "1W"),
            TimeRange::OneMonth => write!(f, "1M"),
            TimeRange::ThreeMonths => write!(f, "3M"),
            TimeRange::YearToDate => write!(f, "YTD"),
            TimeRange::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1W" => Ok(TimeRange::OneWeek),
            "1M" => Ok(TimeRange::OneMonth),
            "3M" => Ok(TimeRange::ThreeMonths),
            "YTD" => Ok(TimeRange::YearToDate),
            "ALL" => Ok(TimeRange::All),
            _ => Err(CoreError::unknown("time range", s)),
        }
    }
}
