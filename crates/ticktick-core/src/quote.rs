// File: crates/ticktick-core/src/quote.rs
// Summary: Market-data domain types: tickers, price points, price series, company info, date ranges.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{EnrichError, MarketDataError};

/// Validated, upper-cased ticker symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    pub const MAX_LEN: usize = 12;

    /// Parse user input. Surrounding whitespace is ignored and letters are upper-cased.
    /// Allowed characters: ASCII alphanumerics and `.`, `^`, `=`, `-`.
    pub fn parse(raw: &str) -> Result<Self, MarketDataError> {
        let s = raw.trim().to_ascii_uppercase();
        let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-');
        if s.is_empty() || s.len() > Self::MAX_LEN || !s.chars().all(valid_char) {
            return Err(MarketDataError::InvalidTicker(raw.to_string()));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One trading session. Only `close` is required; the rest is carried through when the provider has it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<u64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close, open: None, high: None, low: None, volume: None }
    }

    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Price history ordered strictly ascending by date.
/// Contract: dates are unique and increasing; enforced by every constructor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build from rows already in ascending order. Out-of-order or duplicate dates are rejected.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, EnrichError> {
        if let Some(w) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(EnrichError::InvalidInput(format!(
                "dates must be strictly ascending ({} then {})",
                w[0].date, w[1].date
            )));
        }
        Ok(Self { points })
    }

    /// Build from unordered rows: sorts by date, keeps the last row seen for a repeated date.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(last) if last.date == p.date => *last = p,
                _ => out.push(p),
            }
        }
        Self { points: out }
    }

    /// Convenience for tests and demos: consecutive calendar days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let points = start
            .iter_days()
            .zip(closes)
            .map(|(d, &c)| PricePoint::new(d, c))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    /// Keep only points inside `range`.
    pub fn restrict(&self, range: DateRange) -> Self {
        let points = self.points.iter().copied().filter(|p| range.contains(p.date)).collect();
        Self { points }
    }
}

/// Requested history window. `Max` mirrors the provider's "all available" period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DateRange {
    #[default]
    Max,
    /// Inclusive on both ends; either end may be open.
    Between { start: Option<NaiveDate>, end: Option<NaiveDate> },
}

impl DateRange {
    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        if start.is_none() && end.is_none() {
            DateRange::Max
        } else {
            DateRange::Between { start, end }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateRange::Max => true,
            DateRange::Between { start, end } => {
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            }
        }
    }
}

/// Company metadata as reported by the provider. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub day_high: Option<f64>,
    #[serde(default)]
    pub day_low: Option<f64>,
    /// Year-over-year growth as a fraction (0.12 == 12%).
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub price_to_book: Option<f64>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
}

impl CompanyInfo {
    /// Best display name: short name, then long name.
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or(self.long_name.as_deref())
    }
}
