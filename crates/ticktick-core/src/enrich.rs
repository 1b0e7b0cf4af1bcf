// File: crates/ticktick-core/src/enrich.rs
// Summary: Series enrichment: attach a trailing simple moving average of closes to every price point.

use chrono::NaiveDate;

use crate::error::EnrichError;
use crate::quote::PriceSeries;

/// Window used by the dashboard when none is configured.
pub const DEFAULT_WINDOW: usize = 100;

/// A price point with its trailing moving average.
/// `moving_average` is `None` until `window` observations exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnrichedPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub moving_average: Option<f64>,
}

/// Enrich `series` with a `window`-period trailing mean of `close`.
///
/// Output has the same length and order as the input. Index `i` carries
/// `mean(close[i + 1 - window ..= i])` once `i + 1 >= window`, otherwise `None`.
/// Each mean is summed over its own slice, so `window == 1` reproduces `close` exactly.
pub fn enrich(series: &PriceSeries, window: usize) -> Result<Vec<EnrichedPoint>, EnrichError> {
    if series.is_empty() {
        return Err(EnrichError::InvalidInput("price series is empty".into()));
    }
    if window == 0 {
        return Err(EnrichError::InvalidInput("window must be at least 1".into()));
    }

    let closes: Vec<f64> = series.closes().collect();
    let warmup = (window - 1).min(closes.len());
    let averages = std::iter::repeat(None)
        .take(warmup)
        .chain(closes.windows(window).map(|w| Some(w.iter().sum::<f64>() / window as f64)));

    Ok(series
        .points()
        .iter()
        .zip(averages)
        .map(|(p, moving_average)| EnrichedPoint { date: p.date, close: p.close, moving_average })
        .collect())
}

/// Most recent point with a defined average, if any.
pub fn latest_defined(points: &[EnrichedPoint]) -> Option<&EnrichedPoint> {
    points.iter().rev().find(|p| p.moving_average.is_some())
}
