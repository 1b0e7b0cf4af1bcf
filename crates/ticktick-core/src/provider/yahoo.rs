// File: crates/ticktick-core/src/provider/yahoo.rs
// Summary: Network provider backed by the public Yahoo Finance v8 chart endpoint (blocking HTTP).

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::DateTime;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::MarketData;
use crate::error::MarketDataError;
use crate::quote::{CompanyInfo, DateRange, PricePoint, PriceSeries, Ticker};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Fetches daily history (`range=max`, `interval=1d`) and the quote metadata block.
///
/// The chart endpoint does not carry fundamentals, so revenue growth,
/// PE/PB ratios and the business summary are left `None`.
///
/// The response fetched by `history` is kept for the same ticker and consumed
/// by the next `info` call, so one dashboard query costs one request.
pub struct YahooProvider {
    client: Client,
    base_url: String,
    last: Mutex<Option<(Ticker, ChartResult)>>,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("ticktick/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url: base_url.into(), last: Mutex::new(None) })
    }

    fn last(&self) -> MutexGuard<'_, Option<(Ticker, ChartResult)>> {
        self.last.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fetch_chart(&self, ticker: &Ticker) -> Result<ChartResult, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url.trim_end_matches('/'), ticker.as_str());
        debug!(%url, "requesting chart");
        let resp = self
            .client
            .get(&url)
            .query(&[("range", "max"), ("interval", "1d")])
            .send()?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::UnknownTicker(ticker.to_string()));
        }
        let body: ChartResponse = resp.error_for_status()?.json()?;

        if let Some(err) = body.chart.error {
            return Err(if err.code.eq_ignore_ascii_case("not found") {
                MarketDataError::UnknownTicker(ticker.to_string())
            } else {
                MarketDataError::Malformed(format!("{}: {}", err.code, err.description))
            });
        }
        body.chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
            .ok_or_else(|| MarketDataError::NoData(ticker.to_string()))
    }
}

impl MarketData for YahooProvider {
    fn name(&self) -> &'static str { "yahoo" }

    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError> {
        let chart = self.fetch_chart(ticker)?;
        let series = series_from_chart(&chart)?;
        info!(%ticker, rows = series.len(), "fetched history");
        *self.last() = Some((ticker.clone(), chart));
        Ok(series.restrict(range))
    }

    fn info(&self, ticker: &Ticker) -> Result<CompanyInfo, MarketDataError> {
        let cached = match self.last().take() {
            Some((t, chart)) if &t == ticker => Some(chart),
            _ => None,
        };
        let chart = match cached {
            Some(chart) => chart,
            None => self.fetch_chart(ticker)?,
        };
        Ok(info_from_chart(&chart))
    }
}

/// Quote block of a chart response. `previousClose` is only present for short
/// ranges; otherwise the close of the session before the latest one is used.
/// (`chartPreviousClose` is the close before the first bar of the requested
/// range, which for `range=max` is decades old.)
fn info_from_chart(chart: &ChartResult) -> CompanyInfo {
    let meta = &chart.meta;
    let prior_close = || {
        let q = chart.indicators.quote.first()?;
        q.close.iter().rev().flatten().nth(1).copied()
    };
    CompanyInfo {
        short_name: meta.short_name.clone(),
        long_name: meta.long_name.clone(),
        currency: meta.currency.clone(),
        current_price: meta.regular_market_price,
        previous_close: meta.previous_close.or_else(prior_close),
        day_high: meta.regular_market_day_high,
        day_low: meta.regular_market_day_low,
        ..CompanyInfo::default()
    }
}

fn series_from_chart(chart: &ChartResult) -> Result<PriceSeries, MarketDataError> {
    let Some(q) = chart.indicators.quote.first() else {
        return Ok(PriceSeries::default());
    };
    if q.close.len() != chart.timestamp.len() {
        return Err(MarketDataError::Malformed(format!(
            "{} timestamps but {} closes",
            chart.timestamp.len(),
            q.close.len()
        )));
    }
    let col = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    let points = chart
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = col(&q.close, i)?;
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            let mut p = PricePoint::new(date, close);
            if let (Some(o), Some(h), Some(l)) = (col(&q.open, i), col(&q.high, i), col(&q.low, i)) {
                p = p.with_ohlc(o, h, l);
            }
            if let Some(v) = q.volume.get(i).copied().flatten() {
                p = p.with_volume(v);
            }
            Some(p)
        })
        .collect();
    Ok(PriceSeries::from_unsorted(points))
}
