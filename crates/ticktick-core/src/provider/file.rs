// File: crates/ticktick-core/src/provider/file.rs
// Summary: Offline provider reading `<TICKER>.csv` history and `<TICKER>.json` metadata from a directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use tracing::{debug, warn};

use super::MarketData;
use crate::error::MarketDataError;
use crate::quote::{CompanyInfo, DateRange, PricePoint, PriceSeries, Ticker};

/// Reads exported provider data from disk.
///
/// History: `<dir>/<TICKER>.csv` with a header row (column names are matched
/// case-insensitively). Metadata: `<dir>/<TICKER>.json`, optional.
#[derive(Clone, Debug)]
pub struct FileProvider {
    dir: PathBuf,
}

impl FileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn history_path(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker.as_str()))
    }

    fn info_path(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{}.json", ticker.as_str()))
    }
}

impl MarketData for FileProvider {
    fn name(&self) -> &'static str { "file" }

    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError> {
        let path = self.history_path(ticker);
        if !path.exists() {
            return Err(MarketDataError::UnknownTicker(ticker.to_string()));
        }
        Ok(load_history_csv(&path)?.restrict(range))
    }

    fn info(&self, ticker: &Ticker) -> Result<CompanyInfo, MarketDataError> {
        let path = self.info_path(ticker);
        if !path.exists() {
            if !self.history_path(ticker).exists() {
                return Err(MarketDataError::UnknownTicker(ticker.to_string()));
            }
            debug!(path = %path.display(), "no metadata file; using empty company info");
            return Ok(CompanyInfo::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Load a daily history CSV into a PriceSeries.
///
/// Recognised headers: date/time/timestamp/datetime, open, high, low,
/// close/adj_close/adj close, volume. Rows without a parsable date or close,
/// including ragged rows that stop short of those columns, are skipped.
/// Rows are sorted by date; a repeated date keeps the last row.
pub fn load_history_csv(path: &Path) -> Result<PriceSeries, MarketDataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    debug!(?headers, path = %path.display(), "reading history");

    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.iter().any(|want| h == want))
    };

    let i_date = idx(&["date", "datetime", "time", "timestamp", "open_time"])
        .ok_or_else(|| MarketDataError::Malformed(format!("{}: no date column", path.display())))?;
    let i_close = idx(&["close", "adj_close", "adj close", "close_price", "c"])
        .ok_or_else(|| MarketDataError::Malformed(format!("{}: no close column", path.display())))?;
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_volume = idx(&["volume", "v"]);

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let num = |i: Option<usize>| -> Option<f64> {
            i.and_then(|ix| rec.get(ix)).and_then(|s| s.parse::<f64>().ok()).filter(|v| v.is_finite())
        };

        let date = rec.get(i_date).and_then(parse_date);
        let close = num(Some(i_close));
        let (Some(date), Some(close)) = (date, close) else {
            skipped += 1;
            continue;
        };

        let mut p = PricePoint::new(date, close);
        if let (Some(o), Some(h), Some(l)) = (num(i_open), num(i_high), num(i_low)) {
            p = p.with_ohlc(o, h, l);
        }
        if let Some(v) = i_volume.and_then(|ix| rec.get(ix)).and_then(|s| s.parse::<u64>().ok()) {
            p = p.with_volume(v);
        }
        points.push(p);
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped rows without a date or close");
    }
    Ok(PriceSeries::from_unsorted(points))
}

/// Accepts `YYYY-MM-DD` (optionally followed by a time part) or an epoch in seconds/milliseconds.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(head) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
            return Some(d);
        }
    }
    let n = s.parse::<i64>().ok()?;
    // epoch ms -> sec
    let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}
