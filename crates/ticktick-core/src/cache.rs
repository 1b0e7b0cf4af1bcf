// File: crates/ticktick-core/src/cache.rs
// Summary: Opt-in memoizing wrapper around a market-data provider, keyed by ticker and date range.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use crate::error::MarketDataError;
use crate::provider::MarketData;
use crate::quote::{CompanyInfo, DateRange, PriceSeries, Ticker};

#[derive(Default)]
struct Entries {
    history: HashMap<(Ticker, DateRange), PriceSeries>,
    info: HashMap<Ticker, CompanyInfo>,
}

/// Caches successful provider responses in memory. Errors are never cached.
///
/// The cache lives exactly as long as the wrapper; callers choose where
/// (and whether) to keep one around.
pub struct CachedProvider<P> {
    inner: P,
    entries: Mutex<Entries>,
}

impl<P: MarketData> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner, entries: Mutex::new(Entries::default()) }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop every cached response for `ticker`.
    pub fn invalidate(&self, ticker: &Ticker) {
        let mut e = self.lock();
        e.history.retain(|(t, _), _| t != ticker);
        e.info.remove(ticker);
    }

    pub fn clear(&self) {
        let mut e = self.lock();
        e.history.clear();
        e.info.clear();
    }

    /// Number of cached (history, info) entries.
    pub fn cached_counts(&self) -> (usize, usize) {
        let e = self.lock();
        (e.history.len(), e.info.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        // A poisoned map still holds only complete entries.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<P: MarketData> MarketData for CachedProvider<P> {
    fn name(&self) -> &'static str { self.inner.name() }

    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError> {
        let key = (ticker.clone(), range);
        if let Some(hit) = self.lock().history.get(&key) {
            trace!(%ticker, ?range, "history cache hit");
            return Ok(hit.clone());
        }
        let fresh = self.inner.history(ticker, range)?;
        self.lock().history.insert(key, fresh.clone());
        Ok(fresh)
    }

    fn info(&self, ticker: &Ticker) -> Result<CompanyInfo, MarketDataError> {
        if let Some(hit) = self.lock().info.get(ticker) {
            trace!(%ticker, "info cache hit");
            return Ok(hit.clone());
        }
        let fresh = self.inner.info(ticker)?;
        self.lock().info.insert(ticker.clone(), fresh.clone());
        Ok(fresh)
    }
}
