// File: crates/ticktick-core/tests/cache.rs
// Purpose: Explicit memoization keyed by ticker + date range; errors pass through uncached.

use std::cell::Cell;

use chrono::NaiveDate;
use ticktick_core::{CachedProvider, CompanyInfo, DateRange, MarketData, MarketDataError, PriceSeries, Ticker};

#[derive(Default)]
struct Counting {
    history_calls: Cell<usize>,
    info_calls: Cell<usize>,
}

impl MarketData for Counting {
    fn name(&self) -> &'static str { "counting" }

    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError> {
        self.history_calls.set(self.history_calls.get() + 1);
        if ticker.as_str() == "FAIL" {
            return Err(MarketDataError::UnknownTicker(ticker.to_string()));
        }
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Ok(PriceSeries::from_closes(start, &[1.0, 2.0, 3.0]).restrict(range))
    }

    fn info(&self, _ticker: &Ticker) -> Result<CompanyInfo, MarketDataError> {
        self.info_calls.set(self.info_calls.get() + 1);
        Ok(CompanyInfo { short_name: Some("Cached".into()), ..CompanyInfo::default() })
    }
}

#[test]
fn repeats_hit_the_cache() {
    let cached = CachedProvider::new(Counting::default());
    let t = Ticker::parse("AAPL").unwrap();

    let a = cached.history(&t, DateRange::Max).unwrap();
    let b = cached.history(&t, DateRange::Max).unwrap();
    assert_eq!(a, b);
    assert_eq!(cached.inner().history_calls.get(), 1);

    cached.info(&t).unwrap();
    cached.info(&t).unwrap();
    assert_eq!(cached.inner().info_calls.get(), 1);
    assert_eq!(cached.cached_counts(), (1, 1));
}

#[test]
fn range_is_part_of_the_key() {
    let cached = CachedProvider::new(Counting::default());
    let t = Ticker::parse("AAPL").unwrap();
    let from = NaiveDate::from_ymd_opt(2024, 1, 2);

    assert_eq!(cached.history(&t, DateRange::Max).unwrap().len(), 3);
    assert_eq!(cached.history(&t, DateRange::between(from, None)).unwrap().len(), 2);
    assert_eq!(cached.inner().history_calls.get(), 2);
}

#[test]
fn errors_are_not_cached() {
    let cached = CachedProvider::new(Counting::default());
    let t = Ticker::parse("FAIL").unwrap();
    assert!(cached.history(&t, DateRange::Max).is_err());
    assert!(cached.history(&t, DateRange::Max).is_err());
    assert_eq!(cached.inner().history_calls.get(), 2);
    assert_eq!(cached.cached_counts(), (0, 0));
}

#[test]
fn invalidate_and_clear() {
    let cached = CachedProvider::new(Counting::default());
    let a = Ticker::parse("AAA").unwrap();
    let b = Ticker::parse("BBB").unwrap();
    cached.history(&a, DateRange::Max).unwrap();
    cached.history(&b, DateRange::Max).unwrap();
    cached.info(&a).unwrap();

    cached.invalidate(&a);
    assert_eq!(cached.cached_counts(), (1, 0));
    cached.history(&a, DateRange::Max).unwrap();
    assert_eq!(cached.inner().history_calls.get(), 3);

    cached.clear();
    assert_eq!(cached.cached_counts(), (0, 0));
}
