// File: crates/ticktick-core/src/provider/mod.rs
// Summary: Market-data provider interface (history + company info) and its implementations.

mod file;
#[cfg(feature = "yahoo")]
mod yahoo;

pub use file::{load_history_csv, FileProvider};
#[cfg(feature = "yahoo")]
pub use yahoo::YahooProvider;

use crate::error::MarketDataError;
use crate::quote::{CompanyInfo, DateRange, PriceSeries, Ticker};

/// Source of daily price history and company metadata for a ticker.
pub trait MarketData {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Daily history inside `range`, ascending by date. May be empty.
    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError>;

    /// Company metadata. Fields the provider does not know stay `None`.
    fn info(&self, ticker: &Ticker) -> Result<CompanyInfo, MarketDataError>;
}

impl<T: MarketData + ?Sized> MarketData for Box<T> {
    fn name(&self) -> &'static str { (**self).name() }
    fn history(&self, ticker: &Ticker, range: DateRange) -> Result<PriceSeries, MarketDataError> {
        (**self).history(ticker, range)
    }
    fn info(&self, ticker: &Ticker) -> Result<CompanyInfo, MarketDataError> { (**self).info(ticker) }
}
