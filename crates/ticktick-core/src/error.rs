// File: crates/ticktick-core/src/error.rs
// Summary: Typed errors for enrichment, market data access, and dashboard queries.

use thiserror::Error;

/// The only failure series enrichment can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures at the market-data boundary ("upstream data unavailable").
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("invalid ticker symbol: {0:?}")]
    InvalidTicker(String),

    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("no price history for {0}")]
    NoData(String),

    #[error("malformed provider data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yahoo")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors surfaced by a full dashboard query.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("market data unavailable: {0}")]
    Upstream(#[from] MarketDataError),

    #[error("enrichment failed: {0}")]
    Enrichment(#[from] EnrichError),

    #[error("render failed: {0:#}")]
    Render(anyhow::Error),
}

impl DashboardError {
    /// True when the failure came from the data provider rather than local computation.
    pub fn is_upstream(&self) -> bool {
        matches!(self, DashboardError::Upstream(_))
    }
}
