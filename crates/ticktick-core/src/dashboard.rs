// File: crates/ticktick-core/src/dashboard.rs
// Summary: One dashboard query: fetch history + info, enrich, build metrics and the price chart.

use tracing::{info, instrument, warn};

use crate::chart::{Chart, RenderOptions};
use crate::enrich::{enrich, EnrichedPoint, DEFAULT_WINDOW};
use crate::error::{DashboardError, MarketDataError};
use crate::metrics::{summary_metrics, Metric};
use crate::provider::MarketData;
use crate::quote::{CompanyInfo, DateRange, Ticker};
use crate::report::{render_report, ReportInput};

/// Result of a successful query; everything the presentation layer needs.
pub struct DashboardView {
    pub ticker: Ticker,
    pub info: CompanyInfo,
    pub metrics: Vec<Metric>,
    pub points: Vec<EnrichedPoint>,
    pub window: usize,
    pub chart: Chart,
}

impl DashboardView {
    pub fn chart_png(&self, opts: &RenderOptions) -> Result<Vec<u8>, DashboardError> {
        self.chart.render_to_png_bytes(opts).map_err(DashboardError::Render)
    }

    /// HTML report, embedding `chart_png` when given.
    pub fn report_html(&self, chart_png: Option<&[u8]>) -> String {
        render_report(&ReportInput {
            ticker: &self.ticker,
            info: &self.info,
            metrics: &self.metrics,
            points: &self.points,
            window: self.window,
            chart_png,
        })
    }
}

pub struct Dashboard<P> {
    provider: P,
    window: usize,
}

impl<P: MarketData> Dashboard<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, window: DEFAULT_WINDOW }
    }

    /// Moving-average window; validated when a query runs.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Run the full query for `raw_ticker` over `range`.
    ///
    /// Invalid tickers, unknown tickers and empty histories surface as
    /// `DashboardError::Upstream`; a bad window surfaces as `Enrichment`.
    #[instrument(skip(self), fields(provider = self.provider.name(), window = self.window))]
    pub fn query(&self, raw_ticker: &str, range: DateRange) -> Result<DashboardView, DashboardError> {
        let ticker = Ticker::parse(raw_ticker)?;

        let history = self.provider.history(&ticker, range)?;
        if history.is_empty() {
            warn!(%ticker, "provider returned no rows");
            return Err(MarketDataError::NoData(ticker.to_string()).into());
        }
        let info = self.provider.info(&ticker)?;

        let points = enrich(&history, self.window)?;
        let metrics = summary_metrics(&info);
        let title = match info.display_name() {
            Some(name) => format!("{name} ({ticker})"),
            None => ticker.to_string(),
        };
        let chart = Chart::price_chart(title, &points, self.window);

        info!(%ticker, rows = points.len(), "query complete");
        Ok(DashboardView { ticker, info, metrics, points, window: self.window, chart })
    }
}
