// File: crates/ticktick-core/src/lib.rs
// Summary: Core library entry point; exports series enrichment, market data, metrics, charting and reports.

pub mod enrich;
pub mod error;
pub mod quote;
pub mod metrics;
pub mod provider;
pub mod cache;
pub mod dashboard;
pub mod report;
pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod downsample;

pub use enrich::{enrich, EnrichedPoint, DEFAULT_WINDOW};
pub use error::{DashboardError, EnrichError, MarketDataError};
pub use quote::{CompanyInfo, DateRange, PricePoint, PriceSeries, Ticker};
pub use metrics::{summary_metrics, Metric};
pub use provider::{FileProvider, MarketData};
#[cfg(feature = "yahoo")]
pub use provider::YahooProvider;
pub use cache::CachedProvider;
pub use dashboard::{Dashboard, DashboardView};
pub use report::{render_report, ReportInput};
pub use chart::{Chart, RenderOptions};
pub use series::{Series, SeriesRole};
pub use axis::Axis;
pub use view::ViewState;
pub use theme::Theme;
pub use downsample::lttb;
