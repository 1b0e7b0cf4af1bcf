// File: crates/ticktick/src/main.rs
// Summary: Looks up one ticker, prints summary metrics, and writes the price/moving-average chart and HTML report.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ticktick_core::metrics::format_table;
use ticktick_core::{theme, Dashboard, DashboardError, DateRange, FileProvider, MarketData, RenderOptions};

use config::{FileConfig, Overrides, ProviderKind, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Stock ticker dashboard: summary metrics, price chart with moving average, HTML report")]
struct Args {
    /// Ticker symbol, e.g. AAPL
    ticker: String,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Market-data source
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Directory holding <TICKER>.csv and <TICKER>.json (file provider)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Moving-average window in sessions
    #[arg(long)]
    window: Option<usize>,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Output directory for the chart and report
    #[arg(long)]
    out: Option<PathBuf>,

    /// Chart theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Chart width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Chart height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Skip writing the HTML report
    #[arg(long)]
    no_report: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let file_cfg = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(
        file_cfg,
        Overrides {
            provider: args.provider,
            data_dir: args.data_dir.clone(),
            window: args.window,
            out_dir: args.out.clone(),
            no_report: args.no_report,
            theme: args.theme.clone(),
            width: args.width,
            height: args.height,
        },
    )?;
    info!(?settings, "resolved settings");

    if let (Some(s), Some(e)) = (args.start, args.end) {
        if s > e {
            anyhow::bail!("--start {s} is after --end {e}");
        }
    }
    let range = DateRange::between(args.start, args.end);

    let dashboard = Dashboard::new(make_provider(&settings)?).with_window(settings.window);
    let view = match dashboard.query(&args.ticker, range) {
        Ok(v) => v,
        Err(err @ DashboardError::Upstream(_)) => {
            error!(ticker = %args.ticker, %err, "lookup failed");
            eprintln!("Incorrect ticker.");
            return Err(err).context(format!("looking up {:?}", args.ticker));
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", view.chart.title.as_deref().unwrap_or(view.ticker.as_str()));
    print!("{}", format_table(&view.metrics));
    if let Some(last) = view.points.last() {
        let ma = last.moving_average.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".into());
        println!("Last close {:.2} on {}; {}-day average {}", last.close, last.date, view.window, ma);
    }

    let opts = RenderOptions {
        width: settings.width,
        height: settings.height,
        theme: theme::find(&settings.theme),
        ..RenderOptions::default()
    };
    let png = view.chart_png(&opts)?;
    let chart_path = out_path(&settings.out_dir, view.ticker.as_str(), "chart.png");
    write_file(&chart_path, &png)?;
    println!("Wrote {}", chart_path.display());

    if settings.report {
        let html = view.report_html(Some(&png));
        let report_path = out_path(&settings.out_dir, view.ticker.as_str(), "report.html");
        write_file(&report_path, html.as_bytes())?;
        println!("Wrote {}", report_path.display());
    }

    Ok(())
}

fn make_provider(settings: &Settings) -> Result<Box<dyn MarketData>> {
    match settings.provider {
        ProviderKind::File => {
            if !settings.data_dir.is_dir() {
                anyhow::bail!("data directory not found: {}", settings.data_dir.display());
            }
            Ok(Box::new(FileProvider::new(&settings.data_dir)))
        }
        #[cfg(feature = "yahoo")]
        ProviderKind::Yahoo => Ok(Box::new(ticktick_core::YahooProvider::new()?)),
        #[cfg(not(feature = "yahoo"))]
        ProviderKind::Yahoo => anyhow::bail!("this build has no network provider; rebuild with --features yahoo"),
    }
}

/// `<out>/<TICKER>_<suffix>`
fn out_path(out_dir: &Path, ticker: &str, suffix: &str) -> PathBuf {
    out_dir.join(format!("{ticker}_{suffix}"))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
