// File: crates/ticktick/src/config.rs
// Summary: Optional TOML config file merged under command-line flags into resolved settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use ticktick_core::DEFAULT_WINDOW;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// `<TICKER>.csv` / `<TICKER>.json` files in the data directory.
    #[default]
    File,
    /// Yahoo Finance chart endpoint (requires the `yahoo` feature).
    Yahoo,
}

/// On-disk config. Every key is optional; command-line flags win.
///
/// ```toml
/// provider = "file"
/// data_dir = "data"
/// window = 100
/// out_dir = "target/out"
///
/// [chart]
/// theme = "dark"
/// width = 1024
/// height = 640
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub provider: Option<ProviderKind>,
    pub data_dir: Option<PathBuf>,
    pub window: Option<usize>,
    pub out_dir: Option<PathBuf>,
    pub report: Option<bool>,
    #[serde(default)]
    pub chart: ChartCfg,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartCfg {
    pub theme: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&s).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub provider: ProviderKind,
    pub data_dir: PathBuf,
    pub window: usize,
    pub out_dir: PathBuf,
    pub report: bool,
    pub theme: String,
    pub width: i32,
    pub height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::File,
            data_dir: PathBuf::from("data"),
            window: DEFAULT_WINDOW,
            out_dir: PathBuf::from("target/out"),
            report: true,
            theme: "dark".to_string(),
            width: ticktick_core::types::WIDTH,
            height: ticktick_core::types::HEIGHT,
        }
    }
}

/// Command-line values that override the file; `None` means "not given".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub provider: Option<ProviderKind>,
    pub data_dir: Option<PathBuf>,
    pub window: Option<usize>,
    pub out_dir: Option<PathBuf>,
    pub no_report: bool,
    pub theme: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Settings {
    /// Precedence: flags, then file, then defaults.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let d = Settings::default();
        let s = Settings {
            provider: cli.provider.or(file.provider).unwrap_or(d.provider),
            data_dir: cli.data_dir.or(file.data_dir).unwrap_or(d.data_dir),
            window: cli.window.or(file.window).unwrap_or(d.window),
            out_dir: cli.out_dir.or(file.out_dir).unwrap_or(d.out_dir),
            report: !cli.no_report && file.report.unwrap_or(d.report),
            theme: cli.theme.or(file.chart.theme).unwrap_or(d.theme),
            width: cli.width.or(file.chart.width).unwrap_or(d.width),
            height: cli.height.or(file.chart.height).unwrap_or(d.height),
        };
        if s.window == 0 {
            anyhow::bail!("window must be at least 1");
        }
        if s.width <= 0 || s.height <= 0 {
            anyhow::bail!("chart size must be positive, got {}x{}", s.width, s.height);
        }
        Ok(s)
    }
}
