// File: crates/ticktick-core/src/metrics.rs
// Summary: Summary metric cards (price, day range, growth, valuation ratios) derived from company info.

use crate::quote::CompanyInfo;

/// Rendered in place of a value the provider did not report.
pub const MISSING: &str = "n/a";

/// One dashboard card: a label, a formatted value and an optional signed delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl Metric {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self { label: label.into(), value, delta: None }
    }
}

/// Two decimals, or `n/a`.
pub fn fmt_price(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.2}"),
        _ => MISSING.to_string(),
    }
}

/// Fraction rendered as a two-decimal percentage (0.1234 -> "12.34%").
pub fn fmt_percent(fraction: Option<f64>) -> String {
    match fraction {
        Some(x) if x.is_finite() => format!("{:.2}%", x * 100.0),
        _ => MISSING.to_string(),
    }
}

/// Signed two-decimal delta ("+1.25", "-0.40").
pub fn fmt_delta(delta: f64) -> String {
    format!("{delta:+.2}")
}

/// Build the six summary cards, laid out as two rows of three.
///
/// Row 1: name/current price (with change vs previous close), today's high, today's low.
/// Row 2: revenue growth (yoy), PE ratio, PB ratio.
pub fn summary_metrics(info: &CompanyInfo) -> Vec<Metric> {
    let mut price = Metric::new(info.display_name().unwrap_or("Price"), fmt_price(info.current_price));
    price.delta = match (info.current_price, info.previous_close) {
        (Some(cur), Some(prev)) if cur.is_finite() && prev.is_finite() => Some(fmt_delta(cur - prev)),
        _ => None,
    };

    vec![
        price,
        Metric::new("Today's High", fmt_price(info.day_high)),
        Metric::new("Today's Low", fmt_price(info.day_low)),
        Metric::new("Revenue Growth (yoy)", fmt_percent(info.revenue_growth)),
        Metric::new("PE Ratio", fmt_price(info.trailing_pe)),
        Metric::new("PB Ratio", fmt_price(info.price_to_book)),
    ]
}

/// Plain-text table for terminals: one `label: value (delta)` line per card.
pub fn format_table(metrics: &[Metric]) -> String {
    let width = metrics.iter().map(|m| m.label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for m in metrics {
        out.push_str(&format!("{:<width$}  {}", m.label, m.value, width = width));
        if let Some(d) = &m.delta {
            out.push_str(&format!(" ({d})"));
        }
        out.push('\n');
    }
    out
}
