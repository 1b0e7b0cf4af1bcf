// File: crates/ticktick-core/src/report.rs
// Summary: Self-contained HTML report (metrics, latest close/average, embedded chart, company summary).
// Notes:
// - Output is meant for an external HTML-to-PDF converter; no conversion happens here.
// - Every provider-supplied string is escaped before it reaches the document.

use std::fmt::Write as _;

use base64::Engine as _;

use crate::enrich::{latest_defined, EnrichedPoint};
use crate::metrics::{fmt_price, Metric};
use crate::quote::{CompanyInfo, Ticker};

/// Everything the report template reads.
pub struct ReportInput<'a> {
    pub ticker: &'a Ticker,
    pub info: &'a CompanyInfo,
    pub metrics: &'a [Metric],
    pub points: &'a [EnrichedPoint],
    pub window: usize,
    /// PNG bytes of the price chart, embedded inline when present.
    pub chart_png: Option<&'a [u8]>,
}

/// Minimal HTML escaping for text nodes and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;margin:32px;color:#1a1a1f}\
h1{margin-bottom:4px}.sub{color:#666;margin-top:0}\
table{border-collapse:collapse;margin:16px 0}td,th{border:1px solid #ddd;padding:6px 12px;text-align:left}\
.up{color:#1b8a4b}.down{color:#c0392b}img{max-width:100%}";

pub fn render_report(input: &ReportInput<'_>) -> String {
    let ticker = escape_html(input.ticker.as_str());
    let name = input.info.display_name().map(escape_html).unwrap_or_else(|| ticker.clone());

    let mut html = String::new();
    // fmt::Write into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{name} ({ticker})</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{name}</h1>\n<p class=\"sub\">{ticker}{currency}</p>\n",
        currency = input
            .info
            .currency
            .as_deref()
            .map(|c| format!(" &middot; {}", escape_html(c)))
            .unwrap_or_default(),
    );

    html.push_str("<table>\n<tr><th>Metric</th><th>Value</th><th>Change</th></tr>\n");
    for m in input.metrics {
        let delta = match m.delta.as_deref() {
            Some(d) => {
                let class = if d.starts_with('-') { "down" } else { "up" };
                format!("<span class=\"{class}\">{}</span>", escape_html(d))
            }
            None => String::new(),
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{delta}</td></tr>",
            escape_html(&m.label),
            escape_html(&m.value),
        );
    }
    html.push_str("</table>\n");

    if let Some(last) = input.points.last() {
        let _ = writeln!(html, "<p>Last close ({}): <strong>{}</strong></p>", last.date, fmt_price(Some(last.close)));
    }
    match latest_defined(input.points) {
        Some(p) => {
            let _ = writeln!(
                html,
                "<p>{}-day moving average ({}): <strong>{}</strong></p>",
                input.window,
                p.date,
                fmt_price(p.moving_average),
            );
        }
        None => {
            let _ = writeln!(
                html,
                "<p>{}-day moving average: not enough history ({} sessions)</p>",
                input.window,
                input.points.len(),
            );
        }
    }

    if let Some(png) = input.chart_png {
        let b64 = base64::engine::general_purpose::STANDARD.encode(png);
        html.push_str("<h2>Chart</h2>\n");
        let _ = writeln!(html, "<img alt=\"{ticker} price chart\" src=\"data:image/png;base64,{b64}\">");
    }

    if let Some(summary) = input.info.long_business_summary.as_deref() {
        html.push_str("<h2>Company Info</h2>\n");
        let _ = writeln!(html, "<p>{}</p>", escape_html(summary));
    }

    html.push_str("</body>\n</html>\n");
    html
}
