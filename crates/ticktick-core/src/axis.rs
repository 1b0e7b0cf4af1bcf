// File: crates/ticktick-core/src/axis.rs
// Summary: Axis model with labels, ranges, tick formatting, and the date <-> x mapping.

use chrono::{Datelike, NaiveDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFormat {
    /// Plain number with two decimals.
    Number,
    /// X values are day numbers (see [`day_number`]); ticks print as `YYYY-MM`.
    Date,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub ticks: TickFormat,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, ticks: TickFormat::Number }
    }

    pub fn dates(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { ticks: TickFormat::Date, ..Self::new(label, min, max) }
    }

    pub fn default_x() -> Self {
        Self::dates("Time Period", 0.0, 10.0)
    }

    pub fn default_y() -> Self {
        Self::new("Price", 0.0, 100.0)
    }

    /// Never zero, so callers may divide by it.
    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-9)
    }

    pub fn format_tick(&self, v: f64) -> String {
        match self.ticks {
            TickFormat::Number => format!("{v:.2}"),
            TickFormat::Date => date_from_day_number(v)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default(),
        }
    }
}

/// X coordinate of a calendar date: days since 0001-01-01 (proleptic Gregorian).
pub fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`day_number`], rounding to the nearest day.
pub fn date_from_day_number(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}
