// File: crates/ticktick-core/src/series.rs
// Summary: Line series model for the price chart (primary close line and overlays such as the moving average).

use crate::axis::day_number;
use crate::enrich::EnrichedPoint;

/// How a series is stroked; the theme supplies the concrete colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesRole {
    /// The main price line.
    Primary,
    /// Derived line drawn on top (moving average).
    Overlay,
}

#[derive(Clone, Debug)]
pub struct Series {
    pub label: String,
    pub role: SeriesRole,
    pub data_xy: Vec<(f64, f64)>,
}

impl Series {
    pub fn with_data(label: impl Into<String>, role: SeriesRole, data: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), role, data_xy: data }
    }

    /// Closing prices against the shared date axis.
    pub fn closes(points: &[EnrichedPoint]) -> Self {
        let data = points.iter().map(|p| (day_number(p.date), p.close)).collect();
        Self::with_data("Close", SeriesRole::Primary, data)
    }

    /// Moving average against the same axis; points without an average are omitted.
    pub fn moving_average(points: &[EnrichedPoint], window: usize) -> Self {
        let data = points
            .iter()
            .filter_map(|p| p.moving_average.map(|ma| (day_number(p.date), ma)))
            .collect();
        Self::with_data(format!("Moving Average ({window})"), SeriesRole::Overlay, data)
    }

    pub fn is_empty(&self) -> bool {
        self.data_xy.is_empty()
    }

    /// Downsample using LTTB to at most `max_points`.
    pub fn downsample_lttb(&self, max_points: usize) -> Self {
        use crate::downsample::lttb;
        let data = if self.data_xy.len() > max_points && max_points >= 2 {
            lttb(&self.data_xy, max_points)
        } else {
            self.data_xy.clone()
        };
        Series { label: self.label.clone(), role: self.role, data_xy: data }
    }
}
