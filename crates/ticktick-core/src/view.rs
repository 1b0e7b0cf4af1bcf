// File: crates/ticktick-core/src/view.rs
// Visible world ranges and autoscale over the chart's series.

use crate::grid::finite_range;
use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Fit every series; `y_margin` is a fraction of the y span added above and below.
    pub fn from_chart(chart: &Chart, y_margin: f64) -> Self {
        let xs = finite_range(chart.series.iter().flat_map(|s| s.data_xy.iter().map(|p| p.0)));
        let ys = finite_range(chart.series.iter().flat_map(|s| s.data_xy.iter().map(|p| p.1)));
        let (Some((mut x_min, mut x_max)), Some((mut y_min, mut y_max))) = (xs, ys) else {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        };
        if (x_max - x_min).abs() < 1e-9 { x_min -= 0.5; x_max += 0.5; }
        if (y_max - y_min).abs() < 1e-9 { y_min -= 0.5; y_max += 0.5; }
        let ym = (y_max - y_min) * y_margin.max(0.0);
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
