// File: crates/ticktick-core/src/scale.rs
// Summary: Linear world-to-pixel transforms for the X (time) and Y (price) axes.

use crate::axis::Axis;
use crate::geometry::RectI32;

/// Maps an axis range onto a pixel interval. `flip` puts larger values at smaller pixels (Y).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    vmin: f64,
    span: f64,
    px_start: f32,
    px_len: f32,
    flip: bool,
}

impl LinearScale {
    pub fn x(axis: &Axis, plot: &RectI32) -> Self {
        Self { vmin: axis.min, span: axis.span(), px_start: plot.left as f32, px_len: plot.width() as f32, flip: false }
    }

    pub fn y(axis: &Axis, plot: &RectI32) -> Self {
        Self { vmin: axis.min, span: axis.span(), px_start: plot.bottom as f32, px_len: plot.height() as f32, flip: true }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let frac = ((v - self.vmin) / self.span) as f32;
        if self.flip { self.px_start - frac * self.px_len } else { self.px_start + frac * self.px_len }
    }
}
