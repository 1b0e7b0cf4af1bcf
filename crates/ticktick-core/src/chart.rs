// File: crates/ticktick-core/src/chart.rs
// Summary: Price chart model and headless PNG rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use crate::enrich::EnrichedPoint;
use crate::geometry::RectI32;
use crate::grid::linspace;
use crate::scale::LinearScale;
use crate::series::Series;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, MAX_RENDER_POINTS, WIDTH};
use crate::view::ViewState;
use crate::Axis;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Axis titles, tick labels, chart title and legend. Off gives pixel-stable output across platforms.
    pub draw_labels: bool,
    /// Series longer than this are LTTB-downsampled before drawing.
    pub max_points: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            max_points: MAX_RENDER_POINTS,
        }
    }
}

pub struct Chart {
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: None,
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
        }
    }

    /// Close line with its moving average overlaid on a shared date axis, axes fitted to the data.
    pub fn price_chart(title: impl Into<String>, points: &[EnrichedPoint], window: usize) -> Self {
        let mut chart = Self::new();
        chart.title = Some(title.into());
        chart.add_series(Series::closes(points));
        let ma = Series::moving_average(points, window);
        if !ma.is_empty() {
            chart.add_series(ma);
        }
        chart.autoscale_axes(0.02);
        chart
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data with `y_margin` (fraction of span) of headroom.
    pub fn autoscale_axes(&mut self, y_margin: f64) {
        ViewState::from_chart(self, y_margin).apply_to_chart(self);
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        debug!(path = %path.display(), "wrote chart");
        Ok(())
    }

    /// Render the chart and return encoded PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        if opts.width <= 0 || opts.height <= 0 {
            anyhow::bail!("invalid surface size {}x{}", opts.width, opts.height);
        }
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = RectI32::plot_area(opts.width, opts.height, &opts.insets);
        let sx = LinearScale::x(&self.x_axis, &plot);
        let sy = LinearScale::y(&self.y_axis, &plot);

        draw_grid(canvas, &plot, theme);
        draw_axes(canvas, &plot, theme);

        for s in &self.series {
            let s = s.downsample_lttb(opts.max_points);
            draw_line_series(canvas, &sx, &sy, &s, theme.stroke_for(s.role));
        }

        if opts.draw_labels {
            let font = label_font(13.0);
            draw_ticks(canvas, &plot, &self.x_axis, &self.y_axis, &font, theme);
            draw_titles(canvas, &plot, self, &font, theme);
            draw_legend(canvas, &plot, &self.series, &font, theme);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

const X_TICKS: usize = 6;
const Y_TICKS: usize = 6;

fn label_font(size: f32) -> skia::Font {
    skia::FontMgr::default()
        .match_family_style("sans-serif", skia::FontStyle::normal())
        .map(|tf| skia::Font::from_typeface(tf, size))
        .unwrap_or_else(|| {
            let mut font = skia::Font::default();
            font.set_size(size);
            font
        })
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = fill(color);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn draw_grid(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let paint = stroke(theme.grid, 1.0);
    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);

    // verticals
    for x in linspace(l, r, X_TICKS) {
        canvas.draw_line((x as f32, t as f32), (x as f32, b as f32), &paint);
    }
    // horizontals
    for y in linspace(t, b, Y_TICKS) {
        canvas.draw_line((l as f32, y as f32), (r as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let paint = stroke(theme.axis_line, 1.5);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

fn draw_line_series(canvas: &skia::Canvas, sx: &LinearScale, sy: &LinearScale, series: &Series, color: skia::Color) {
    let data = &series.data_xy;
    if data.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    let (x0, y0) = data[0];
    path.move_to((sx.to_px(x0), sy.to_px(y0)));
    for &(x, y) in data.iter().skip(1) {
        path.line_to((sx.to_px(x), sy.to_px(y)));
    }

    canvas.draw_path(&path, &stroke(color, 2.0));
}

fn draw_ticks(canvas: &skia::Canvas, plot: &RectI32, x: &Axis, y: &Axis, font: &skia::Font, theme: &Theme) {
    let paint = fill(theme.tick);
    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);

    // y labels right-aligned against the plot edge, top tick = max
    for (i, py) in linspace(t, b, Y_TICKS).into_iter().enumerate() {
        let v = y.max - (i as f64) * (y.max - y.min) / (Y_TICKS as f64 - 1.0);
        let text = y.format_tick(v);
        let (w, _) = font.measure_str(&text, Some(&paint));
        canvas.draw_str(&text, (l as f32 - w - 6.0, py as f32 + 4.0), font, &paint);
    }

    for (i, px) in linspace(l, r, X_TICKS).into_iter().enumerate() {
        let v = x.min + (i as f64) * (x.max - x.min) / (X_TICKS as f64 - 1.0);
        let text = x.format_tick(v);
        let (w, _) = font.measure_str(&text, Some(&paint));
        canvas.draw_str(&text, (px as f32 - w * 0.5, b as f32 + 18.0), font, &paint);
    }
}

fn draw_titles(canvas: &skia::Canvas, plot: &RectI32, chart: &Chart, font: &skia::Font, theme: &Theme) {
    let paint = fill(theme.axis_label);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    let (w, _) = font.measure_str(&chart.x_axis.label, Some(&paint));
    canvas.draw_str(&chart.x_axis.label, (r - w, b + 40.0), font, &paint);
    canvas.draw_str(&chart.y_axis.label, (4.0, t - 10.0), font, &paint);

    if let Some(title) = &chart.title {
        let (w, _) = font.measure_str(title, Some(&paint));
        canvas.draw_str(title, (l + ((r - l) - w) * 0.5, t - 14.0), font, &paint);
    }
}

fn draw_legend(canvas: &skia::Canvas, plot: &RectI32, series: &[Series], font: &skia::Font, theme: &Theme) {
    let text_paint = fill(theme.axis_label);
    let mut x = plot.left as f32 + 12.0;
    let y = plot.top as f32 + 18.0;
    for s in series {
        let swatch = stroke(theme.stroke_for(s.role), 3.0);
        canvas.draw_line((x, y - 4.0), (x + 18.0, y - 4.0), &swatch);
        canvas.draw_str(&s.label, (x + 24.0, y), font, &text_paint);
        let (w, _) = font.measure_str(&s.label, Some(&text_paint));
        x += 24.0 + w + 18.0;
    }
}
