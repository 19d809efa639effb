use std::f64::consts::PI;

use anyhow::{anyhow, bail, Result};
use leptos::{html::Canvas, HtmlElement};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

use crate::datetime::format_tick;

use super::spec::{Band, ChartSpec, Legend, LEGEND_MARKER_RADIUS, POINT_SIZE};

const BACKGROUND: &str = "#13171f";
const FOREGROUND: &str = "white";
const GRID: &str = "#3a4150";

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_TOP: f64 = 32.0;
const LEGEND_WIDTH: f64 = 168.0;
const X_AXIS_HEIGHT: f64 = 40.0;
const BAND_GAP: f64 = 16.0;
const TICK_SIZE: f64 = 6.0;
const TICK_SPACING: f64 = 140.0;

/// Pixel rectangle a band is drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Area left for the bands once margins, x axis and legend are taken out.
pub fn plot_frame(width: f64, height: f64) -> Frame {
    Frame {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (width - MARGIN_LEFT - LEGEND_WIDTH).max(0.0),
        height: (height - MARGIN_TOP - X_AXIS_HEIGHT).max(0.0),
    }
}

pub fn band_frame(band: &Band, plot: Frame) -> Frame {
    let top = plot.top + band.region.start.1 * plot.height;
    let bottom = plot.top + band.region.end.1 * plot.height;
    let gap = if band.show_x_axis { 0.0 } else { BAND_GAP };

    Frame {
        left: plot.left + band.region.start.0 * plot.width,
        top,
        width: (band.region.end.0 - band.region.start.0) * plot.width,
        height: (bottom - top - gap).max(0.0),
    }
}

pub struct ChartCanvas {
    ctx: CanvasRenderingContext2d,
}

impl ChartCanvas {
    pub fn try_new(node: &HtmlElement<Canvas>) -> Result<Self> {
        #[derive(serde::Serialize)]
        struct ContextOptions {
            alpha: bool,
        }

        let ctx = node
            .get_context_with_context_options(
                "2d",
                &serde_wasm_bindgen::to_value(&ContextOptions { alpha: false })
                    .map_err(|err| anyhow!("context options serialization error: {err}"))?,
            )
            .map_err(|err| anyhow!("{err:?}"))?;
        let Some(ctx) = ctx else {
            bail!("canvas' 2d context not found");
        };

        let ctx = ctx
            .dyn_into()
            .map_err(|err| anyhow!("context dyn conversion error: {err:?}"))?;

        Ok(Self { ctx })
    }

    pub fn render(
        &mut self,
        chart: &ChartSpec,
        width: f64,
        height: f64,
        mouse_x: Option<f64>,
        dpr: f64,
    ) {
        debug!(title = chart.title, bands = chart.bands.len(), "rendering chart");

        if width < f64::EPSILON || height < f64::EPSILON {
            return;
        }

        self.ctx.save();
        if let Err(err) = self.ctx.scale(dpr, dpr) {
            error!(dpr, "context scaling failed: {err:?}");
        };
        self.ctx.set_font("12px Arial");
        self.ctx.set_fill_style(&BACKGROUND.into());
        self.ctx.fill_rect(0.0, 0.0, width, height);

        if let Some(domain) = chart.time_domain() {
            let plot = plot_frame(width, height);

            self.render_title(&chart.title, plot);
            for band in &chart.bands {
                let frame = band_frame(band, plot);
                self.render_band(band, frame, domain);
                if band.show_x_axis {
                    self.render_x_axis(frame, domain);
                }
            }

            if let Some(mouse_x) = mouse_x.filter(|x| *x >= plot.left && *x <= plot.right()) {
                self.render_hover(chart, plot, domain, mouse_x);
            }

            self.render_legend(&chart.legend, width);
        }

        self.ctx.restore();
    }

    fn render_title(&mut self, title: &str, plot: Frame) {
        self.ctx.set_fill_style(&FOREGROUND.into());
        self.ctx.set_font("14px Arial");
        self.fill_text(title, plot.left, plot.top - 12.0);
        self.ctx.set_font("12px Arial");
    }

    fn render_band(&mut self, band: &Band, frame: Frame, domain: (i64, i64)) {
        debug!(band = band.name, "rendering band");

        self.ctx.set_stroke_style(&GRID.into());
        self.set_line_dash(&[4.0, 4.0]);
        self.ctx.stroke_rect(frame.left, frame.top, frame.width, frame.height);
        self.set_line_dash(&[]);

        self.ctx.set_fill_style(&FOREGROUND.into());
        self.fill_text(&band.name, frame.left + 4.0, frame.top + 14.0);

        let Some(values) = band.value_domain() else {
            return;
        };

        self.ctx.set_text_align("right");
        self.fill_text(&format_value(values.1), frame.left - 6.0, frame.top + 10.0);
        self.fill_text(&format_value(values.0), frame.left - 6.0, frame.bottom());
        self.ctx.set_text_align("start");

        self.ctx.set_stroke_style(&FOREGROUND.into());
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        let mut pen_down = false;
        for point in &band.points {
            let Some((timestamp, value)) = point.position() else {
                pen_down = false;
                continue;
            };

            let x = time_to_x(timestamp, domain, frame);
            let y = value_to_y(value, values, frame);
            if pen_down {
                self.ctx.line_to(x, y);
            } else {
                self.ctx.move_to(x, y);
                pen_down = true;
            }
        }
        self.ctx.stroke();

        for point in &band.points {
            let Some((timestamp, value)) = point.position() else {
                continue;
            };

            let x = time_to_x(timestamp, domain, frame);
            let y = value_to_y(value, values, frame);
            self.fill_circle(x, y, POINT_SIZE, point.color);
        }
    }

    fn render_x_axis(&mut self, frame: Frame, domain: (i64, i64)) {
        let y = frame.bottom();

        self.ctx.set_stroke_style(&FOREGROUND.into());
        self.ctx.begin_path();
        self.ctx.move_to(frame.left, y);
        self.ctx.line_to(frame.right(), y);
        self.ctx.stroke();

        self.ctx.set_fill_style(&FOREGROUND.into());
        self.ctx.set_text_align("center");
        for timestamp in ticks(domain, frame.width) {
            let x = time_to_x(timestamp, domain, frame);

            self.ctx.begin_path();
            self.ctx.move_to(x, y);
            self.ctx.line_to(x, y + TICK_SIZE);
            self.ctx.stroke();

            self.fill_text(&format_tick(timestamp), x, y + TICK_SIZE + 14.0);
        }
        self.ctx.set_text_align("start");
    }

    fn render_hover(&mut self, chart: &ChartSpec, plot: Frame, domain: (i64, i64), mouse_x: f64) {
        self.ctx.set_stroke_style(&GRID.into());
        self.ctx.begin_path();
        self.ctx.move_to(mouse_x, plot.top);
        self.ctx.line_to(mouse_x, plot.bottom());
        self.ctx.stroke();

        let timestamp = x_to_time(mouse_x, domain, plot);
        for band in &chart.bands {
            let Some(values) = band.value_domain() else {
                continue;
            };
            let Some(point) = band.closest_point(timestamp) else {
                continue;
            };
            let Some((point_time, value)) = point.position() else {
                continue;
            };

            let frame = band_frame(band, plot);
            let x = time_to_x(point_time, domain, frame);
            let y = value_to_y(value, values, frame);
            self.fill_circle(x, y, POINT_SIZE * 2.0, point.color);
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn render_legend(&mut self, legend: &Legend, width: f64) {
        let left = width - LEGEND_WIDTH + 16.0;

        self.ctx.set_fill_style(&FOREGROUND.into());
        self.fill_text(legend.title, left, MARGIN_TOP);

        for (index, item) in legend.items.iter().enumerate() {
            let y = MARGIN_TOP + 22.0 + index as f64 * 20.0;
            self.fill_circle(left + LEGEND_MARKER_RADIUS, y - 4.0, LEGEND_MARKER_RADIUS, item.color);
            self.ctx.set_fill_style(&FOREGROUND.into());
            self.fill_text(item.name, left + 16.0, y);
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style(&color.into());
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI) {
            error!("arc drawing error: {err:?}");
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(err) = self.ctx.fill_text(text, x, y) {
            error!("fill text error: {err:?}");
        }
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let dash = segments
            .iter()
            .map(|segment| JsValue::from_f64(*segment))
            .collect::<js_sys::Array>();
        if let Err(err) = self.ctx.set_line_dash(&dash) {
            error!("line dash error: {err:?}");
        }
    }
}

#[expect(clippy::cast_precision_loss)]
pub fn time_to_x(timestamp: i64, (begin, end): (i64, i64), frame: Frame) -> f64 {
    if end <= begin {
        return frame.left + frame.width / 2.0;
    }

    let rev_factor = 1.0 / (end - begin) as f64;
    frame.left + rev_factor * (timestamp - begin) as f64 * frame.width
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn x_to_time(x: f64, (begin, end): (i64, i64), frame: Frame) -> i64 {
    if frame.width < f64::EPSILON {
        return begin;
    }

    let rev_factor = 1.0 / frame.width;
    begin + (rev_factor * (x - frame.left) * (end - begin) as f64) as i64
}

pub fn value_to_y(value: f64, (min, max): (f64, f64), frame: Frame) -> f64 {
    let rev_factor = 1.0 / (max - min);
    frame.bottom() - rev_factor * (value - min) * frame.height
}

/// Evenly spaced tick timestamps, at least one.
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
pub fn ticks((begin, end): (i64, i64), width: f64) -> Vec<i64> {
    if end <= begin {
        return vec![begin];
    }

    let count = ((width / TICK_SPACING) as usize).max(1);
    let interval = (end - begin) / count as i64;
    if interval == 0 {
        return vec![begin, end];
    }

    (0..=count as i64).map(|step| begin + step * interval).collect()
}

fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::analysis::phase::AnalysisPhase;
    use crate::analysis::types::{DataPoint, TimeSeries};
    use crate::chart::spec::render;

    fn frame() -> Frame {
        Frame {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
        }
    }

    #[test]
    fn time_and_x_are_inverse() {
        let domain = (1_000, 2_000);
        assert_eq!(time_to_x(1_000, domain, frame()), 10.0);
        assert_eq!(time_to_x(2_000, domain, frame()), 110.0);
        assert_eq!(x_to_time(60.0, domain, frame()), 1_500);
    }

    #[test]
    fn single_instant_is_centered() {
        assert_eq!(time_to_x(5, (5, 5), frame()), 60.0);
    }

    #[test]
    fn values_grow_upwards() {
        assert_eq!(value_to_y(0.0, (0.0, 1.0), frame()), 70.0);
        assert_eq!(value_to_y(1.0, (0.0, 1.0), frame()), 20.0);
    }

    #[test]
    fn tick_count_follows_width() {
        assert_eq!(ticks((0, 1_000), 100.0), vec![0, 1_000]);
        assert_eq!(ticks((0, 900), 420.0), vec![0, 300, 600, 900]);
        assert_eq!(ticks((7, 7), 420.0), vec![7]);
    }

    #[test]
    fn last_band_reaches_the_x_axis() {
        let series = ["a", "b"].map(|name| TimeSeries {
            name: name.to_string(),
            points: vec![DataPoint {
                timestamp: Some(0),
                value: 1.0,
                phase: AnalysisPhase::Running,
            }],
        });
        let chart = render("run", &series);
        let plot = plot_frame(400.0, 272.0);
        assert_eq!(plot.height, 200.0);

        let top = band_frame(&chart.bands[0], plot);
        let bottom = band_frame(&chart.bands[1], plot);
        assert_eq!(top.top, MARGIN_TOP);
        assert_eq!(top.height, 100.0 - BAND_GAP);
        assert_eq!(bottom.top, MARGIN_TOP + 100.0);
        assert_eq!(bottom.bottom(), plot.bottom());
    }
}
