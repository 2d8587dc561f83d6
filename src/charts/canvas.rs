use std::f64::consts::PI;

use anyhow::{anyhow, bail, Result};
use js_sys::Array;
use leptos::{html::Canvas, HtmlElement};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

use super::types::{ChartPayload, ChartSeries};
use crate::telemetry::summary::to_fixed;

const BACKGROUND: &str = "#13171f";
const TEXT_COLOR: &str = "#b1b5d0";
const GRID_COLOR: &str = "rgba(255,255,255,0.05)";

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 32.0;

const Y_TICKS: u32 = 5;
const X_LABEL_SPACING: f64 = 96.0;

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
        &self,
        payload: &ChartPayload,
        width: f64,
        height: f64,
        dpr: f64,
        hovered: Option<usize>,
    ) {
        debug!(quantity = %payload.quantity, "rendering chart");

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

        let area = PlotArea::new(width, height);
        let range = ValueRange::of(payload);

        self.render_grid(payload, &area, &range);
        for series in payload.thresholds.iter().chain([&payload.live]) {
            self.render_series(series, &area, &range);
        }
        if let Some(index) = hovered {
            self.render_hover(payload, &area, &range, index);
        }
        self.render_legend(payload);

        self.ctx.restore();
    }

    fn render_grid(&self, payload: &ChartPayload, area: &PlotArea, range: &ValueRange) {
        self.ctx.set_line_width(1.0);
        self.set_dash(None);
        self.ctx.set_stroke_style(&GRID_COLOR.into());
        self.ctx.set_fill_style(&TEXT_COLOR.into());

        self.ctx.set_text_align("right");
        self.ctx.set_text_baseline("middle");
        for tick in 0..=Y_TICKS {
            let value = range.min + (range.max - range.min) * f64::from(tick) / f64::from(Y_TICKS);
            let y = area.value_to_y(value, range);

            self.ctx.begin_path();
            self.ctx.move_to(area.left, y);
            self.ctx.line_to(area.left + area.width, y);
            self.ctx.stroke();

            self.fill_text(&to_fixed(value, 2), area.left - 8.0, y);
        }

        let len = payload.labels.len();
        let step = label_step(len, area.width);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("top");
        for (index, label) in payload.labels.iter().enumerate().step_by(step) {
            let x = area.index_to_x(index, len);

            self.ctx.begin_path();
            self.ctx.move_to(x, area.top);
            self.ctx.line_to(x, area.top + area.height);
            self.ctx.stroke();

            self.fill_text(label, x, area.top + area.height + 8.0);
        }

        debug!(labels = len, step, min = range.min, max = range.max, "grid rendered");
    }

    fn render_series(&self, series: &ChartSeries, area: &PlotArea, range: &ValueRange) {
        let len = series.values.len();

        self.ctx.set_stroke_style(&series.color.into());
        self.ctx.set_line_width(if series.dash.is_some() { 1.0 } else { 2.0 });
        self.set_dash(series.dash);

        self.ctx.begin_path();
        let mut pen_down = false;
        for (index, value) in series.values.iter().enumerate() {
            // A gap in the line for unparseable cells
            if !value.is_finite() {
                pen_down = false;
                continue;
            }

            let x = area.index_to_x(index, len);
            let y = area.value_to_y(*value, range);
            if pen_down {
                self.ctx.line_to(x, y);
            } else {
                self.ctx.move_to(x, y);
                pen_down = true;
            }
        }
        self.ctx.stroke();
    }

    fn render_hover(&self, payload: &ChartPayload, area: &PlotArea, range: &ValueRange, index: usize) {
        let len = payload.labels.len();
        if index >= len {
            return;
        }

        let x = area.index_to_x(index, len);

        self.set_dash(None);
        self.ctx.set_line_width(1.0);
        self.ctx.set_stroke_style(&TEXT_COLOR.into());
        self.ctx.begin_path();
        self.ctx.move_to(x, area.top);
        self.ctx.line_to(x, area.top + area.height);
        self.ctx.stroke();

        let Some(value) = payload.live.values.get(index).filter(|value| value.is_finite()) else {
            return;
        };

        self.ctx.set_fill_style(&payload.live.color.into());
        self.ctx.begin_path();
        if let Err(err) = self
            .ctx
            .arc(x, area.value_to_y(*value, range), 4.0, 0.0, 2.0 * PI)
        {
            error!("arc drawing error: {err:?}");
        }
        self.ctx.fill();
    }

    fn render_legend(&self, payload: &ChartPayload) {
        self.set_dash(None);
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("middle");

        let mut x = MARGIN_LEFT;
        for series in payload.series() {
            self.ctx.set_fill_style(&series.color.into());
            self.ctx.fill_rect(x, 12.0, 12.0, 12.0);

            self.ctx.set_fill_style(&TEXT_COLOR.into());
            self.fill_text(&series.label, x + 16.0, 18.0);

            x += 24.0 + self.measure_text(&series.label);
        }
    }

    fn set_dash(&self, dash: Option<[f64; 2]>) {
        let segments = match dash {
            Some([on, off]) => Array::of2(&JsValue::from(on), &JsValue::from(off)),
            None => Array::new(),
        };

        if let Err(err) = self.ctx.set_line_dash(&segments) {
            error!("line dash error: {err:?}");
        }
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) {
        if let Err(err) = self.ctx.fill_text(text, x, y) {
            error!("fill text error: {err:?}");
        }
    }

    fn measure_text(&self, text: &str) -> f64 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(err) => {
                error!("measure text error: {err:?}");
                0.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn index_to_x(&self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return self.left + self.width / 2.0;
        }

        self.left + self.width * index as f64 / (len - 1) as f64
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn x_to_index(&self, x: f64, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => {
                let ratio = ((x - self.left) / self.width).clamp(0.0, 1.0);
                Some((ratio * (len - 1) as f64).round() as usize)
            }
        }
    }

    pub fn value_to_y(&self, value: f64, range: &ValueRange) -> f64 {
        let ratio = (value - range.min) / (range.max - range.min);
        self.top + self.height - ratio * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Bounds of every finite value of every series, padded by 5% so the
    /// threshold lines don't sit on the frame.
    pub fn of(payload: &ChartPayload) -> Self {
        let (min, max) = payload
            .series()
            .flat_map(|series| series.values.iter().copied())
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });

        if min > max {
            return Self { min: 0.0, max: 1.0 };
        }

        let padding = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            (max - min) * 0.05
        };

        Self {
            min: min - padding,
            max: max + padding,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn label_step(len: usize, width: f64) -> usize {
    let max_labels = ((width / X_LABEL_SPACING).floor() as usize).max(1);
    ((len as f64 / max_labels as f64).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_chart, types::Quantity};
    use crate::telemetry::parser::parse_csv;

    fn area() -> PlotArea {
        PlotArea::new(MARGIN_LEFT + MARGIN_RIGHT + 100.0, MARGIN_TOP + MARGIN_BOTTOM + 100.0)
    }

    #[test]
    fn index_and_x_roundtrip() {
        let area = area();

        assert!((area.index_to_x(0, 5) - MARGIN_LEFT).abs() < 1e-9);
        assert!((area.index_to_x(4, 5) - (MARGIN_LEFT + 100.0)).abs() < 1e-9);
        for index in 0..5 {
            assert_eq!(area.x_to_index(area.index_to_x(index, 5), 5), Some(index));
        }
    }

    #[test]
    fn x_outside_plot_is_clamped() {
        let area = area();

        assert_eq!(area.x_to_index(-50.0, 5), Some(0));
        assert_eq!(area.x_to_index(10_000.0, 5), Some(4));
        assert_eq!(area.x_to_index(10.0, 0), None);
        assert_eq!(area.x_to_index(10.0, 1), Some(0));
    }

    #[test]
    fn higher_values_are_drawn_higher() {
        let area = area();
        let range = ValueRange { min: 0.0, max: 10.0 };

        assert!((area.value_to_y(0.0, &range) - (MARGIN_TOP + 100.0)).abs() < 1e-9);
        assert!((area.value_to_y(10.0, &range) - MARGIN_TOP).abs() < 1e-9);
        assert!(area.value_to_y(7.0, &range) < area.value_to_y(3.0, &range));
    }

    #[test]
    fn range_covers_thresholds_and_skips_nan() {
        let dataset = parse_csv("time,voltage,current,power\nt0,3.9,7.0,27.3\nt1,oops,7.2,27.7\n");
        let range = ValueRange::of(&build_chart(Quantity::Voltage, &dataset));

        assert!(range.min < 3.5);
        assert!(range.max > 4.2);
        assert!(range.min.is_finite() && range.max.is_finite());
    }

    #[test]
    fn range_of_empty_chart() {
        let range = ValueRange::of(&build_chart(Quantity::Power, &parse_csv("")));

        assert_eq!(range, ValueRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn label_step_thins_out_labels() {
        assert_eq!(label_step(3, 960.0), 1);
        assert_eq!(label_step(100, 960.0), 10);
        assert_eq!(label_step(100, 10.0), 100);
    }
}
