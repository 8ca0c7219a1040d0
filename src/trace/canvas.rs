//! Browser glyph painter backed by a detached 2D canvas.
//!
//! Only usable in the browser: web-sys calls abort on native targets.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{GlyphFrame, GlyphPainter, TracingTarget};
use super::raster::AlphaMask;
use crate::config::FONT_FAMILY_DEFAULT;
use crate::error::TracingError;

/// Thinnest weight of the web font; its outline is the skeleton.
const FONT_WEIGHT: u32 = 200;

fn canvas_err(err: JsValue) -> TracingError {
    TracingError::Canvas(format!("{:?}", err))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasGlyphPainter {
    pub font_family: String,
}

impl Default for CanvasGlyphPainter {
    fn default() -> Self {
        Self {
            font_family: FONT_FAMILY_DEFAULT.to_string(),
        }
    }
}

impl CanvasGlyphPainter {
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }

    fn context(&self, width: u32, height: u32) -> Result<CanvasRenderingContext2d, TracingError> {
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| TracingError::Canvas("no document".into()))?;
        let canvas: HtmlCanvasElement = doc
            .create_element("canvas")
            .map_err(canvas_err)?
            .dyn_into()
            .map_err(|_| TracingError::Canvas("element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas
            .get_context("2d")
            .map_err(canvas_err)?
            .ok_or_else(|| TracingError::Canvas("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| TracingError::Canvas("unexpected context type".into()))
    }
}

impl GlyphPainter for CanvasGlyphPainter {
    fn paint(
        &self,
        target: &TracingTarget,
        frame: &GlyphFrame,
        line_width: f64,
    ) -> Result<AlphaMask, TracingError> {
        let ctx = self.context(frame.width, frame.height)?;
        let text = target.text();
        ctx.set_font(&format!("{} {}px {}", FONT_WEIGHT, frame.font_size, self.font_family));
        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");

        let metrics = ctx.measure_text(text).map_err(canvas_err)?;
        let x = frame.width as f64 / 2.0;
        let y = frame.height as f64 / 2.0
            + (metrics.actual_bounding_box_ascent() - metrics.actual_bounding_box_descent()) / 2.0;

        ctx.set_fill_style_str("black");
        ctx.set_stroke_style_str("black");
        ctx.set_line_join("round");
        ctx.set_line_cap("round");
        ctx.set_line_width(line_width);
        ctx.fill_text(text, x, y).map_err(canvas_err)?;
        ctx.stroke_text(text, x, y).map_err(canvas_err)?;

        let image = ctx
            .get_image_data(0.0, 0.0, frame.width as f64, frame.height as f64)
            .map_err(canvas_err)?;
        AlphaMask::from_rgba(frame.width, frame.height, &image.data().0)
    }
}
