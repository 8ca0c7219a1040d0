//! Target sizing and placement on the drawing canvas.

use kurbo::{Affine, BezPath, Shape, Vec2};

use super::font::StrokeFont;
use super::raster::AlphaMask;
use crate::error::TracingError;

/// Cap height relative to the nominal font size.
pub const CAP_HEIGHT_RATIO: f64 = 0.7;
/// Share of the canvas a laid-out target may fill on either axis.
pub const FIT_MARGIN: f64 = 0.9;

/// A letter, digit or short word to trace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TracingTarget {
    text: String,
}

impl TracingTarget {
    pub fn new(text: &str) -> Result<Self, TracingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TracingError::EmptyTarget);
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_word(&self) -> bool {
        self.text.chars().count() > 1
    }
}

/// Font size for a target: words share the width, single glyphs fill most
/// of the canvas.
pub fn font_size_for(target: &str, width: u32, height: u32) -> f64 {
    let w = width as f64;
    let h = height as f64;
    let chars = target.chars().count();
    if chars > 1 {
        (w / chars as f64 * 1.5).min(h * 0.6)
    } else {
        (w * 0.8).min(h * 0.8)
    }
}

/// Canvas size plus the font size the target is drawn at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphFrame {
    pub width: u32,
    pub height: u32,
    pub font_size: f64,
}

impl GlyphFrame {
    pub fn new(target: &TracingTarget, width: u32, height: u32) -> Result<Self, TracingError> {
        if width == 0 || height == 0 {
            return Err(TracingError::EmptyCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            font_size: font_size_for(target.text(), width, height),
        })
    }
}

/// Renders a target into an alpha raster at a given stroke width.
pub trait GlyphPainter {
    fn paint(
        &self,
        target: &TracingTarget,
        frame: &GlyphFrame,
        line_width: f64,
    ) -> Result<AlphaMask, TracingError>;
}

/// Centre-line path of `target` in canvas pixels, centred on the canvas.
pub fn layout_target(
    font: &StrokeFont,
    target: &TracingTarget,
    frame: &GlyphFrame,
) -> Result<BezPath, TracingError> {
    let mut path = font.outline(target.text())?;
    if path.elements().is_empty() {
        return Err(TracingError::EmptyTarget);
    }
    let bbox = path.bounding_box();
    let w = frame.width as f64;
    let h = frame.height as f64;

    let mut scale = frame.font_size * CAP_HEIGHT_RATIO;
    if bbox.width() > 0.0 {
        scale = scale.min(w * FIT_MARGIN / bbox.width());
    }
    if bbox.height() > 0.0 {
        scale = scale.min(h * FIT_MARGIN / bbox.height());
    }

    let offset = Vec2::new(w / 2.0, h / 2.0) - bbox.center().to_vec2() * scale;
    path.apply_affine(Affine::translate(offset) * Affine::scale(scale));
    Ok(path)
}

impl GlyphPainter for StrokeFont {
    fn paint(
        &self,
        target: &TracingTarget,
        frame: &GlyphFrame,
        line_width: f64,
    ) -> Result<AlphaMask, TracingError> {
        let path = layout_target(self, target, frame)?;
        let mut mask = AlphaMask::new(frame.width, frame.height);
        mask.stroke_path(&path, line_width);
        Ok(mask)
    }
}
