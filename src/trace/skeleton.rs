//! Skeleton extraction and zone classification.
//!
//! The target is painted three times around the same centre line: thin (the
//! skeleton checkpoints are scanned from), medium (the sloppy band) and
//! brush-wide (the perfect band). Checkpoints come from run midpoints of the
//! thin raster, snapped onto the dominant vertical and horizontal stroke
//! lines so straight strokes get evenly aligned dots.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::{GlyphFrame, GlyphPainter, TracingTarget};
use super::raster::AlphaMask;
use crate::config::TracingConfig;
use crate::error::TracingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Zone {
    Danger,
    Sloppy,
    Perfect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Checkpoint {
    pub x: f64,
    pub y: f64,
    pub touched: bool,
}

/// Per-pixel zone of a drawing canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneMap {
    width: u32,
    height: u32,
    zones: Vec<Zone>,
}

impl ZoneMap {
    /// Everything starts as `Danger`; the sloppy band is laid over it and the
    /// perfect band over that.
    pub fn from_masks(sloppy: &AlphaMask, perfect: &AlphaMask) -> Result<Self, TracingError> {
        if !sloppy.same_size(perfect) {
            return Err(TracingError::SizeMismatch {
                expected_width: sloppy.width(),
                expected_height: sloppy.height(),
                width: perfect.width(),
                height: perfect.height(),
            });
        }
        let (width, height) = (sloppy.width(), sloppy.height());
        let mut zones = vec![Zone::Danger; width as usize * height as usize];
        for (zone, &alpha) in zones.iter_mut().zip(sloppy.data()) {
            if alpha > super::raster::OPAQUE_ALPHA {
                *zone = Zone::Sloppy;
            }
        }
        for (zone, &alpha) in zones.iter_mut().zip(perfect.data()) {
            if alpha > super::raster::OPAQUE_ALPHA {
                *zone = Zone::Perfect;
            }
        }
        Ok(Self {
            width,
            height,
            zones,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `None` outside the canvas.
    pub fn zone_at(&self, x: i64, y: i64) -> Option<Zone> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.zones[y as usize * self.width as usize + x as usize])
    }

    /// Zone under a pointer position (floored to the pixel grid).
    pub fn zone_at_point(&self, x: f64, y: f64) -> Option<Zone> {
        self.zone_at(x.floor() as i64, y.floor() as i64)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Skeleton {
    pub target: TracingTarget,
    pub frame: GlyphFrame,
    pub checkpoints: Vec<Checkpoint>,
    pub zones: ZoneMap,
}

impl Skeleton {
    pub fn font_size(&self) -> f64 {
        self.frame.font_size
    }

    pub fn width(&self) -> u32 {
        self.frame.width
    }

    pub fn height(&self) -> u32 {
        self.frame.height
    }
}

/// Run midpoints along rows and columns of the skeleton raster.
fn scan_candidates(mask: &AlphaMask) -> Vec<(f64, f64)> {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let mut out = Vec::new();

    for y in 0..h {
        let mut start = None;
        for x in 0..=w {
            let opaque = x < w && mask.is_opaque(x, y);
            match (opaque, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    out.push(((s + x - 1) as f64 / 2.0, y as f64));
                    start = None;
                }
                _ => {}
            }
        }
    }

    for x in 0..w {
        let mut start = None;
        for y in 0..=h {
            let opaque = y < h && mask.is_opaque(x, y);
            match (opaque, start) {
                (true, None) => start = Some(y),
                (false, Some(s)) => {
                    out.push((x as f64, (s + y - 1) as f64 / 2.0));
                    start = None;
                }
                _ => {}
            }
        }
    }
    out
}

/// Weighted centres of histogram clusters that are heavy enough to count
/// as a stroke line.
fn find_peaks(hist: &BTreeMap<i64, usize>, snap: f64, min_weight: f64) -> Vec<f64> {
    let mut peaks = Vec::new();
    let mut sum = 0.0;
    let mut count = 0usize;
    for (&key, &weight) in hist {
        let k = key as f64;
        if count == 0 || (k - sum / count as f64).abs() <= snap {
            sum += k * weight as f64;
            count += weight;
        } else {
            if count as f64 > min_weight {
                peaks.push(sum / count as f64);
            }
            sum = k * weight as f64;
            count = weight;
        }
    }
    if count as f64 > min_weight {
        peaks.push(sum / count as f64);
    }
    peaks
}

fn snap_to(value: f64, peaks: &[f64], snap: f64) -> f64 {
    peaks
        .iter()
        .copied()
        .find(|p| (value - p).abs() <= snap)
        .unwrap_or(value)
}

/// Turns thin-raster candidates into evenly spaced checkpoints.
pub fn extract_checkpoints(mask: &AlphaMask, font_size: f64) -> Vec<Checkpoint> {
    let mut candidates = scan_candidates(mask);
    let snap = (font_size * 0.02).max(2.0);
    let min_weight = font_size / 5.0;

    let mut x_hist = BTreeMap::new();
    let mut y_hist = BTreeMap::new();
    for &(x, y) in &candidates {
        *x_hist.entry(x.round() as i64).or_insert(0usize) += 1;
        *y_hist.entry(y.round() as i64).or_insert(0usize) += 1;
    }
    let x_peaks = find_peaks(&x_hist, snap, min_weight);
    let y_peaks = find_peaks(&y_hist, snap, min_weight);

    for c in candidates.iter_mut() {
        c.0 = snap_to(c.0, &x_peaks, snap);
        c.1 = snap_to(c.1, &y_peaks, snap);
    }
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.total_cmp(&b.0)));

    let min_dist = (font_size / 12.0).max(15.0);
    let mut kept: Vec<Checkpoint> = Vec::new();
    for (x, y) in candidates {
        let clear = kept
            .iter()
            .all(|k| (k.x - x).hypot(k.y - y) >= min_dist);
        if clear {
            kept.push(Checkpoint {
                x,
                y,
                touched: false,
            });
        }
    }
    kept
}

/// Builds checkpoints and zones for a target on a `width x height` canvas.
/// A painter that leaves the thin raster empty yields no checkpoints.
pub fn build_skeleton(
    target: &TracingTarget,
    width: u32,
    height: u32,
    painter: &dyn GlyphPainter,
    config: &TracingConfig,
) -> Result<Skeleton, TracingError> {
    let frame = GlyphFrame::new(target, width, height)?;
    let thin = painter.paint(target, &frame, config.skeleton_width)?;
    let checkpoints = extract_checkpoints(&thin, frame.font_size);
    if checkpoints.is_empty() {
        tracing::warn!(text = target.text(), "no checkpoints found, coverage is not gated");
    }

    let sloppy = painter.paint(target, &frame, config.sloppy_width(frame.font_size))?;
    let perfect = painter.paint(target, &frame, config.brush_width)?;
    let zones = ZoneMap::from_masks(&sloppy, &perfect)?;

    tracing::debug!(
        text = target.text(),
        width,
        height,
        font_size = frame.font_size,
        checkpoints = checkpoints.len(),
        "built tracing skeleton"
    );
    Ok(Skeleton {
        target: target.clone(),
        frame,
        checkpoints,
        zones,
    })
}

/// Skeletons keyed by target and canvas size.
#[derive(Debug, Default)]
pub struct SkeletonCache {
    entries: BTreeMap<(String, u32, u32), Skeleton>,
}

impl SkeletonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        target: &TracingTarget,
        width: u32,
        height: u32,
        painter: &dyn GlyphPainter,
        config: &TracingConfig,
    ) -> Result<&Skeleton, TracingError> {
        let key = (target.text().to_string(), width, height);
        if !self.entries.contains_key(&key) {
            let skeleton = build_skeleton(target, width, height, painter, config)?;
            self.entries.insert(key.clone(), skeleton);
        }
        self.entries.get(&key).ok_or(TracingError::EmptyTarget)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
