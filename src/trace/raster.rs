//! Coverage rasters.
//!
//! Everything the tracing engine reads or paints is a single-channel alpha
//! buffer: glyph rasters, the user's ink and the zone masks built from them.

use kurbo::{BezPath, PathEl, Point};

use crate::error::TracingError;

/// A pixel counts as painted when its alpha is above this.
pub const OPAQUE_ALPHA: u8 = 50;
/// Max deviation when flattening curves before painting them.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// `width x height` alpha buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TracingError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TracingError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Takes the alpha channel of an RGBA buffer (canvas `ImageData` layout).
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, TracingError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TracingError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }
        let data = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Alpha at `(x, y)`; `0` outside the buffer.
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn is_opaque(&self, x: i64, y: i64) -> bool {
        self.get(x, y) > OPAQUE_ALPHA
    }

    pub fn same_size(&self, other: &AlphaMask) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn opaque_count(&self) -> usize {
        self.data.iter().filter(|&&a| a > OPAQUE_ALPHA).count()
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Paints a round-capped segment of the given width. Coverage is
    /// max-blended so overlapping strokes never darken.
    pub fn paint_segment(&mut self, p0: Point, p1: Point, width: f64) {
        let r = width / 2.0;
        let pad = r + 1.0;
        let x_min = (p0.x.min(p1.x) - pad).floor().max(0.0) as i64;
        let y_min = (p0.y.min(p1.y) - pad).floor().max(0.0) as i64;
        let x_max = ((p0.x.max(p1.x) + pad).ceil() as i64).min(self.width as i64 - 1);
        let y_max = ((p0.y.max(p1.y) + pad).ceil() as i64).min(self.height as i64 - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = segment_distance(centre, p0, p1);
                let coverage = (r + 0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = (coverage * 255.0).round() as u8;
                let idx = y as usize * self.width as usize + x as usize;
                if alpha > self.data[idx] {
                    self.data[idx] = alpha;
                }
            }
        }
    }

    pub fn paint_dot(&mut self, p: Point, width: f64) {
        self.paint_segment(p, p, width);
    }

    /// Strokes every subpath of `path` with round caps and joins.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64) {
        for line in polylines(path) {
            match line.as_slice() {
                [] => {}
                [p] => self.paint_dot(*p, width),
                points => {
                    for pair in points.windows(2) {
                        self.paint_segment(pair[0], pair[1], width);
                    }
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a -> b`; degenerate segments fall back
/// to point distance.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Flattens a path into one polyline per subpath.
pub fn polylines(path: &BezPath) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    let mut start = Point::ZERO;
    kurbo::flatten(path.elements().iter().copied(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = p;
            lines.push(vec![p]);
        }
        PathEl::LineTo(p) => {
            if let Some(line) = lines.last_mut() {
                line.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut() {
                line.push(start);
            }
        }
        // flatten only emits the three variants above
        _ => {}
    });
    lines
}
