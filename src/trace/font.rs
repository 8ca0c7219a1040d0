//! Built-in single-stroke font.
//!
//! Glyphs are centre lines, not outlines, which is exactly what a tracing
//! skeleton needs. Units: cap top at `y = 0`, baseline at `y = 1`, x-height
//! top at `y = 0.55`, descenders down to `y = 1.3`. Angles are in degrees,
//! measured clockwise from +x (screen coordinates).

use kurbo::{Arc, BezPath, Point, Shape, Vec2};

use crate::error::TracingError;

/// Default gap between glyphs, in font units.
pub const LETTER_SPACING: f64 = 0.08;
const ARC_TOLERANCE: f64 = 1e-3;
const WORD_SPACE: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stroke {
    Line(&'static [(f64, f64)]),
    Arc {
        center: (f64, f64),
        radii: (f64, f64),
        start: f64,
        sweep: f64,
    },
}

const fn line(points: &'static [(f64, f64)]) -> Stroke {
    Stroke::Line(points)
}

const fn arc(cx: f64, cy: f64, rx: f64, ry: f64, start: f64, sweep: f64) -> Stroke {
    Stroke::Arc {
        center: (cx, cy),
        radii: (rx, ry),
        start,
        sweep,
    }
}

/// Diacritic drawn above a base glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mark {
    Ring { y: f64 },
    Dots { y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub advance: f64,
    pub strokes: &'static [Stroke],
    pub mark: Option<Mark>,
}

const UPPER_RING_Y: f64 = -0.2;
const UPPER_DOTS_Y: f64 = -0.16;
const LOWER_RING_Y: f64 = 0.36;
const LOWER_DOTS_Y: f64 = 0.38;
const RING_RADIUS: f64 = 0.08;
const DOT_SPREAD: f64 = 0.13;

static GLYPHS: &[(char, f64, &[Stroke])] = &[
    ('A', 0.8, &[line(&[(0.1, 1.0), (0.4, 0.0), (0.7, 1.0)]), line(&[(0.21, 0.65), (0.59, 0.65)])]),
    (
        'B',
        0.7,
        &[
            line(&[(0.1, 1.0), (0.1, 0.0), (0.38, 0.0)]),
            arc(0.38, 0.25, 0.2, 0.25, 270.0, 180.0),
            line(&[(0.1, 0.5), (0.4, 0.5)]),
            arc(0.4, 0.75, 0.2, 0.25, 270.0, 180.0),
            line(&[(0.4, 1.0), (0.1, 1.0)]),
        ],
    ),
    ('C', 0.75, &[arc(0.42, 0.5, 0.32, 0.5, 315.0, -270.0)]),
    (
        'D',
        0.75,
        &[
            line(&[(0.35, 0.0), (0.1, 0.0), (0.1, 1.0), (0.35, 1.0)]),
            arc(0.35, 0.5, 0.3, 0.5, 270.0, 180.0),
        ],
    ),
    ('E', 0.65, &[line(&[(0.55, 0.0), (0.1, 0.0), (0.1, 1.0), (0.55, 1.0)]), line(&[(0.1, 0.5), (0.45, 0.5)])]),
    ('F', 0.6, &[line(&[(0.5, 0.0), (0.1, 0.0), (0.1, 1.0)]), line(&[(0.1, 0.5), (0.42, 0.5)])]),
    (
        'G',
        0.8,
        &[arc(0.45, 0.5, 0.35, 0.5, 315.0, -270.0), line(&[(0.7, 0.85), (0.7, 0.55), (0.47, 0.55)])],
    ),
    (
        'H',
        0.75,
        &[line(&[(0.1, 0.0), (0.1, 1.0)]), line(&[(0.65, 0.0), (0.65, 1.0)]), line(&[(0.1, 0.5), (0.65, 0.5)])],
    ),
    ('I', 0.3, &[line(&[(0.15, 0.0), (0.15, 1.0)])]),
    ('J', 0.55, &[line(&[(0.45, 0.0), (0.45, 0.75)]), arc(0.275, 0.75, 0.175, 0.25, 0.0, 180.0)]),
    (
        'K',
        0.7,
        &[line(&[(0.1, 0.0), (0.1, 1.0)]), line(&[(0.6, 0.0), (0.1, 0.6)]), line(&[(0.28, 0.42), (0.6, 1.0)])],
    ),
    ('L', 0.55, &[line(&[(0.1, 0.0), (0.1, 1.0), (0.5, 1.0)])]),
    ('M', 0.9, &[line(&[(0.1, 1.0), (0.1, 0.0), (0.45, 0.7), (0.8, 0.0), (0.8, 1.0)])]),
    ('N', 0.75, &[line(&[(0.1, 1.0), (0.1, 0.0), (0.65, 1.0), (0.65, 0.0)])]),
    ('O', 0.85, &[arc(0.425, 0.5, 0.325, 0.5, 0.0, 360.0)]),
    (
        'P',
        0.65,
        &[
            line(&[(0.1, 1.0), (0.1, 0.0), (0.35, 0.0)]),
            arc(0.35, 0.27, 0.2, 0.27, 270.0, 180.0),
            line(&[(0.35, 0.54), (0.1, 0.54)]),
        ],
    ),
    ('Q', 0.85, &[arc(0.425, 0.5, 0.325, 0.5, 0.0, 360.0), line(&[(0.5, 0.7), (0.75, 1.0)])]),
    (
        'R',
        0.7,
        &[
            line(&[(0.1, 1.0), (0.1, 0.0), (0.35, 0.0)]),
            arc(0.35, 0.27, 0.2, 0.27, 270.0, 180.0),
            line(&[(0.35, 0.54), (0.1, 0.54)]),
            line(&[(0.32, 0.54), (0.6, 1.0)]),
        ],
    ),
    (
        'S',
        0.65,
        &[arc(0.325, 0.25, 0.225, 0.25, 330.0, -240.0), arc(0.325, 0.75, 0.225, 0.25, 270.0, 240.0)],
    ),
    ('T', 0.7, &[line(&[(0.05, 0.0), (0.65, 0.0)]), line(&[(0.35, 0.0), (0.35, 1.0)])]),
    (
        'U',
        0.75,
        &[
            line(&[(0.1, 0.0), (0.1, 0.7)]),
            arc(0.375, 0.7, 0.275, 0.3, 180.0, -180.0),
            line(&[(0.65, 0.7), (0.65, 0.0)]),
        ],
    ),
    ('V', 0.75, &[line(&[(0.05, 0.0), (0.375, 1.0), (0.7, 0.0)])]),
    ('W', 1.0, &[line(&[(0.05, 0.0), (0.27, 1.0), (0.5, 0.3), (0.73, 1.0), (0.95, 0.0)])]),
    ('X', 0.7, &[line(&[(0.1, 0.0), (0.6, 1.0)]), line(&[(0.6, 0.0), (0.1, 1.0)])]),
    ('Y', 0.7, &[line(&[(0.05, 0.0), (0.35, 0.5), (0.65, 0.0)]), line(&[(0.35, 0.5), (0.35, 1.0)])]),
    ('Z', 0.7, &[line(&[(0.1, 0.0), (0.6, 0.0), (0.1, 1.0), (0.6, 1.0)])]),
    // lowercase
    ('a', 0.6, &[arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0), line(&[(0.5, 0.55), (0.5, 1.0)])]),
    ('b', 0.6, &[line(&[(0.1, 0.0), (0.1, 1.0)]), arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0)]),
    ('c', 0.55, &[arc(0.3, 0.775, 0.2, 0.225, 315.0, -270.0)]),
    ('d', 0.6, &[arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0), line(&[(0.5, 0.0), (0.5, 1.0)])]),
    ('e', 0.6, &[line(&[(0.1, 0.775), (0.5, 0.775)]), arc(0.3, 0.775, 0.2, 0.225, 0.0, -315.0)]),
    (
        'f',
        0.45,
        &[
            arc(0.35, 0.15, 0.13, 0.15, 300.0, -120.0),
            line(&[(0.22, 0.15), (0.22, 1.0)]),
            line(&[(0.08, 0.55), (0.4, 0.55)]),
        ],
    ),
    (
        'g',
        0.6,
        &[
            arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0),
            line(&[(0.5, 0.55), (0.5, 1.1)]),
            arc(0.3, 1.1, 0.2, 0.2, 0.0, 150.0),
        ],
    ),
    (
        'h',
        0.6,
        &[line(&[(0.1, 0.0), (0.1, 1.0)]), arc(0.3, 0.75, 0.2, 0.2, 180.0, 180.0), line(&[(0.5, 0.75), (0.5, 1.0)])],
    ),
    ('i', 0.25, &[line(&[(0.12, 0.55), (0.12, 1.0)]), line(&[(0.12, 0.36), (0.12, 0.36)])]),
    (
        'j',
        0.35,
        &[
            line(&[(0.22, 0.55), (0.22, 1.1)]),
            arc(0.12, 1.1, 0.1, 0.2, 0.0, 150.0),
            line(&[(0.22, 0.36), (0.22, 0.36)]),
        ],
    ),
    (
        'k',
        0.55,
        &[line(&[(0.1, 0.0), (0.1, 1.0)]), line(&[(0.45, 0.55), (0.1, 0.82)]), line(&[(0.22, 0.73), (0.45, 1.0)])],
    ),
    ('l', 0.25, &[line(&[(0.12, 0.0), (0.12, 1.0)])]),
    (
        'm',
        0.9,
        &[
            line(&[(0.1, 0.55), (0.1, 1.0)]),
            arc(0.275, 0.75, 0.175, 0.2, 180.0, 180.0),
            line(&[(0.45, 0.75), (0.45, 1.0)]),
            arc(0.625, 0.75, 0.175, 0.2, 180.0, 180.0),
            line(&[(0.8, 0.75), (0.8, 1.0)]),
        ],
    ),
    (
        'n',
        0.6,
        &[line(&[(0.1, 0.55), (0.1, 1.0)]), arc(0.3, 0.75, 0.2, 0.2, 180.0, 180.0), line(&[(0.5, 0.75), (0.5, 1.0)])],
    ),
    ('o', 0.6, &[arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0)]),
    ('p', 0.6, &[line(&[(0.1, 0.55), (0.1, 1.3)]), arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0)]),
    ('q', 0.6, &[arc(0.3, 0.775, 0.2, 0.225, 0.0, 360.0), line(&[(0.5, 0.55), (0.5, 1.3)])]),
    ('r', 0.45, &[line(&[(0.1, 0.55), (0.1, 1.0)]), arc(0.3, 0.75, 0.2, 0.2, 180.0, 135.0)]),
    (
        's',
        0.5,
        &[arc(0.25, 0.6625, 0.15, 0.1125, 330.0, -240.0), arc(0.25, 0.8875, 0.15, 0.1125, 270.0, 240.0)],
    ),
    ('t', 0.4, &[line(&[(0.2, 0.2), (0.2, 1.0)]), line(&[(0.05, 0.55), (0.35, 0.55)])]),
    (
        'u',
        0.6,
        &[
            line(&[(0.1, 0.55), (0.1, 0.8)]),
            arc(0.3, 0.8, 0.2, 0.2, 180.0, -180.0),
            line(&[(0.5, 0.55), (0.5, 1.0)]),
        ],
    ),
    ('v', 0.55, &[line(&[(0.05, 0.55), (0.275, 1.0), (0.5, 0.55)])]),
    ('w', 0.85, &[line(&[(0.05, 0.55), (0.23, 1.0), (0.425, 0.65), (0.62, 1.0), (0.8, 0.55)])]),
    ('x', 0.55, &[line(&[(0.1, 0.55), (0.45, 1.0)]), line(&[(0.45, 0.55), (0.1, 1.0)])]),
    ('y', 0.55, &[line(&[(0.05, 0.55), (0.275, 1.0)]), line(&[(0.5, 0.55), (0.2, 1.3)])]),
    ('z', 0.55, &[line(&[(0.1, 0.55), (0.45, 0.55), (0.1, 1.0), (0.45, 1.0)])]),
    // digits
    ('0', 0.6, &[arc(0.3, 0.5, 0.2, 0.5, 0.0, 360.0)]),
    ('1', 0.5, &[line(&[(0.15, 0.2), (0.35, 0.0), (0.35, 1.0)])]),
    ('2', 0.6, &[arc(0.3, 0.28, 0.2, 0.28, 200.0, 190.0), line(&[(0.473, 0.42), (0.1, 1.0), (0.5, 1.0)])]),
    (
        '3',
        0.6,
        &[arc(0.3, 0.25, 0.2, 0.25, 210.0, 240.0), arc(0.3, 0.75, 0.22, 0.25, 270.0, 240.0)],
    ),
    ('4', 0.6, &[line(&[(0.4, 1.0), (0.4, 0.0), (0.05, 0.7), (0.55, 0.7)])]),
    (
        '5',
        0.6,
        &[line(&[(0.5, 0.0), (0.15, 0.0), (0.12, 0.45)]), arc(0.3, 0.7, 0.22, 0.3, 220.0, 270.0)],
    ),
    ('6', 0.6, &[arc(0.3, 0.72, 0.2, 0.28, 0.0, 360.0), line(&[(0.45, 0.02), (0.13, 0.6)])]),
    ('7', 0.6, &[line(&[(0.1, 0.0), (0.5, 0.0), (0.22, 1.0)])]),
    ('8', 0.6, &[arc(0.3, 0.25, 0.17, 0.25, 0.0, 360.0), arc(0.3, 0.75, 0.21, 0.25, 0.0, 360.0)]),
    ('9', 0.6, &[arc(0.3, 0.28, 0.2, 0.28, 0.0, 360.0), line(&[(0.5, 0.28), (0.35, 1.0)])]),
];

/// Single-stroke font covering the Swedish alphabet and digits.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeFont {
    pub letter_spacing: f64,
}

impl Default for StrokeFont {
    fn default() -> Self {
        Self {
            letter_spacing: LETTER_SPACING,
        }
    }
}

impl StrokeFont {
    pub fn glyph(&self, c: char) -> Option<Glyph> {
        let (base, mark) = match c {
            'Å' => ('A', Some(Mark::Ring { y: UPPER_RING_Y })),
            'Ä' => ('A', Some(Mark::Dots { y: UPPER_DOTS_Y })),
            'Ö' => ('O', Some(Mark::Dots { y: UPPER_DOTS_Y })),
            'å' => ('a', Some(Mark::Ring { y: LOWER_RING_Y })),
            'ä' => ('a', Some(Mark::Dots { y: LOWER_DOTS_Y })),
            'ö' => ('o', Some(Mark::Dots { y: LOWER_DOTS_Y })),
            ' ' => {
                return Some(Glyph {
                    advance: WORD_SPACE,
                    strokes: &[],
                    mark: None,
                });
            }
            other => (other, None),
        };
        GLYPHS
            .iter()
            .find(|(ch, _, _)| *ch == base)
            .map(|&(_, advance, strokes)| Glyph {
                advance,
                strokes,
                mark,
            })
    }

    pub fn supports(&self, text: &str) -> bool {
        text.chars().all(|c| self.glyph(c).is_some())
    }

    /// Centre-line path of `text` in font units, starting at `x = 0`.
    pub fn outline(&self, text: &str) -> Result<BezPath, TracingError> {
        let mut path = BezPath::new();
        let mut cursor = 0.0;
        for c in text.chars() {
            let glyph = self.glyph(c).ok_or(TracingError::UnsupportedGlyph(c))?;
            append_glyph(&mut path, &glyph, cursor);
            cursor += glyph.advance + self.letter_spacing;
        }
        Ok(path)
    }
}

fn append_glyph(path: &mut BezPath, glyph: &Glyph, x: f64) {
    let offset = Vec2::new(x, 0.0);
    for stroke in glyph.strokes {
        match *stroke {
            Stroke::Line(points) => {
                let mut iter = points.iter().map(|&(px, py)| Point::new(px, py) + offset);
                if let Some(first) = iter.next() {
                    path.move_to(first);
                    for p in iter {
                        path.line_to(p);
                    }
                }
            }
            Stroke::Arc {
                center,
                radii,
                start,
                sweep,
            } => {
                let arc = Arc {
                    center: Point::new(center.0, center.1) + offset,
                    radii: Vec2::new(radii.0, radii.1),
                    start_angle: start.to_radians(),
                    sweep_angle: sweep.to_radians(),
                    x_rotation: 0.0,
                };
                path.extend(arc.path_elements(ARC_TOLERANCE));
            }
        }
    }

    let mid = x + glyph.advance / 2.0;
    match glyph.mark {
        Some(Mark::Ring { y }) => {
            let ring = Arc {
                center: Point::new(mid, y),
                radii: Vec2::new(RING_RADIUS, RING_RADIUS),
                start_angle: 0.0,
                sweep_angle: std::f64::consts::TAU,
                x_rotation: 0.0,
            };
            path.extend(ring.path_elements(ARC_TOLERANCE));
        }
        Some(Mark::Dots { y }) => {
            for dx in [-DOT_SPREAD, DOT_SPREAD] {
                let p = Point::new(mid + dx, y);
                path.move_to(p);
                path.line_to(p);
            }
        }
        None => {}
    }
}
