//! Piece outlines.
//!
//! The outline lives in a box padded by `tab_size` on every side, so the
//! piece's own rectangle spans `[ts, ts + w] x [ts, ts + h]` and tabs have
//! room to protrude. Sides are walked clockwise starting at the top-left
//! corner.

use kurbo::{BezPath, Point, Vec2};

use super::{EdgeSign, PieceMetrics, PieceShape};

/// Neck width relative to `tab_size`.
pub const NECK_WIDTH_RATIO: f64 = 0.7;
/// Knob width relative to `tab_size`.
pub const KNOB_WIDTH_RATIO: f64 = 1.2;
/// Knob protrusion is `tab_size - KNOB_CLEARANCE`, which keeps the tip
/// inside the padded box.
const KNOB_CLEARANCE: f64 = 1.0;

struct KnobDims {
    neck: f64,
    knob: f64,
    depth: f64,
}

/// Outline of one piece as a closed cubic path.
pub fn piece_outline(shape: &PieceShape, metrics: &PieceMetrics) -> BezPath {
    let w = metrics.piece_width as f64;
    let h = metrics.piece_height as f64;
    let ts = metrics.tab_size as f64;
    let dims = KnobDims {
        neck: ts * NECK_WIDTH_RATIO,
        knob: ts * KNOB_WIDTH_RATIO,
        depth: ts - KNOB_CLEARANCE,
    };

    let mut path = BezPath::new();
    path.move_to((ts, ts));
    // (edge, midpoint, direction of travel, outward normal, end corner)
    let sides = [
        (
            shape.top,
            Point::new(ts + w / 2.0, ts),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Point::new(w + ts, ts),
        ),
        (
            shape.right,
            Point::new(w + ts, ts + h / 2.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Point::new(w + ts, h + ts),
        ),
        (
            shape.bottom,
            Point::new(ts + w / 2.0, h + ts),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Point::new(ts, h + ts),
        ),
        (
            shape.left,
            Point::new(ts, ts + h / 2.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(-1.0, 0.0),
            Point::new(ts, ts),
        ),
    ];
    for (edge, mid, along, outward, corner) in sides {
        push_side(&mut path, edge, mid, along, outward, &dims);
        path.line_to(corner);
    }
    path.close_path();
    path
}

fn push_side(
    path: &mut BezPath,
    edge: EdgeSign,
    mid: Point,
    along: Vec2,
    outward: Vec2,
    dims: &KnobDims,
) {
    let sign = match edge {
        EdgeSign::Flat => return,
        EdgeSign::Tab => 1.0,
        EdgeSign::Blank => -1.0,
    };
    let out = outward * (sign * dims.depth);
    let half_neck = along * (dims.neck / 2.0);
    let half_knob = along * (dims.knob / 2.0);

    path.line_to(mid - half_neck);
    path.curve_to(mid - half_neck + out * 0.5, mid - half_knob + out, mid + out);
    path.curve_to(mid + half_knob + out, mid + half_neck + out * 0.5, mid + half_neck);
}

/// SVG path data (`d` attribute) for a piece.
pub fn build_piece_path(shape: &PieceShape, metrics: &PieceMetrics) -> String {
    piece_outline(shape, metrics).to_svg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn shape(top: EdgeSign, right: EdgeSign, bottom: EdgeSign, left: EdgeSign) -> PieceShape {
        PieceShape {
            row: 0,
            col: 0,
            top,
            right,
            bottom,
            left,
        }
    }

    fn metrics() -> PieceMetrics {
        PieceMetrics {
            piece_width: 100.0,
            piece_height: 100.0,
            tab_size: 28.0,
        }
    }

    #[test]
    fn svg_is_closed() {
        let d = build_piece_path(
            &shape(EdgeSign::Flat, EdgeSign::Tab, EdgeSign::Blank, EdgeSign::Flat),
            &metrics(),
        );
        assert!(d.starts_with('M'));
        assert!(d.trim_end().ends_with('Z'));
    }

    #[test]
    fn each_shaped_side_adds_two_cubics() {
        let outline = piece_outline(
            &shape(EdgeSign::Tab, EdgeSign::Flat, EdgeSign::Blank, EdgeSign::Tab),
            &metrics(),
        );
        let cubics = outline
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(cubics, 6);
    }

    #[test]
    fn flat_square_is_the_inner_rectangle() {
        let f = EdgeSign::Flat;
        let bbox = piece_outline(&shape(f, f, f, f), &metrics()).bounding_box();
        assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (28.0, 28.0, 128.0, 128.0));
    }

    #[test]
    fn tab_protrudes_and_blank_does_not() {
        let f = EdgeSign::Flat;
        let tab = piece_outline(&shape(f, EdgeSign::Tab, f, f), &metrics()).bounding_box();
        assert!((tab.x1 - (128.0 + 27.0)).abs() < 1e-9);
        let blank = piece_outline(&shape(f, EdgeSign::Blank, f, f), &metrics()).bounding_box();
        assert!((blank.x1 - 128.0).abs() < 1e-9);

        let top_tab = piece_outline(&shape(EdgeSign::Tab, f, f, f), &metrics()).bounding_box();
        assert!((top_tab.y0 - 1.0).abs() < 1e-9);
    }
}
