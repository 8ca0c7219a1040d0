//! Interlocking edge generation.
//!
//! Every interior edge is drawn once into a shared grid and both neighbours
//! read it back, one of them with the sign flipped. That single source of
//! truth is what makes a tab always meet a blank.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::PuzzleSpec;
use crate::error::JigsawError;
use crate::rng::RandomSource;

/// Shape of one piece side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeSign {
    Flat,
    /// Protrudes outward.
    Tab,
    /// Indents inward.
    Blank,
}

impl EdgeSign {
    /// Stored form: `0`, `1` or `-1`.
    pub fn value(self) -> i8 {
        match self {
            EdgeSign::Flat => 0,
            EdgeSign::Tab => 1,
            EdgeSign::Blank => -1,
        }
    }

    pub fn from_value(value: i8) -> Self {
        match value.signum() {
            1 => EdgeSign::Tab,
            -1 => EdgeSign::Blank,
            _ => EdgeSign::Flat,
        }
    }

    /// The sign the neighbour sees on the same edge.
    pub fn flipped(self) -> Self {
        match self {
            EdgeSign::Flat => EdgeSign::Flat,
            EdgeSign::Tab => EdgeSign::Blank,
            EdgeSign::Blank => EdgeSign::Tab,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceShape {
    pub row: u32,
    pub col: u32,
    pub top: EdgeSign,
    pub right: EdgeSign,
    pub bottom: EdgeSign,
    pub left: EdgeSign,
}

impl PieceShape {
    pub fn edge(&self, side: Side) -> EdgeSign {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

/// Shared edge grids. `horizontal` is `(rows + 1) x cols`: row `r` holds the
/// edge above grid row `r`. `vertical` is `rows x (cols + 1)`: column `c`
/// holds the edge left of grid column `c`. Stored signs are seen from the
/// piece above / to the left; outer rows and columns stay `Flat`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGrid {
    rows: usize,
    cols: usize,
    horizontal: Vec<Vec<EdgeSign>>,
    vertical: Vec<Vec<EdgeSign>>,
}

impl EdgeGrid {
    pub fn generate(spec: PuzzleSpec, rng: &mut dyn RandomSource) -> Self {
        let rows = spec.rows as usize;
        let cols = spec.cols as usize;
        let mut horizontal = vec![vec![EdgeSign::Flat; cols]; rows + 1];
        for row in horizontal.iter_mut().take(rows).skip(1) {
            for edge in row.iter_mut() {
                *edge = draw_sign(rng);
            }
        }

        let mut vertical = vec![vec![EdgeSign::Flat; cols + 1]; rows];
        for row in vertical.iter_mut() {
            for edge in row.iter_mut().take(cols).skip(1) {
                *edge = draw_sign(rng);
            }
        }

        Self {
            rows,
            cols,
            horizontal,
            vertical,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Four signs of the piece at `(row, col)`, oriented from that piece.
    pub fn shape(&self, row: usize, col: usize) -> PieceShape {
        PieceShape {
            row: row as u32,
            col: col as u32,
            top: self.horizontal[row][col].flipped(),
            bottom: self.horizontal[row + 1][col],
            left: self.vertical[row][col].flipped(),
            right: self.vertical[row][col + 1],
        }
    }

    /// Shapes in row-major order; index equals piece id.
    pub fn shapes(&self) -> Vec<PieceShape> {
        let mut shapes = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                shapes.push(self.shape(row, col));
            }
        }
        shapes
    }
}

fn draw_sign(rng: &mut dyn RandomSource) -> EdgeSign {
    if rng.coin() {
        EdgeSign::Tab
    } else {
        EdgeSign::Blank
    }
}

/// Generates one consistent shape per grid cell (row-major). A grid with
/// no rows or no columns is rejected.
pub fn generate_puzzle(
    spec: PuzzleSpec,
    rng: &mut dyn RandomSource,
) -> Result<Vec<PieceShape>, JigsawError> {
    let spec = PuzzleSpec::new(spec.rows, spec.cols)?;
    let grid = EdgeGrid::generate(spec, rng);
    let shapes = grid.shapes();
    tracing::debug!(
        rows = spec.rows,
        cols = spec.cols,
        tabs = shapes
            .iter()
            .flat_map(|s| Side::ALL.map(|side| s.edge(side)))
            .filter(|e| *e == EdgeSign::Tab)
            .count(),
        "generated jigsaw edges"
    );
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;

    #[test]
    fn flip_is_an_involution() {
        for sign in [EdgeSign::Flat, EdgeSign::Tab, EdgeSign::Blank] {
            assert_eq!(sign.flipped().flipped(), sign);
            assert_eq!(sign.flipped().value(), -sign.value());
            assert_eq!(EdgeSign::from_value(sign.value()), sign);
        }
    }

    #[test]
    fn single_cell_is_all_flat() {
        let mut rng = SplitMix64::seeded(9);
        let shapes = generate_puzzle(PuzzleSpec::new(1, 1).unwrap(), &mut rng).unwrap();
        assert_eq!(shapes.len(), 1);
        for side in Side::ALL {
            assert_eq!(shapes[0].edge(side), EdgeSign::Flat);
        }
    }

    #[test]
    fn interior_edges_are_never_flat() {
        let mut rng = SplitMix64::seeded(11);
        let grid = EdgeGrid::generate(PuzzleSpec::new(4, 5).unwrap(), &mut rng);
        for row in 0..4 {
            for col in 0..5 {
                let s = grid.shape(row, col);
                assert_eq!(s.top == EdgeSign::Flat, row == 0);
                assert_eq!(s.bottom == EdgeSign::Flat, row == 3);
                assert_eq!(s.left == EdgeSign::Flat, col == 0);
                assert_eq!(s.right == EdgeSign::Flat, col == 4);
            }
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let spec = PuzzleSpec::new(3, 3).unwrap();
        let a = generate_puzzle(spec, &mut SplitMix64::seeded(5)).unwrap();
        let b = generate_puzzle(spec, &mut SplitMix64::seeded(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hand_built_empty_grid_is_rejected() {
        let mut rng = SplitMix64::seeded(1);
        for spec in [PuzzleSpec { rows: 0, cols: 3 }, PuzzleSpec { rows: 2, cols: 0 }] {
            assert_eq!(
                generate_puzzle(spec, &mut rng),
                Err(JigsawError::EmptyGrid {
                    rows: spec.rows,
                    cols: spec.cols
                })
            );
        }
    }
}
