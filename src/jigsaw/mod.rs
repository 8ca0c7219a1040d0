//! Jigsaw engine: interlocking piece generation, outlines and snap detection.
//!
//! A puzzle is a `rows x cols` grid laid over a square picture. Pieces are
//! identified by their row-major index ([`PieceId`]); everything else
//! (shapes, transforms, render order) is keyed by that id.

mod assembly;
mod edges;
mod path;
mod puzzle;

pub use assembly::{Assembly, DragOutcome, PieceTransform, Placement};
pub use edges::{generate_puzzle, EdgeGrid, EdgeSign, PieceShape, Side};
pub use path::{build_piece_path, piece_outline, KNOB_WIDTH_RATIO, NECK_WIDTH_RATIO};
pub use puzzle::JigsawPuzzle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::JigsawError;

pub type PieceId = usize;

/// Grid dimensions of one puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PuzzleSpec {
    pub rows: u32,
    pub cols: u32,
}

impl PuzzleSpec {
    pub fn new(rows: u32, cols: u32) -> Result<Self, JigsawError> {
        if rows == 0 || cols == 0 {
            return Err(JigsawError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Grid size for a puzzle level: five levels per size step, 2x2 up to 5x5.
    pub fn for_level(level: u32) -> Self {
        let side = match level {
            0..=5 => 2,
            6..=10 => 3,
            11..=15 => 4,
            _ => 5,
        };
        Self {
            rows: side,
            cols: side,
        }
    }

    pub fn piece_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn piece_id(&self, row: u32, col: u32) -> PieceId {
        row as usize * self.cols as usize + col as usize
    }

    /// `(row, col)` of a piece id. A column-less grid maps everything to
    /// column 0.
    pub fn cell(&self, id: PieceId) -> (u32, u32) {
        let cols = (self.cols as usize).max(1);
        ((id / cols) as u32, (id % cols) as u32)
    }
}

/// Pixel geometry shared by every piece of one puzzle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceMetrics {
    pub piece_width: f32,
    pub piece_height: f32,
    /// Padding around the piece box that leaves room for tabs.
    pub tab_size: f32,
}

impl PieceMetrics {
    pub fn for_board(
        spec: PuzzleSpec,
        board_width: f32,
        board_height: f32,
        tab_size_ratio: f32,
    ) -> Result<Self, JigsawError> {
        if !(board_width > 0.0 && board_height > 0.0) {
            return Err(JigsawError::InvalidBoard {
                width: board_width,
                height: board_height,
            });
        }
        let piece_width = board_width / spec.cols as f32;
        let piece_height = board_height / spec.rows as f32;
        Ok(Self {
            piece_width,
            piece_height,
            tab_size: piece_width.min(piece_height) * tab_size_ratio,
        })
    }

    /// Top-left corner of the padded piece box when the piece sits in its slot.
    pub fn slot_origin(&self, row: u32, col: u32) -> (f32, f32) {
        (
            col as f32 * self.piece_width - self.tab_size,
            row as f32 * self.piece_height - self.tab_size,
        )
    }

    /// Size of the padded box a piece is drawn into.
    pub fn padded_size(&self) -> (f32, f32) {
        (
            self.piece_width + 2.0 * self.tab_size,
            self.piece_height + 2.0 * self.tab_size,
        )
    }
}
