use thiserror::Error;

use crate::jigsaw::PieceId;

/// Errors raised while building or driving a jigsaw puzzle.
///
/// These signal caller bugs (bad configuration or ids); a piece dropped in
/// the wrong place is an ordinary [`crate::jigsaw::Placement`], never an error.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum JigsawError {
    #[error("puzzle grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("board size must be positive (got {width}x{height})")]
    InvalidBoard { width: f32, height: f32 },

    #[error("unknown piece id {0}")]
    UnknownPiece(PieceId),

    #[cfg(feature = "serde_json")]
    #[error("invalid jigsaw config: {0}")]
    Config(String),
}

/// Errors raised while preparing a tracing target or scoring an attempt.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TracingError {
    #[error("tracing target is empty")]
    EmptyTarget,

    #[error("canvas size must be non-zero (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("no stroke glyph for {0:?}")]
    UnsupportedGlyph(char),

    #[error("raster size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("canvas error: {0}")]
    Canvas(String),

    #[cfg(feature = "serde_json")]
    #[error("invalid tracing config: {0}")]
    Config(String),
}
