use super::{
    build_piece_path, generate_puzzle, Assembly, DragOutcome, PieceId, PieceMetrics, PieceShape,
    Placement, PuzzleSpec,
};
use crate::announce::{Announcer, PUZZLE_DONE_PREFIX};
use crate::config::JigsawConfig;
use crate::error::JigsawError;
use crate::rng::RandomSource;

/// One playable puzzle: generated shapes, their geometry and placement state.
pub struct JigsawPuzzle {
    label: String,
    shapes: Vec<PieceShape>,
    metrics: PieceMetrics,
    assembly: Assembly,
    announcer: Box<dyn Announcer>,
}

impl JigsawPuzzle {
    /// Generates and scatters a square-board puzzle, then says the label.
    pub fn new(
        label: &str,
        spec: PuzzleSpec,
        board_size: f32,
        config: &JigsawConfig,
        rng: &mut dyn RandomSource,
        mut announcer: Box<dyn Announcer>,
    ) -> Result<Self, JigsawError> {
        let spec = PuzzleSpec::new(spec.rows, spec.cols)?;
        let metrics = PieceMetrics::for_board(spec, board_size, board_size, config.tab_size_ratio)?;
        let shapes = generate_puzzle(spec, rng)?;
        let mut assembly = Assembly::new(spec, &metrics, config);
        assembly.scatter(&metrics, board_size, board_size, config, rng);
        tracing::info!(label, rows = spec.rows, cols = spec.cols, "jigsaw started");
        announcer.announce(label);
        Ok(Self {
            label: label.to_string(),
            shapes,
            metrics,
            assembly,
            announcer,
        })
    }

    pub fn drag(&mut self, piece: PieceId, dx: f32, dy: f32) -> Result<DragOutcome, JigsawError> {
        self.assembly.drag(piece, dx, dy)
    }

    pub fn release(&mut self, piece: PieceId) -> Result<Placement, JigsawError> {
        let placement = self.assembly.release(piece)?;
        self.on_placement(placement);
        Ok(placement)
    }

    pub fn tap(&mut self, piece: PieceId) -> Result<Placement, JigsawError> {
        let placement = self.assembly.tap(piece)?;
        self.on_placement(placement);
        Ok(placement)
    }

    fn on_placement(&mut self, placement: Placement) {
        if placement.completed {
            let line = format!("{} {}", PUZZLE_DONE_PREFIX, self.label);
            self.announcer.announce(&line);
        }
    }

    pub fn piece_path(&self, piece: PieceId) -> Result<String, JigsawError> {
        self.shapes
            .get(piece)
            .map(|shape| build_piece_path(shape, &self.metrics))
            .ok_or(JigsawError::UnknownPiece(piece))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shapes(&self) -> &[PieceShape] {
        &self.shapes
    }

    pub fn metrics(&self) -> &PieceMetrics {
        &self.metrics
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn assembly_mut(&mut self) -> &mut Assembly {
        &mut self.assembly
    }

    pub fn is_complete(&self) -> bool {
        self.assembly.is_complete()
    }
}
