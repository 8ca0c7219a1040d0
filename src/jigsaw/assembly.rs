use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{PieceId, PieceMetrics, PuzzleSpec};
use crate::config::{JigsawConfig, SnapPolicy};
use crate::error::JigsawError;
use crate::rng::{self, RandomSource};

/// Displacement from the correct slot plus rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceTransform {
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation: f32,
}

impl PieceTransform {
    pub fn is_identity(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0 && normalize_rotation(self.rotation) == 0.0
    }
}

/// Result of a release or tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub placed: bool,
    /// `true` only for the action that completed the puzzle.
    pub completed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    Moved { unsnapped: bool },
    /// The piece is locked in place.
    Ignored,
}

fn normalize_rotation(rotation: f32) -> f32 {
    rotation.rem_euclid(360.0)
}

/// Placement state of every piece of one puzzle.
#[derive(Clone, Debug)]
pub struct Assembly {
    spec: PuzzleSpec,
    tol_x: f32,
    tol_y: f32,
    policy: SnapPolicy,
    transforms: Vec<PieceTransform>,
    placed: HashSet<PieceId>,
    /// Back to front.
    order: Vec<PieceId>,
    complete: bool,
}

impl Assembly {
    /// All pieces start in their slots, unplaced; call [`Assembly::scatter`]
    /// to move them to the tray.
    pub fn new(spec: PuzzleSpec, metrics: &PieceMetrics, config: &JigsawConfig) -> Self {
        let ratio = config.snap_ratio();
        let count = spec.piece_count();
        Self {
            spec,
            tol_x: metrics.piece_width * ratio,
            tol_y: metrics.piece_height * ratio,
            policy: config.snap_policy,
            transforms: vec![PieceTransform::default(); count],
            placed: HashSet::with_capacity(count),
            order: (0..count).collect(),
            complete: false,
        }
    }

    /// Scatters pieces into the tray below the board with a random quarter
    /// rotation each, and shuffles the render order.
    pub fn scatter(
        &mut self,
        metrics: &PieceMetrics,
        board_width: f32,
        board_height: f32,
        config: &JigsawConfig,
        rng: &mut dyn RandomSource,
    ) {
        let max_x = (board_width - metrics.piece_width).max(0.0) as f64;
        for id in 0..self.transforms.len() {
            let (row, col) = self.spec.cell(id);
            let (slot_x, slot_y) = metrics.slot_origin(row, col);
            let tray_y = board_height + config.tray_gap + (rng.unit() * config.tray_depth as f64) as f32;
            let tray_x = (rng.unit() * max_x) as f32;
            let rotation = rng.index(4) as f32 * 90.0;
            self.transforms[id] = PieceTransform {
                offset_x: tray_x - slot_x,
                offset_y: tray_y - slot_y,
                rotation,
            };
        }
        self.placed.clear();
        self.complete = false;
        rng::shuffle(&mut self.order, rng);
    }

    fn check(&self, piece: PieceId) -> Result<(), JigsawError> {
        if piece < self.transforms.len() {
            Ok(())
        } else {
            Err(JigsawError::UnknownPiece(piece))
        }
    }

    fn locked(&self, piece: PieceId) -> bool {
        self.policy == SnapPolicy::Locked && self.placed.contains(&piece)
    }

    fn unsnap(&mut self, piece: PieceId) -> bool {
        let removed = self.placed.remove(&piece);
        if removed {
            self.complete = false;
        }
        removed
    }

    /// Moves a piece by `(dx, dy)`. A snapped piece is un-snapped before it
    /// moves.
    pub fn drag(&mut self, piece: PieceId, dx: f32, dy: f32) -> Result<DragOutcome, JigsawError> {
        self.check(piece)?;
        if self.locked(piece) {
            return Ok(DragOutcome::Ignored);
        }
        let unsnapped = self.unsnap(piece);
        let t = &mut self.transforms[piece];
        t.offset_x += dx;
        t.offset_y += dy;
        self.bring_to_front(piece);
        Ok(DragOutcome::Moved { unsnapped })
    }

    /// Drop at the current position.
    pub fn release(&mut self, piece: PieceId) -> Result<Placement, JigsawError> {
        self.check(piece)?;
        Ok(self.evaluate(piece))
    }

    /// Rotates a piece a quarter turn clockwise and re-checks it.
    pub fn tap(&mut self, piece: PieceId) -> Result<Placement, JigsawError> {
        self.check(piece)?;
        if self.locked(piece) {
            return Ok(Placement {
                placed: true,
                completed: false,
            });
        }
        let t = &mut self.transforms[piece];
        t.rotation = normalize_rotation(t.rotation + 90.0);
        Ok(self.evaluate(piece))
    }

    fn evaluate(&mut self, piece: PieceId) -> Placement {
        let t = self.transforms[piece];
        let fits = t.offset_x.abs() < self.tol_x
            && t.offset_y.abs() < self.tol_y
            && normalize_rotation(t.rotation) == 0.0;
        if !fits {
            self.unsnap(piece);
            return Placement::default();
        }

        self.transforms[piece] = PieceTransform::default();
        self.placed.insert(piece);
        let completed = !self.complete && self.placed.len() == self.spec.piece_count();
        if completed {
            self.complete = true;
            tracing::info!(pieces = self.placed.len(), "jigsaw complete");
        }
        Placement {
            placed: true,
            completed,
        }
    }

    pub fn bring_to_front(&mut self, piece: PieceId) {
        if let Some(pos) = self.order.iter().position(|&p| p == piece) {
            let id = self.order.remove(pos);
            self.order.push(id);
        }
    }

    /// Back-to-front draw order.
    pub fn render_order(&self) -> &[PieceId] {
        &self.order
    }

    /// Draw order with snapped pieces underneath loose ones.
    pub fn layered_order(&self) -> Vec<PieceId> {
        let (mut below, above): (Vec<_>, Vec<_>) =
            self.order.iter().copied().partition(|id| self.placed.contains(id));
        below.extend(above);
        below
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn is_placed(&self, piece: PieceId) -> bool {
        self.placed.contains(&piece)
    }

    pub fn transform(&self, piece: PieceId) -> Option<PieceTransform> {
        self.transforms.get(piece).copied()
    }

    pub fn transforms(&self) -> &[PieceTransform] {
        &self.transforms
    }

    /// Overwrites a transform without evaluating it.
    pub fn set_transform(&mut self, piece: PieceId, transform: PieceTransform) -> Result<(), JigsawError> {
        self.check(piece)?;
        self.transforms[piece] = transform;
        Ok(())
    }

    pub fn spec(&self) -> PuzzleSpec {
        self.spec
    }

    pub fn tolerance(&self) -> (f32, f32) {
        (self.tol_x, self.tol_y)
    }
}
