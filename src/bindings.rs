//! JavaScript-facing wrappers around the jigsaw and tracing engines.

use wasm_bindgen::prelude::*;

use crate::announce::{Announcer, JsAnnouncer, Silent};
use crate::config::{JigsawConfig, TracingConfig};
use crate::jigsaw::{DragOutcome, JigsawPuzzle, Placement, PuzzleSpec};
use crate::rng::{RandomSource, SplitMix64};
use crate::trace::{CanvasGlyphPainter, GlyphPainter, StrokeFont, StrokeStatus, TracingSession};

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn announcer(speak: Option<js_sys::Function>) -> Box<dyn Announcer> {
    match speak {
        Some(callback) => Box::new(JsAnnouncer::new(callback)),
        None => Box::new(Silent),
    }
}

fn rng(seed: Option<f64>) -> SplitMix64 {
    match seed {
        Some(seed) => SplitMix64::seeded(seed as u64),
        None => SplitMix64::from_entropy(),
    }
}

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct PlacementView {
    pub placed: bool,
    pub completed: bool,
}

impl From<Placement> for PlacementView {
    fn from(p: Placement) -> Self {
        Self {
            placed: p.placed,
            completed: p.completed,
        }
    }
}

#[wasm_bindgen]
pub struct JigsawGame {
    puzzle: JigsawPuzzle,
    board_size: f32,
}

#[wasm_bindgen]
impl JigsawGame {
    /// `label` is the word on the picture; `speak` receives spoken lines.
    #[wasm_bindgen(constructor)]
    pub fn new(
        label: &str,
        level: u32,
        viewport_width: f32,
        seed: Option<f64>,
        speak: Option<js_sys::Function>,
    ) -> Result<JigsawGame, JsValue> {
        let config = JigsawConfig::default();
        let board_size = JigsawConfig::board_size_for_viewport(viewport_width);
        let mut rng = rng(seed);
        let puzzle = JigsawPuzzle::new(
            label,
            PuzzleSpec::for_level(level),
            board_size,
            &config,
            &mut rng,
            announcer(speak),
        )
        .map_err(js_err)?;
        Ok(Self { puzzle, board_size })
    }

    #[wasm_bindgen(getter)]
    pub fn board_size(&self) -> f32 {
        self.board_size
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.puzzle.assembly().spec().rows
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.puzzle.assembly().spec().cols
    }

    #[wasm_bindgen(getter)]
    pub fn tab_size(&self) -> f32 {
        self.puzzle.metrics().tab_size
    }

    pub fn piece_path(&self, piece: usize) -> Result<String, JsValue> {
        self.puzzle.piece_path(piece).map_err(js_err)
    }

    /// Returns `false` when a locked piece ignored the drag.
    pub fn drag(&mut self, piece: usize, dx: f32, dy: f32) -> Result<bool, JsValue> {
        let outcome = self.puzzle.drag(piece, dx, dy).map_err(js_err)?;
        Ok(matches!(outcome, DragOutcome::Moved { .. }))
    }

    pub fn release(&mut self, piece: usize) -> Result<PlacementView, JsValue> {
        self.puzzle.release(piece).map(Into::into).map_err(js_err)
    }

    pub fn tap(&mut self, piece: usize) -> Result<PlacementView, JsValue> {
        self.puzzle.tap(piece).map(Into::into).map_err(js_err)
    }

    /// `[offset_x, offset_y, rotation]`.
    pub fn transform(&self, piece: usize) -> Result<Vec<f32>, JsValue> {
        let t = self
            .puzzle
            .assembly()
            .transform(piece)
            .ok_or_else(|| JsValue::from_str("unknown piece"))?;
        Ok(vec![t.offset_x, t.offset_y, t.rotation])
    }

    pub fn render_order(&self) -> Vec<u32> {
        self.puzzle.assembly().render_order().iter().map(|&id| id as u32).collect()
    }

    pub fn layered_order(&self) -> Vec<u32> {
        self.puzzle.assembly().layered_order().into_iter().map(|id| id as u32).collect()
    }

    pub fn is_placed(&self, piece: usize) -> bool {
        self.puzzle.assembly().is_placed(piece)
    }

    pub fn placed_count(&self) -> usize {
        self.puzzle.assembly().placed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.puzzle.is_complete()
    }

    #[cfg(feature = "serde_json")]
    pub fn transforms_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.puzzle.assembly().transforms()).map_err(js_err)
    }
}

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeState {
    Idle = 0,
    Drawing = 1,
    Aborted = 2,
    Completed = 3,
}

impl From<StrokeStatus> for StrokeState {
    fn from(status: StrokeStatus) -> Self {
        match status {
            StrokeStatus::Idle => StrokeState::Idle,
            StrokeStatus::Drawing => StrokeState::Drawing,
            StrokeStatus::Aborted => StrokeState::Aborted,
            StrokeStatus::Completed => StrokeState::Completed,
        }
    }
}

#[wasm_bindgen(getter_with_clone)]
#[derive(Clone, Debug)]
pub struct SubmissionView {
    pub stars: u8,
    pub passed: bool,
    pub coverage: f64,
    pub danger_ratio: f64,
    pub sloppy_ratio: f64,
    pub streak: u32,
    pub streak_bonus: bool,
    pub praise: Option<String>,
}

#[wasm_bindgen]
pub struct TracingGame {
    session: TracingSession,
}

#[wasm_bindgen]
impl TracingGame {
    /// With a `font_family` glyphs come from the browser font; without one
    /// the built-in stroke font is used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: &str,
        width: u32,
        height: u32,
        font_family: Option<String>,
        speak: Option<js_sys::Function>,
        seed: Option<f64>,
    ) -> Result<TracingGame, JsValue> {
        let config = TracingConfig::default();
        let painter: Box<dyn GlyphPainter> = match font_family {
            Some(family) => Box::new(CanvasGlyphPainter::new(&family)),
            None => Box::new(StrokeFont::default()),
        };
        let rng: Box<dyn RandomSource> = Box::new(rng(seed));
        let session =
            TracingSession::new(target, width, height, painter, config, announcer(speak), rng)
                .map_err(js_err)?;
        Ok(Self { session })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> StrokeState {
        self.session.pointer_down(x, y).into()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> StrokeState {
        self.session.pointer_move(x, y).into()
    }

    pub fn pointer_up(&mut self) -> StrokeState {
        self.session.pointer_up().into()
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// `undefined` when nothing has been drawn yet.
    pub fn submit(&mut self) -> Result<Option<SubmissionView>, JsValue> {
        let Some(sub) = self.session.submit().map_err(js_err)? else {
            return Ok(None);
        };
        Ok(Some(SubmissionView {
            stars: sub.score.stars,
            passed: sub.score.passed,
            coverage: sub.score.coverage,
            danger_ratio: sub.score.danger_ratio,
            sloppy_ratio: sub.score.sloppy_ratio,
            streak: sub.streak,
            streak_bonus: sub.streak_bonus,
            praise: sub.praise.map(str::to_string),
        }))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, JsValue> {
        self.session.resize(width, height).map_err(js_err)
    }

    pub fn announce_target(&mut self) {
        self.session.announce_target();
    }

    /// Flat `[x, y, touched]` triples; `touched` is `0` or `1`.
    pub fn checkpoints(&self) -> Vec<f64> {
        self.session
            .checkpoints()
            .iter()
            .flat_map(|c| [c.x, c.y, if c.touched { 1.0 } else { 0.0 }])
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn coverage(&self) -> f64 {
        self.session.coverage()
    }

    #[wasm_bindgen(getter)]
    pub fn streak(&self) -> u32 {
        self.session.streak()
    }

    #[wasm_bindgen(getter)]
    pub fn font_size(&self) -> f64 {
        self.session.skeleton().font_size()
    }

    #[cfg(feature = "serde_json")]
    pub fn checkpoints_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.checkpoints()).map_err(js_err)
    }
}

#[wasm_bindgen]
pub fn tracing_level_count() -> u32 {
    crate::trace::levels::levels().len() as u32
}

/// Text to trace for a 1-based level id.
#[wasm_bindgen]
pub fn tracing_level_target(id: u32) -> Option<String> {
    crate::trace::levels::level(id).map(|l| l.target.clone())
}

#[wasm_bindgen]
pub fn tracing_level_name(id: u32) -> Option<String> {
    crate::trace::levels::level(id).map(|l| l.name.clone())
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn tracing_levels_json() -> Result<String, JsValue> {
    serde_json::to_string(crate::trace::levels::levels()).map_err(js_err)
}
