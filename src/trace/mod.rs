//! Letter-tracing engine: skeleton extraction, zones and attempt scoring.
//!
//! A [`TracingSession`] is the usual entry point. The lower layers are public
//! so a renderer can drive scoring against its own rasters.

mod canvas;
pub mod font;
pub mod layout;
pub mod levels;
pub mod raster;
mod score;
mod session;
mod skeleton;

pub use canvas::CanvasGlyphPainter;
pub use font::StrokeFont;
pub use layout::{font_size_for, layout_target, GlyphFrame, GlyphPainter, TracingTarget};
pub use raster::{polylines, segment_distance, AlphaMask, OPAQUE_ALPHA};
pub use score::{coverage, score_attempt, AttemptScore, DangerGuard, FailReason};
pub use session::{StrokeStatus, Submission, TracingSession};
pub use skeleton::{
    build_skeleton, extract_checkpoints, Checkpoint, Skeleton, SkeletonCache, Zone, ZoneMap,
};
