//! Lekfull core crate.
//!
//! Two engines behind the kids' games: a jigsaw generator with snap
//! detection ([`jigsaw`]) and a letter-tracing skeleton extractor and scorer
//! ([`trace`]). Both are pure Rust with randomness and speech injected, so
//! they run natively in tests; the browser drives them through the
//! `JigsawGame` and `TracingGame` wasm classes.

use wasm_bindgen::prelude::*;

pub mod announce;
pub mod config;
pub mod error;
pub mod jigsaw;
pub mod rng;
pub mod trace;

mod bindings;

pub use bindings::{
    JigsawGame, PlacementView, StrokeState, SubmissionView, TracingGame, tracing_level_count,
    tracing_level_name, tracing_level_target,
};
pub use error::{JigsawError, TracingError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}
