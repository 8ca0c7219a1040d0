//! Tunable engine parameters.
//!
//! Every constant here is a hand-tuned default; level data may override any
//! of them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// --- Jigsaw ------------------------------------------------------------------

/// Board edge length on regular screens.
pub const BOARD_SIZE_DEFAULT: f32 = 320.0;
/// Board edge length on narrow screens (viewport below [`NARROW_VIEWPORT`]).
pub const BOARD_SIZE_NARROW: f32 = 280.0;
pub const NARROW_VIEWPORT: f32 = 400.0;

/// Tab protrusion relative to the smaller piece dimension.
pub const TAB_SIZE_RATIO: f32 = 0.28;
/// Snap slack relative to the piece dimension on each axis.
pub const SNAP_TOLERANCE_RATIO: f32 = 0.2;
pub const SNAP_TOLERANCE_RATIO_MIN: f32 = 0.05;
pub const SNAP_TOLERANCE_RATIO_MAX: f32 = 0.35;

/// Tray band below the board where scattered pieces start.
pub const TRAY_GAP: f32 = 40.0;
pub const TRAY_DEPTH: f32 = 60.0;

/// What happens when a snapped piece is touched again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SnapPolicy {
    /// Snapped pieces can be dragged or rotated out again.
    #[default]
    Free,
    /// Snapped pieces ignore drags and taps.
    Locked,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct JigsawConfig {
    pub tab_size_ratio: f32,
    pub snap_tolerance_ratio: f32,
    pub snap_policy: SnapPolicy,
    pub tray_gap: f32,
    pub tray_depth: f32,
}

impl Default for JigsawConfig {
    fn default() -> Self {
        Self {
            tab_size_ratio: TAB_SIZE_RATIO,
            snap_tolerance_ratio: SNAP_TOLERANCE_RATIO,
            snap_policy: SnapPolicy::Free,
            tray_gap: TRAY_GAP,
            tray_depth: TRAY_DEPTH,
        }
    }
}

impl JigsawConfig {
    /// Snap ratio clamped to the supported band.
    pub fn snap_ratio(&self) -> f32 {
        self.snap_tolerance_ratio
            .clamp(SNAP_TOLERANCE_RATIO_MIN, SNAP_TOLERANCE_RATIO_MAX)
    }

    /// Square board size for a viewport width.
    pub fn board_size_for_viewport(viewport_width: f32) -> f32 {
        if viewport_width < NARROW_VIEWPORT {
            BOARD_SIZE_NARROW
        } else {
            BOARD_SIZE_DEFAULT
        }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self, crate::error::JigsawError> {
        serde_json::from_str(text).map_err(|e| crate::error::JigsawError::Config(e.to_string()))
    }
}

// --- Tracing -----------------------------------------------------------------

pub const FONT_FAMILY_DEFAULT: &str = "\"Nunito\", sans-serif";
/// Width of the user's brush; also the width of the perfect zone.
pub const BRUSH_WIDTH: f64 = 16.0;
/// Line width used to thicken the skeleton before scanning it.
pub const SKELETON_WIDTH: f64 = 4.0;
/// Sloppy zone width is `max(SLOPPY_WIDTH_MIN, font_size / SLOPPY_WIDTH_DIVISOR)`.
pub const SLOPPY_WIDTH_MIN: f64 = 30.0;
pub const SLOPPY_WIDTH_DIVISOR: f64 = 6.0;
/// Pointer-to-checkpoint distance that counts as a touch.
pub const MATCH_RADIUS: f64 = 24.0;
/// Consecutive danger samples tolerated before a stroke is aborted.
pub const DANGER_GRACE: u32 = 3;
/// Size changes smaller than this keep the current skeleton.
pub const RESIZE_SLACK: u32 = 10;
/// Consecutive passes that earn a streak bonus.
pub const STREAK_BONUS_EVERY: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScoreThresholds {
    pub min_coverage: f64,
    pub max_danger: f64,
    pub max_sloppy: f64,
    pub three_star_sloppy: f64,
    pub two_star_coverage: f64,
    pub two_star_sloppy: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            min_coverage: 0.90,
            max_danger: 0.02,
            max_sloppy: 0.30,
            three_star_sloppy: 0.05,
            two_star_coverage: 0.95,
            two_star_sloppy: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TracingConfig {
    /// CSS font family for the browser glyph painter.
    pub font_family: String,
    pub brush_width: f64,
    pub skeleton_width: f64,
    pub sloppy_width_min: f64,
    pub sloppy_width_divisor: f64,
    pub match_radius: f64,
    pub danger_grace: u32,
    pub resize_slack: u32,
    /// Say the target out loud when a session starts.
    pub announce_target: bool,
    pub thresholds: ScoreThresholds,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            font_family: FONT_FAMILY_DEFAULT.to_string(),
            brush_width: BRUSH_WIDTH,
            skeleton_width: SKELETON_WIDTH,
            sloppy_width_min: SLOPPY_WIDTH_MIN,
            sloppy_width_divisor: SLOPPY_WIDTH_DIVISOR,
            match_radius: MATCH_RADIUS,
            danger_grace: DANGER_GRACE,
            resize_slack: RESIZE_SLACK,
            announce_target: true,
            thresholds: ScoreThresholds::default(),
        }
    }
}

impl TracingConfig {
    pub fn sloppy_width(&self, font_size: f64) -> f64 {
        self.sloppy_width_min
            .max(font_size / self.sloppy_width_divisor.max(1.0))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self, crate::error::TracingError> {
        serde_json::from_str(text).map_err(|e| crate::error::TracingError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewports_get_smaller_board() {
        assert_eq!(JigsawConfig::board_size_for_viewport(375.0), BOARD_SIZE_NARROW);
        assert_eq!(JigsawConfig::board_size_for_viewport(1024.0), BOARD_SIZE_DEFAULT);
    }

    #[test]
    fn snap_ratio_is_clamped() {
        let cfg = JigsawConfig {
            snap_tolerance_ratio: 2.0,
            ..JigsawConfig::default()
        };
        assert_eq!(cfg.snap_ratio(), SNAP_TOLERANCE_RATIO_MAX);
    }

    #[test]
    fn sloppy_width_grows_with_font() {
        let cfg = TracingConfig::default();
        assert_eq!(cfg.sloppy_width(60.0), SLOPPY_WIDTH_MIN);
        assert!((cfg.sloppy_width(240.0) - 40.0).abs() < 1e-9);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = TracingConfig::from_json(r#"{ "match_radius": 30.0 }"#).unwrap();
        assert_eq!(cfg.match_radius, 30.0);
        assert_eq!(cfg.brush_width, BRUSH_WIDTH);
    }
}
