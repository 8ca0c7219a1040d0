#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::raster::AlphaMask;
use super::skeleton::{Checkpoint, Zone, ZoneMap};
use crate::config::ScoreThresholds;
use crate::error::TracingError;

/// Why an attempt did not pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FailReason {
    /// Too few checkpoints were touched.
    LowCoverage,
    /// Too much ink landed outside the letter.
    OutsideLetter,
    /// Too much ink landed beside the centre line.
    OffCenterline,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttemptScore {
    /// 1..=3 when passed, 0 otherwise.
    pub stars: u8,
    pub passed: bool,
    pub coverage: f64,
    pub danger_ratio: f64,
    pub sloppy_ratio: f64,
    pub failure: Option<FailReason>,
}

impl AttemptScore {
    fn failed(coverage: f64, danger_ratio: f64, sloppy_ratio: f64, reason: FailReason) -> Self {
        Self {
            stars: 0,
            passed: false,
            coverage,
            danger_ratio,
            sloppy_ratio,
            failure: Some(reason),
        }
    }
}

/// Share of touched checkpoints; an empty list counts as fully covered.
pub fn coverage(checkpoints: &[Checkpoint]) -> f64 {
    if checkpoints.is_empty() {
        return 1.0;
    }
    let touched = checkpoints.iter().filter(|c| c.touched).count();
    touched as f64 / checkpoints.len() as f64
}

/// Scores a finished attempt from its ink, the zone map and checkpoint state.
pub fn score_attempt(
    ink: &AlphaMask,
    zones: &ZoneMap,
    checkpoints: &[Checkpoint],
    thresholds: &ScoreThresholds,
) -> Result<AttemptScore, TracingError> {
    if ink.width() != zones.width() || ink.height() != zones.height() {
        return Err(TracingError::SizeMismatch {
            expected_width: zones.width(),
            expected_height: zones.height(),
            width: ink.width(),
            height: ink.height(),
        });
    }

    let coverage = coverage(checkpoints);

    let mut drawn = 0usize;
    let mut danger = 0usize;
    let mut sloppy = 0usize;
    for (&alpha, zone) in ink.data().iter().zip(zones.zones()) {
        if alpha <= super::raster::OPAQUE_ALPHA {
            continue;
        }
        drawn += 1;
        match zone {
            Zone::Danger => danger += 1,
            Zone::Sloppy => sloppy += 1,
            Zone::Perfect => {}
        }
    }
    let ratio = |n: usize| if drawn == 0 { 0.0 } else { n as f64 / drawn as f64 };
    let danger_ratio = ratio(danger);
    let sloppy_ratio = ratio(sloppy);

    if coverage < thresholds.min_coverage {
        return Ok(AttemptScore::failed(coverage, danger_ratio, sloppy_ratio, FailReason::LowCoverage));
    }
    if danger_ratio > thresholds.max_danger {
        return Ok(AttemptScore::failed(coverage, danger_ratio, sloppy_ratio, FailReason::OutsideLetter));
    }
    if sloppy_ratio > thresholds.max_sloppy {
        return Ok(AttemptScore::failed(coverage, danger_ratio, sloppy_ratio, FailReason::OffCenterline));
    }

    let stars = if coverage == 1.0 && sloppy_ratio <= thresholds.three_star_sloppy {
        3
    } else if coverage >= thresholds.two_star_coverage && sloppy_ratio <= thresholds.two_star_sloppy {
        2
    } else {
        1
    };
    Ok(AttemptScore {
        stars,
        passed: true,
        coverage,
        danger_ratio,
        sloppy_ratio,
        failure: None,
    })
}

/// Counts consecutive pointer samples in the danger zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DangerGuard {
    grace: u32,
    streak: u32,
}

impl DangerGuard {
    pub fn new(grace: u32) -> Self {
        Self { grace, streak: 0 }
    }

    /// Records one sample; returns `true` once the grace is used up.
    pub fn observe(&mut self, zone: Zone) -> bool {
        if zone == Zone::Danger {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.streak > self.grace
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}
