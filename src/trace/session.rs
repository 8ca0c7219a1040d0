//! One tracing level in play: pointer handling, live guarding, submission.

use kurbo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::{GlyphPainter, TracingTarget};
use super::raster::{segment_distance, AlphaMask};
use super::score::{score_attempt, AttemptScore, DangerGuard};
use super::skeleton::{build_skeleton, Checkpoint, Skeleton, Zone};
use crate::announce::{Announcer, PRAISE_MESSAGES};
use crate::config::{TracingConfig, STREAK_BONUS_EVERY};
use crate::error::TracingError;
use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrokeStatus {
    #[default]
    Idle,
    Drawing,
    /// The stroke left the letter; ink and progress were wiped.
    Aborted,
    /// The last submit passed. The ink stays until the next press.
    Completed,
}

/// Outcome of a submitted attempt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Submission {
    pub score: AttemptScore,
    pub praise: Option<&'static str>,
    pub streak: u32,
    /// Set on every third consecutive pass.
    pub streak_bonus: bool,
}

pub struct TracingSession {
    config: TracingConfig,
    painter: Box<dyn GlyphPainter>,
    skeleton: Skeleton,
    ink: AlphaMask,
    guard: DangerGuard,
    status: StrokeStatus,
    last: Option<Point>,
    has_drawn: bool,
    streak: u32,
    announcer: Box<dyn Announcer>,
    rng: Box<dyn RandomSource>,
}

impl TracingSession {
    pub fn new(
        target: &str,
        width: u32,
        height: u32,
        painter: Box<dyn GlyphPainter>,
        config: TracingConfig,
        announcer: Box<dyn Announcer>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, TracingError> {
        let target = TracingTarget::new(target)?;
        let skeleton = build_skeleton(&target, width, height, painter.as_ref(), &config)?;
        let mut session = Self {
            guard: DangerGuard::new(config.danger_grace),
            config,
            painter,
            ink: AlphaMask::new(width, height),
            skeleton,
            status: StrokeStatus::Idle,
            last: None,
            has_drawn: false,
            streak: 0,
            announcer,
            rng,
        };
        tracing::info!(
            text = session.skeleton.target.text(),
            checkpoints = session.skeleton.checkpoints.len(),
            "tracing started"
        );
        if session.config.announce_target {
            session.announce_target();
        }
        Ok(session)
    }

    /// Says the target out loud.
    pub fn announce_target(&mut self) {
        let text = self.skeleton.target.text().to_string();
        self.announcer.announce(&text);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> StrokeStatus {
        if self.status == StrokeStatus::Completed {
            self.reset_attempt();
        }
        let pos = Point::new(x, y);
        if self.trips_guard(pos) {
            self.abort();
            return self.status;
        }
        self.status = StrokeStatus::Drawing;
        self.has_drawn = true;
        self.ink.paint_dot(pos, self.config.brush_width);
        self.touch(pos, pos);
        self.last = Some(pos);
        self.status
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> StrokeStatus {
        let Some(prev) = self.last.filter(|_| self.status == StrokeStatus::Drawing) else {
            return self.status;
        };
        let pos = Point::new(x, y);
        if self.trips_guard(pos) {
            self.abort();
            return self.status;
        }
        self.ink.paint_segment(prev, pos, self.config.brush_width);
        self.touch(prev, pos);
        self.last = Some(pos);
        self.status
    }

    pub fn pointer_up(&mut self) -> StrokeStatus {
        self.last = None;
        if self.status == StrokeStatus::Drawing {
            self.status = StrokeStatus::Idle;
        }
        self.status
    }

    fn trips_guard(&mut self, pos: Point) -> bool {
        match self.skeleton.zones.zone_at_point(pos.x, pos.y) {
            None => true,
            Some(zone) => self.guard.observe(zone),
        }
    }

    fn touch(&mut self, prev: Point, curr: Point) {
        let radius = self.config.match_radius;
        for c in self.skeleton.checkpoints.iter_mut().filter(|c| !c.touched) {
            if segment_distance(Point::new(c.x, c.y), prev, curr) < radius {
                c.touched = true;
            }
        }
    }

    fn reset_attempt(&mut self) {
        self.ink.clear();
        for c in &mut self.skeleton.checkpoints {
            c.touched = false;
        }
        self.guard.reset();
        self.last = None;
        self.has_drawn = false;
    }

    fn abort(&mut self) {
        tracing::warn!(
            text = self.skeleton.target.text(),
            "stroke left the letter, attempt reset"
        );
        self.reset_attempt();
        self.streak = 0;
        self.status = StrokeStatus::Aborted;
    }

    /// Wipes ink and progress; the streak is kept.
    pub fn clear(&mut self) {
        self.reset_attempt();
        self.status = StrokeStatus::Idle;
    }

    /// Scores the current ink. Returns `None` when nothing has been drawn
    /// since the last pass. A failed attempt is wiped and breaks the streak.
    pub fn submit(&mut self) -> Result<Option<Submission>, TracingError> {
        if !self.has_drawn || self.status == StrokeStatus::Completed {
            return Ok(None);
        }
        let score = score_attempt(
            &self.ink,
            &self.skeleton.zones,
            &self.skeleton.checkpoints,
            &self.config.thresholds,
        )?;
        self.status = StrokeStatus::Idle;
        self.last = None;

        if !score.passed {
            tracing::info!(failure = ?score.failure, coverage = score.coverage, "attempt failed");
            self.reset_attempt();
            self.streak = 0;
            return Ok(Some(Submission {
                score,
                praise: None,
                streak: 0,
                streak_bonus: false,
            }));
        }

        self.status = StrokeStatus::Completed;
        self.streak += 1;
        let streak_bonus = self.streak % STREAK_BONUS_EVERY == 0;
        let praise = PRAISE_MESSAGES[self.rng.index(PRAISE_MESSAGES.len())];
        self.announcer.announce(praise);
        tracing::info!(
            stars = score.stars,
            coverage = score.coverage,
            sloppy = score.sloppy_ratio,
            streak = self.streak,
            "attempt passed"
        );
        Ok(Some(Submission {
            score,
            praise: Some(praise),
            streak: self.streak,
            streak_bonus,
        }))
    }

    /// Rebuilds the skeleton when the canvas changed by at least the resize
    /// slack on either axis. Returns whether a rebuild happened.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, TracingError> {
        let slack = self.config.resize_slack;
        if self.ink.width().abs_diff(width) < slack && self.ink.height().abs_diff(height) < slack {
            return Ok(false);
        }
        let target = self.skeleton.target.clone();
        self.skeleton = build_skeleton(&target, width, height, self.painter.as_ref(), &self.config)?;
        self.ink = AlphaMask::new(width, height);
        self.reset_attempt();
        self.status = StrokeStatus::Idle;
        Ok(true)
    }

    pub fn target(&self) -> &TracingTarget {
        &self.skeleton.target
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.skeleton.checkpoints
    }

    pub fn ink(&self) -> &AlphaMask {
        &self.ink
    }

    pub fn zone_at(&self, x: f64, y: f64) -> Option<Zone> {
        self.skeleton.zones.zone_at_point(x, y)
    }

    pub fn status(&self) -> StrokeStatus {
        self.status
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn coverage(&self) -> f64 {
        super::score::coverage(&self.skeleton.checkpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::{Silent, Transcript};
    use crate::rng::SplitMix64;
    use crate::trace::font::StrokeFont;

    fn session(target: &str) -> TracingSession {
        TracingSession::new(
            target,
            200,
            200,
            Box::new(StrokeFont::default()),
            TracingConfig::default(),
            Box::new(Silent),
            Box::new(SplitMix64::seeded(1)),
        )
        .unwrap()
    }

    #[test]
    fn submit_without_ink_is_a_no_op() {
        let mut s = session("I");
        assert_eq!(s.submit().unwrap(), None);
    }

    #[test]
    fn leaving_the_canvas_aborts() {
        let mut s = session("I");
        let c = s.checkpoints()[0];
        assert_eq!(s.pointer_down(c.x, c.y), StrokeStatus::Drawing);
        assert!(s.checkpoints()[0].touched);
        assert_eq!(s.pointer_move(-5.0, c.y), StrokeStatus::Aborted);
        assert!(s.checkpoints().iter().all(|c| !c.touched));
        assert_eq!(s.ink().opaque_count(), 0);
        // further moves are ignored until the next press
        assert_eq!(s.pointer_move(c.x, c.y), StrokeStatus::Aborted);
    }

    #[test]
    fn small_resize_keeps_skeleton() {
        let mut s = session("O");
        assert!(!s.resize(205, 195).unwrap());
        assert!(s.resize(240, 200).unwrap());
        assert_eq!(s.ink().width(), 240);
        assert_eq!(s.skeleton().width(), 240);
    }

    /// Thin strokes paint nothing, wider ones cover the whole canvas.
    struct Wash;

    impl GlyphPainter for Wash {
        fn paint(
            &self,
            _target: &TracingTarget,
            frame: &crate::trace::GlyphFrame,
            line_width: f64,
        ) -> Result<AlphaMask, TracingError> {
            let len = frame.width as usize * frame.height as usize;
            let fill = if line_width > crate::config::SKELETON_WIDTH { 255 } else { 0 };
            AlphaMask::from_raw(frame.width, frame.height, vec![fill; len])
        }
    }

    fn washed(target: &str) -> TracingSession {
        TracingSession::new(
            target,
            80,
            80,
            Box::new(Wash),
            TracingConfig::default(),
            Box::new(Silent),
            Box::new(SplitMix64::seeded(2)),
        )
        .unwrap()
    }

    #[test]
    fn no_checkpoints_still_scores_ink() {
        let mut s = washed("A");
        assert!(s.checkpoints().is_empty());
        assert_eq!(s.coverage(), 1.0);
        assert_eq!(s.submit().unwrap(), None);

        s.pointer_down(40.0, 40.0);
        s.pointer_move(50.0, 40.0);
        s.pointer_up();
        let sub = s.submit().unwrap().unwrap();
        assert!(sub.score.passed);
        assert_eq!(sub.score.coverage, 1.0);
        assert_eq!(sub.score.stars, 3);
    }

    struct Blank;

    impl GlyphPainter for Blank {
        fn paint(
            &self,
            _target: &TracingTarget,
            frame: &crate::trace::GlyphFrame,
            _line_width: f64,
        ) -> Result<AlphaMask, TracingError> {
            Ok(AlphaMask::new(frame.width, frame.height))
        }
    }

    #[test]
    fn blank_letter_fails_ink_outside() {
        let mut s = TracingSession::new(
            "A",
            60,
            60,
            Box::new(Blank),
            TracingConfig::default(),
            Box::new(Silent),
            Box::new(SplitMix64::seeded(2)),
        )
        .unwrap();
        s.pointer_down(30.0, 30.0);
        s.pointer_up();
        let sub = s.submit().unwrap().unwrap();
        assert!(!sub.score.passed);
        assert_eq!(sub.score.coverage, 1.0);
        assert_eq!(sub.score.failure, Some(crate::trace::FailReason::OutsideLetter));
    }

    #[test]
    fn passed_drawing_is_scored_once() {
        let mut s = washed("A");
        s.pointer_down(40.0, 40.0);
        s.pointer_up();
        let first = s.submit().unwrap().unwrap();
        assert!(first.score.passed);
        assert_eq!(s.status(), StrokeStatus::Completed);
        assert!(s.ink().opaque_count() > 0);

        assert_eq!(s.submit().unwrap(), None);
        assert_eq!(s.submit().unwrap(), None);
        assert_eq!(s.streak(), 1);

        // a new press starts a fresh attempt
        assert_eq!(s.pointer_down(20.0, 20.0), StrokeStatus::Drawing);
        s.pointer_up();
        let second = s.submit().unwrap().unwrap();
        assert_eq!(second.streak, 2);
        assert!(!second.streak_bonus);
    }

    #[test]
    fn target_is_announced_at_start() {
        struct Shared(std::rc::Rc<std::cell::RefCell<Transcript>>);
        impl Announcer for Shared {
            fn announce(&mut self, text: &str) {
                self.0.borrow_mut().announce(text);
            }
        }
        let log = std::rc::Rc::new(std::cell::RefCell::new(Transcript::default()));
        TracingSession::new(
            "BOK",
            300,
            200,
            Box::new(StrokeFont::default()),
            TracingConfig::default(),
            Box::new(Shared(log.clone())),
            Box::new(SplitMix64::seeded(1)),
        )
        .unwrap();
        assert_eq!(log.borrow().lines, vec!["BOK"]);
    }
}
