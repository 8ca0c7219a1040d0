// Native integration tests for the tracing engine, driven through the
// built-in stroke font so no browser canvas is needed.

use kurbo::Point;
use lekfull::announce::Silent;
use lekfull::config::{ScoreThresholds, TracingConfig};
use lekfull::rng::SplitMix64;
use lekfull::trace::{
    build_skeleton, layout_target, polylines, score_attempt, AlphaMask, Checkpoint, FailReason,
    GlyphFrame, StrokeFont, StrokeStatus, TracingSession, TracingTarget, Zone, ZoneMap,
};

fn session(target: &str, width: u32, height: u32) -> TracingSession {
    TracingSession::new(
        target,
        width,
        height,
        Box::new(StrokeFont::default()),
        TracingConfig::default(),
        Box::new(Silent),
        Box::new(SplitMix64::seeded(3)),
    )
    .unwrap()
}

fn centre_lines(target: &str, width: u32, height: u32) -> Vec<Vec<Point>> {
    let target = TracingTarget::new(target).unwrap();
    let frame = GlyphFrame::new(&target, width, height).unwrap();
    let path = layout_target(&StrokeFont::default(), &target, &frame).unwrap();
    polylines(&path)
}

fn retrace(s: &mut TracingSession, lines: &[Vec<Point>]) {
    for line in lines {
        let Some((first, rest)) = line.split_first() else {
            continue;
        };
        assert_eq!(s.pointer_down(first.x, first.y), StrokeStatus::Drawing);
        for p in rest {
            assert_eq!(s.pointer_move(p.x, p.y), StrokeStatus::Drawing);
        }
        s.pointer_up();
    }
}

fn checkpoints(total: usize, touched: usize) -> Vec<Checkpoint> {
    (0..total)
        .map(|i| Checkpoint {
            x: i as f64,
            y: 0.0,
            touched: i < touched,
        })
        .collect()
}

#[test]
fn touched_checkpoints_stay_touched_until_clear() {
    let mut s = session("L", 300, 300);
    let lines = centre_lines("L", 300, 300);
    let first = lines[0][0];

    s.pointer_down(first.x, first.y);
    s.pointer_up();
    let touched: Vec<bool> = s.checkpoints().iter().map(|c| c.touched).collect();
    assert!(touched.iter().any(|&t| t));

    let last = *lines[0].last().unwrap();
    s.pointer_down(last.x, last.y);
    s.pointer_up();
    for (before, now) in touched.iter().zip(s.checkpoints()) {
        assert!(!before || now.touched);
    }

    s.clear();
    assert!(s.checkpoints().iter().all(|c| !c.touched));
    assert_eq!(s.ink().opaque_count(), 0);
}

#[test]
fn coverage_gate_is_exact() {
    let zones = ZoneMap::from_masks(&AlphaMask::new(10, 10), &AlphaMask::new(10, 10)).unwrap();
    let ink = AlphaMask::new(10, 10);
    let thresholds = ScoreThresholds::default();

    let low = score_attempt(&ink, &zones, &checkpoints(100, 89), &thresholds).unwrap();
    assert!(!low.passed);
    assert_eq!(low.failure, Some(FailReason::LowCoverage));

    let ok = score_attempt(&ink, &zones, &checkpoints(100, 90), &thresholds).unwrap();
    assert!(ok.passed);
    assert_eq!(ok.stars, 1);
}

#[test]
fn perfect_zone_wins() {
    let full = AlphaMask::from_raw(4, 1, vec![255; 4]).unwrap();
    let perfect = AlphaMask::from_raw(4, 1, vec![0, 255, 255, 0]).unwrap();
    let zones = ZoneMap::from_masks(&full, &perfect).unwrap();
    assert_eq!(zones.zone_at(0, 0), Some(Zone::Sloppy));
    assert_eq!(zones.zone_at(1, 0), Some(Zone::Perfect));
    assert_eq!(zones.zone_at(2, 0), Some(Zone::Perfect));
    assert_eq!(zones.zone_at(3, 0), Some(Zone::Sloppy));

    let only_perfect = ZoneMap::from_masks(&AlphaMask::new(4, 1), &perfect).unwrap();
    assert_eq!(only_perfect.zone_at(0, 0), Some(Zone::Danger));
    assert_eq!(only_perfect.zone_at(1, 0), Some(Zone::Perfect));
}

#[test]
fn stars_never_rise_with_sloppiness() {
    let sloppy = AlphaMask::from_raw(100, 1, vec![255; 100]).unwrap();
    let ink = AlphaMask::from_raw(100, 1, vec![255; 100]).unwrap();
    let thresholds = ScoreThresholds::default();
    let all_touched = checkpoints(10, 10);

    let mut previous = u8::MAX;
    for off_line in 0..=40usize {
        let mut data = vec![255u8; 100];
        for px in data.iter_mut().take(off_line) {
            *px = 0;
        }
        let perfect = AlphaMask::from_raw(100, 1, data).unwrap();
        let zones = ZoneMap::from_masks(&sloppy, &perfect).unwrap();
        let score = score_attempt(&ink, &zones, &all_touched, &thresholds).unwrap();
        let stars = if score.passed { score.stars } else { 0 };
        assert!(stars <= previous, "{off_line} off-line pixels raised the score");
        previous = stars;

        match off_line {
            0 => assert_eq!(stars, 3),
            10 => assert_eq!(stars, 2),
            20 => assert_eq!(stars, 1),
            40 => assert_eq!(score.failure, Some(FailReason::OffCenterline)),
            _ => {}
        }
    }
}

#[test]
fn retracing_letter_a_earns_three_stars() {
    let target = TracingTarget::new("A").unwrap();
    let skeleton = build_skeleton(
        &target,
        300,
        300,
        &StrokeFont::default(),
        &TracingConfig::default(),
    )
    .unwrap();
    assert!(!skeleton.checkpoints.is_empty());

    let mut s = session("A", 300, 300);
    retrace(&mut s, &centre_lines("A", 300, 300));
    assert_eq!(s.coverage(), 1.0);

    let submission = s.submit().unwrap().unwrap();
    assert!(submission.score.passed);
    assert_eq!(submission.score.stars, 3);
    assert_eq!(submission.score.danger_ratio, 0.0);
    assert_eq!(submission.streak, 1);
    assert!(submission.praise.is_some());
}

#[test]
fn three_passes_in_a_row_give_a_streak_bonus() {
    let mut s = session("I", 240, 240);
    let lines = centre_lines("I", 240, 240);
    let mut bonuses = Vec::new();
    for _ in 0..3 {
        s.clear();
        retrace(&mut s, &lines);
        let sub = s.submit().unwrap().unwrap();
        assert!(sub.score.passed);
        bonuses.push(sub.streak_bonus);
    }
    assert_eq!(bonuses, vec![false, false, true]);
    assert_eq!(s.streak(), 3);
}

#[test]
fn scribbling_outside_the_letter_aborts() {
    let mut s = session("A", 300, 300);
    assert_eq!(s.zone_at(2.0, 2.0), Some(Zone::Danger));

    assert_eq!(s.pointer_down(2.0, 2.0), StrokeStatus::Drawing);
    assert_eq!(s.pointer_move(3.0, 3.0), StrokeStatus::Drawing);
    assert_eq!(s.pointer_move(4.0, 4.0), StrokeStatus::Drawing);
    assert_eq!(s.pointer_move(5.0, 5.0), StrokeStatus::Aborted);

    assert_eq!(s.ink().opaque_count(), 0);
    assert_eq!(s.streak(), 0);
    assert_eq!(s.submit().unwrap(), None);
}

#[test]
fn failed_submit_wipes_the_attempt() {
    let mut s = session("A", 300, 300);
    let lines = centre_lines("A", 300, 300);
    let p = lines[0][0];
    s.pointer_down(p.x, p.y);
    s.pointer_up();

    let sub = s.submit().unwrap().unwrap();
    assert!(!sub.score.passed);
    assert_eq!(sub.score.failure, Some(FailReason::LowCoverage));
    assert!(sub.praise.is_none());
    assert!(!s.has_drawn());
    assert!(s.checkpoints().iter().all(|c| !c.touched));
}

#[test]
fn words_get_a_skeleton_too() {
    let s = session("SOL", 480, 200);
    assert!(s.checkpoints().len() > 3);
    assert!(s.target().is_word());
}
