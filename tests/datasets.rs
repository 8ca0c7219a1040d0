// Integration tests for the tracing level catalogue.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use lekfull::trace::levels::{levels, LevelKind, DIGITS, LOWERCASE, UPPERCASE};
use lekfull::trace::{layout_target, GlyphFrame, StrokeFont, TracingTarget};

#[test]
fn level_ids_are_unique_and_contiguous() {
    let mut seen = HashSet::new();
    for (i, level) in levels().iter().enumerate() {
        assert!(seen.insert(level.id), "duplicate level id {}", level.id);
        assert_eq!(level.id as usize, i + 1, "level '{}' is out of order", level.name);
    }
    assert_eq!(seen.len(), 107);
}

#[test]
fn every_target_lays_out_with_the_stroke_font() {
    let font = StrokeFont::default();
    for level in levels() {
        let target = TracingTarget::new(&level.target)
            .unwrap_or_else(|e| panic!("level {}: {}", level.id, e));
        let frame = GlyphFrame::new(&target, 320, 240).unwrap();
        let path = layout_target(&font, &target, &frame)
            .unwrap_or_else(|e| panic!("level {} ('{}'): {}", level.id, level.target, e));
        assert!(!path.elements().is_empty(), "level {} has no strokes", level.id);
    }
}

#[test]
fn kinds_match_targets() {
    for level in levels() {
        let chars = level.target.chars().count();
        match level.kind {
            LevelKind::Uppercase => {
                assert_eq!(chars, 1);
                assert!(UPPERCASE.contains(level.target.as_str()));
            }
            LevelKind::Lowercase => {
                assert_eq!(chars, 1);
                assert!(LOWERCASE.contains(level.target.as_str()));
            }
            LevelKind::Number => assert!(DIGITS.contains(level.target.as_str())),
            LevelKind::Word => {
                assert!(chars > 1, "word level '{}' is a single glyph", level.target);
                assert!(level.emoji.is_some());
            }
        }
    }
}

#[test]
fn word_targets_are_unique() {
    let words: Vec<&str> = levels()
        .iter()
        .filter(|l| l.kind == LevelKind::Word)
        .map(|l| l.target.as_str())
        .collect();
    let unique: HashSet<&str> = words.iter().copied().collect();
    assert_eq!(words.len(), 40);
    assert_eq!(unique.len(), words.len());
}
