// Tracing level catalogue: capitals, small letters, digits, then words.
// Ids are 1-based and follow catalogue order.

use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::Serialize;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÅÄÖ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyzåäö";
pub const DIGITS: &str = "123456789";

pub static UPPER_WORDS: [(&str, &str); 20] = [
    ("SOL", "☀️"),
    ("BIL", "🚗"),
    ("HUS", "🏠"),
    ("BOK", "📖"),
    ("KATT", "🐱"),
    ("HUND", "🐶"),
    ("TRÄD", "🌳"),
    ("BLAD", "🍃"),
    ("BÅT", "⛵"),
    ("TÅG", "🚂"),
    ("BOLL", "⚽"),
    ("SKO", "👞"),
    ("HATT", "🎩"),
    ("GLAS", "🥛"),
    ("STOL", "🪑"),
    ("LAMPA", "💡"),
    ("SÄNG", "🛏️"),
    ("DÖRR", "🚪"),
    ("FÅGEL", "🐦"),
    ("FISK", "🐟"),
];

pub static LOWER_WORDS: [(&str, &str); 20] = [
    ("äpple", "🍎"),
    ("banan", "🍌"),
    ("päron", "🍐"),
    ("melon", "🍉"),
    ("krona", "👑"),
    ("slott", "🏰"),
    ("spöke", "👻"),
    ("robot", "🤖"),
    ("raket", "🚀"),
    ("stjärna", "⭐"),
    ("måne", "🌙"),
    ("moln", "☁️"),
    ("regn", "🌧️"),
    ("snö", "❄️"),
    ("eld", "🔥"),
    ("vatten", "💧"),
    ("is", "🧊"),
    ("berg", "⛰️"),
    ("skog", "🌲"),
    ("blomma", "🌸"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum LevelKind {
    Uppercase,
    Lowercase,
    Number,
    Word,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TracingLevel {
    pub id: u32,
    /// Display name ("Stora A", "Ordet SOL").
    pub name: String,
    pub target: String,
    pub kind: LevelKind,
    pub emoji: Option<&'static str>,
}

fn build_levels() -> Vec<TracingLevel> {
    let mut out = Vec::with_capacity(107);
    let mut push = |name: String, target: String, kind: LevelKind, emoji: Option<&'static str>| {
        let id = out.len() as u32 + 1;
        out.push(TracingLevel {
            id,
            name,
            target,
            kind,
            emoji,
        });
    };

    for c in UPPERCASE.chars() {
        push(format!("Stora {c}"), c.to_string(), LevelKind::Uppercase, None);
    }
    for c in LOWERCASE.chars() {
        push(format!("Lilla {c}"), c.to_string(), LevelKind::Lowercase, None);
    }
    for c in DIGITS.chars() {
        push(format!("Siffra {c}"), c.to_string(), LevelKind::Number, None);
    }
    for (word, emoji) in UPPER_WORDS.iter().chain(LOWER_WORDS.iter()) {
        push(format!("Ordet {word}"), word.to_string(), LevelKind::Word, Some(*emoji));
    }
    out
}

pub fn levels() -> &'static [TracingLevel] {
    static LEVELS: OnceLock<Vec<TracingLevel>> = OnceLock::new();
    LEVELS.get_or_init(build_levels)
}

pub fn level(id: u32) -> Option<&'static TracingLevel> {
    levels().iter().find(|l| l.id == id)
}
