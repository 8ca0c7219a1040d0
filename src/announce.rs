//! Spoken feedback boundary.
//!
//! The engines decide *what* to say; an injected [`Announcer`] decides how
//! (speech synthesis in the browser, nothing at all when muted, a log in
//! tests).

/// Praise said after a passed tracing attempt.
pub const PRAISE_MESSAGES: &[&str] = &[
    "Bra jobbat!",
    "Du gjorde helt rätt!",
    "Fantastiskt spårat!",
    "Superbra!",
    "Snyggt skrivet!",
    "Det där var perfekt!",
    "Toppen!",
    "Du klarade det galant!",
    "Fortsätt så!",
    "Så duktig du är!",
    "Helt rätt!",
    "Strålande!",
    "Du följer linjerna jätte bra!",
    "Imponerande!",
    "Det där satt perfekt!",
    "Heja dig!",
    "Du fixade det!",
];

/// Prefix for the puzzle completion line ("Bra! <word>").
pub const PUZZLE_DONE_PREFIX: &str = "Bra!";

pub trait Announcer {
    fn announce(&mut self, text: &str);
}

/// Muted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Announcer for Silent {
    fn announce(&mut self, _text: &str) {}
}

/// Keeps every line; handy for tests and replay logs.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
}

impl Announcer for Transcript {
    fn announce(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

impl<A: Announcer + ?Sized> Announcer for Box<A> {
    fn announce(&mut self, text: &str) {
        (**self).announce(text)
    }
}

/// Forwards lines to a JavaScript callback (typically a speech-synthesis
/// wrapper owned by the page).
pub struct JsAnnouncer {
    callback: js_sys::Function,
}

impl JsAnnouncer {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl Announcer for JsAnnouncer {
    fn announce(&mut self, text: &str) {
        let arg = wasm_bindgen::JsValue::from_str(text);
        if let Err(err) = self.callback.call1(&wasm_bindgen::JsValue::NULL, &arg) {
            tracing::warn!("announcer callback failed: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_records_in_order() {
        let mut t = Transcript::default();
        t.announce("SOL");
        t.announce("Bra! SOL");
        assert_eq!(t.lines, vec!["SOL", "Bra! SOL"]);
    }

    #[test]
    fn praise_list_has_no_blank_lines() {
        assert!(PRAISE_MESSAGES.iter().all(|p| !p.trim().is_empty()));
    }
}
