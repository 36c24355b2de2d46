//! Input matcher: keystroke filtering and prefix matching against the
//! accepted spellings of the live prompt.

use crate::romaji;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Buffer is a proper prefix of at least one spelling.
    Partial,
    /// Buffer equals one spelling.
    Complete,
    /// Buffer is not a prefix of any spelling.
    Miss,
}

/// Normalise a raw key value into a buffer character. Keys typed while an IME
/// composition is in progress, named keys ("Shift", "Enter", ...) and anything
/// outside the typeable set yield `None`.
pub fn accept_key(key: &str, composing: bool) -> Option<char> {
    if composing {
        return None;
    }
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let c = c.to_ascii_uppercase();
    romaji::is_typeable(c).then_some(c)
}

pub fn match_input(spellings: &[&str], buffer: &str) -> MatchOutcome {
    if spellings.iter().any(|s| *s == buffer) {
        MatchOutcome::Complete
    } else if spellings.iter().any(|s| s.starts_with(buffer)) {
        MatchOutcome::Partial
    } else {
        MatchOutcome::Miss
    }
}

/// Next key of the first spelling still reachable from `buffer`.
pub fn next_key_hint(spellings: &[&str], buffer: &str) -> Option<char> {
    spellings
        .iter()
        .filter(|s| s.starts_with(buffer))
        .find_map(|s| s[buffer.len()..].chars().next())
}

/// Accumulated uppercase keystrokes for the live prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    keys: String,
}

impl InputBuffer {
    pub fn push(&mut self, c: char) {
        self.keys.push(c);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
