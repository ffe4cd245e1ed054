//! Typing tagline animation for the hero banner.
//!
//! A [`Typewriter`] types a phrase one character at a time, holds it, erases
//! it faster than it was typed and moves on to the next phrase, forever.
//! It is driven by elapsed milliseconds so the render loop can call it at
//! any rate without losing steps.

/// Delay before the first character appears.
pub const START_DELAY_MS: u64 = 1000;
/// Delay between typed characters.
pub const TYPE_DELAY_MS: u64 = 100;
/// Delay between erased characters.
pub const DELETE_DELAY_MS: u64 = 50;
/// How long a complete phrase stays on screen.
pub const HOLD_DELAY_MS: u64 = 2000;
/// Pause between erasing a phrase and typing the next.
pub const NEXT_PHRASE_DELAY_MS: u64 = 500;

/// Phrases shown when none are configured.
pub const DEFAULT_PHRASES: &[&str] = &[
    "Building the future with code",
    "Creating amazing digital experiences",
    "Transforming ideas into reality",
    "Innovating with technology",
];

/// Typing animation state.
#[derive(Debug, Clone)]
pub struct Typewriter {
    /// Non-empty phrases, cycled in order.
    phrases: Vec<String>,
    /// Index of the phrase being typed or erased.
    phrase_index: usize,
    /// Number of visible characters of the current phrase.
    char_index: usize,
    /// Whether characters are currently being erased.
    deleting: bool,
    /// Time of the next step in milliseconds.
    next_step_ms: u64,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter().map(|s| s.to_string()))
    }
}

impl Typewriter {
    /// Create a typewriter over the given phrases; empty phrases are skipped.
    pub fn new<I>(phrases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
            phrase_index: 0,
            char_index: 0,
            deleting: false,
            next_step_ms: START_DELAY_MS,
        }
    }

    /// Run every step that is due at `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.phrases.is_empty() {
            return;
        }
        while self.next_step_ms <= elapsed_ms {
            let delay = self.step();
            self.next_step_ms += delay;
        }
    }

    /// Type or erase one character and return the delay until the next step.
    fn step(&mut self) -> u64 {
        let len = self.current_len();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            HOLD_DELAY_MS
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            NEXT_PHRASE_DELAY_MS
        } else if self.deleting {
            DELETE_DELAY_MS
        } else {
            TYPE_DELAY_MS
        }
    }

    fn current_len(&self) -> usize {
        self.phrases
            .get(self.phrase_index)
            .map(|p| p.chars().count())
            .unwrap_or(0)
    }

    /// The currently visible part of the phrase.
    pub fn visible(&self) -> &str {
        let Some(phrase) = self.phrases.get(self.phrase_index) else {
            return "";
        };
        match phrase.char_indices().nth(self.char_index) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    /// Index of the phrase being typed or erased.
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    /// Whether the phrase is currently being erased.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }
}
