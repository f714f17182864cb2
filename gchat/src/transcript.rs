//! Bounded, append-only conversation log.
//!
//! ```rust
//! use gchat::{ChatTranscript, Speaker, TranscriptLimit, Turn};
//!
//! let mut transcript = ChatTranscript::new(TranscriptLimit::new(4));
//! transcript.push(Turn::user("hi"));
//! transcript.push(Turn::assistant("Hello"));
//!
//! assert_eq!(transcript.render(), "You: hi\n\nAI: Hello\n\n");
//! assert_eq!(transcript.turns().next().map(|turn| turn.speaker), Some(Speaker::User));
//! ```

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

pub const DEFAULT_MAX_TURNS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn tag(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "AI",
        }
    }
}

impl Display for Speaker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}\n\n", self.speaker, self.text)
    }
}

/// Maximum retained turns; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLimit {
    max_turns: usize,
}

impl TranscriptLimit {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(1),
        }
    }

    pub fn max_turns(self) -> usize {
        self.max_turns
    }
}

impl Default for TranscriptLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatTranscript {
    turns: VecDeque<Turn>,
    limit: TranscriptLimit,
}

impl ChatTranscript {
    pub fn new(limit: TranscriptLimit) -> Self {
        Self {
            turns: VecDeque::new(),
            limit,
        }
    }

    /// Appends a turn, evicting the oldest ones once the limit is reached.
    ///
    /// A reply is evicted together with the message it answered, so the log
    /// never opens on an orphaned `AI:` turn. A limit of one cannot hold a
    /// full exchange and keeps only the latest turn.
    pub fn push(&mut self, turn: Turn) {
        while self.turns.len() >= self.limit.max_turns() {
            self.turns.pop_front();
            while self
                .turns
                .front()
                .is_some_and(|front| front.speaker == Speaker::Assistant)
            {
                self.turns.pop_front();
            }
        }
        self.turns.push_back(turn);
    }

    pub fn extend(&mut self, turns: impl IntoIterator<Item = Turn>) {
        for turn in turns {
            self.push(turn);
        }
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn limit(&self) -> TranscriptLimit {
        self.limit
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn render(&self) -> String {
        self.turns.iter().map(Turn::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_matches_text_log_format() {
        let mut transcript = ChatTranscript::default();
        transcript.extend([
            Turn::user("hi"),
            Turn::assistant("Hello"),
            Turn::user("bye"),
        ]);

        assert_eq!(transcript.render(), "You: hi\n\nAI: Hello\n\nYou: bye\n\n");
    }

    #[test]
    fn oldest_turns_are_evicted_first() {
        let mut transcript = ChatTranscript::new(TranscriptLimit::new(3));
        for index in 0..5 {
            transcript.push(Turn::user(format!("m{index}")));
        }

        let texts = transcript
            .turns()
            .map(|turn| turn.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["m2", "m3", "m4"]);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn eviction_drops_reply_with_its_message() {
        let mut transcript = ChatTranscript::new(TranscriptLimit::new(3));
        transcript.extend([
            Turn::user("u1"),
            Turn::assistant("a1"),
            Turn::user("u2"),
            Turn::assistant("a2"),
        ]);

        assert_eq!(transcript.render(), "You: u2\n\nAI: a2\n\n");

        transcript.extend([Turn::user("u3"), Turn::assistant("a3")]);
        assert!(transcript.render().starts_with("You: u3\n\n"));
        assert_eq!(
            transcript.turns().next().map(|turn| turn.speaker),
            Some(Speaker::User)
        );
    }

    #[test]
    fn limit_is_never_zero() {
        assert_eq!(TranscriptLimit::new(0).max_turns(), 1);
        assert_eq!(TranscriptLimit::default().max_turns(), DEFAULT_MAX_TURNS);
    }

    #[test]
    fn empty_transcript_renders_empty_string() {
        let mut transcript = ChatTranscript::default();
        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");

        transcript.push(Turn::assistant("x"));
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
