//! Intent classification — the coarse conversational purpose of a message.
//!
//! Count-based matching over the priority-ordered trigger table in
//! [`crate::lexicon`]: the category with the most trigger hits wins, ties
//! resolve by table order, and no hits at all resolves to
//! [`Intent::Statement`]. Absence of matches is the defined fallback, not
//! a failure — this function cannot error.

use serde::{Deserialize, Serialize};

use crate::lexicon::INTENT_RULES;
use crate::normalize::Normalized;

/// The coarse conversational purpose assigned to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// "hello", "good morning" — openers.
    Greeting,
    /// "bye", "see you" — closers.
    Farewell,
    /// Interrogatives or anything carrying a question mark.
    Question,
    /// Asks the bot or the room to do something.
    Request,
    /// "thanks", "much appreciated".
    Gratitude,
    /// Dissatisfaction with the room, the bot, or anything else.
    Complaint,
    /// Jokes, games, banter.
    Entertainment,
    /// Asks for or offers facts.
    Information,
    /// "imo", "i think" — stated positions.
    Opinion,
    /// Fallback when nothing else matches.
    Statement,
}

impl Intent {
    /// Whether this intent asks something of the room or the bot.
    /// Drives FAQ caching and the helpfulness/verbosity adaptation.
    #[must_use]
    pub fn is_inquiry(self) -> bool {
        matches!(self, Self::Question | Self::Request)
    }

    /// Whether this intent reads as casual/social rather than on-topic.
    /// Drives the formality adaptation.
    #[must_use]
    pub fn is_casual(self) -> bool {
        matches!(self, Self::Greeting | Self::Farewell | Self::Entertainment)
    }
}

/// Classify the intent of a normalized message.
///
/// A `?` anywhere in the text counts as one extra vote for
/// [`Intent::Question`] on top of the trigger table.
#[must_use]
pub fn classify_intent(message: &Normalized) -> Intent {
    let mut best = Intent::Statement;
    let mut best_count = 0usize;

    for rule in INTENT_RULES {
        let mut count = rule
            .triggers
            .iter()
            .filter(|t| message.matches(t))
            .count();
        if rule.intent == Intent::Question && message.text.contains('?') {
            count += 1;
        }
        // Strict '>' keeps the first (highest-priority) category on ties.
        if count > best_count {
            best_count = count;
            best = rule.intent;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(raw: &str) -> Intent {
        classify_intent(&Normalized::from_raw(raw))
    }

    #[test]
    fn greeting() {
        assert_eq!(intent_of("Hello everyone!"), Intent::Greeting);
        assert_eq!(intent_of("good morning"), Intent::Greeting);
    }

    #[test]
    fn farewell() {
        assert_eq!(intent_of("ok bye"), Intent::Farewell);
        assert_eq!(intent_of("good night all"), Intent::Farewell);
    }

    #[test]
    fn question_mark_counts_as_question_vote() {
        assert_eq!(intent_of("is the server down?"), Intent::Question);
        assert_eq!(intent_of("coffee anyone?"), Intent::Question);
    }

    #[test]
    fn request() {
        assert_eq!(intent_of("please give me a hand"), Intent::Request);
    }

    #[test]
    fn gratitude_beats_question_on_tie() {
        // One gratitude hit, one question hit — gratitude is higher priority.
        assert_eq!(intent_of("thanks, what now"), Intent::Gratitude);
    }

    #[test]
    fn greeting_beats_everything_on_tie() {
        assert_eq!(intent_of("hello, why"), Intent::Greeting);
    }

    #[test]
    fn majority_wins_over_priority() {
        // Two question votes ("what" + '?') beat one greeting vote.
        assert_eq!(intent_of("hello, what is this? "), Intent::Question);
    }

    #[test]
    fn no_match_is_statement() {
        assert_eq!(intent_of("the weather turned cold today"), Intent::Statement);
        assert_eq!(intent_of(""), Intent::Statement);
    }

    #[test]
    fn complaint() {
        assert_eq!(intent_of("this lag is annoying"), Intent::Complaint);
    }

    #[test]
    fn inquiry_and_casual_buckets() {
        assert!(Intent::Question.is_inquiry());
        assert!(Intent::Request.is_inquiry());
        assert!(!Intent::Greeting.is_inquiry());
        assert!(Intent::Greeting.is_casual());
        assert!(!Intent::Question.is_casual());
    }
}
