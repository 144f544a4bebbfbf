//! Sentiment scoring — weighted lexicon scan into five ordered levels.
//!
//! Each lexicon hit moves a signed accumulator (+2/+1/−1/−2); the final
//! score maps to a level through fixed buckets. The bucket edges are pinned
//! here and covered by tests: `>= 2` very positive, `1` positive, `0`
//! neutral, `-1` negative, `<= -2` very negative.

use serde::{Deserialize, Serialize};

use crate::lexicon::{NEGATIVE, POSITIVE, VERY_NEGATIVE, VERY_POSITIVE};
use crate::normalize::Normalized;

/// One of five ordered emotional-tone classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLevel {
    /// Accumulator ≤ −2.
    VeryNegative,
    /// Accumulator −1.
    Negative,
    /// Accumulator 0 (and the empty-text default).
    Neutral,
    /// Accumulator 1.
    Positive,
    /// Accumulator ≥ 2.
    VeryPositive,
}

impl SentimentLevel {
    /// Map a raw accumulator score to a level using the fixed buckets.
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 2 => Self::VeryPositive,
            1 => Self::Positive,
            0 => Self::Neutral,
            -1 => Self::Negative,
            _ => Self::VeryNegative,
        }
    }

    /// Signed weight of this level (−2..=2), used by the personality
    /// adapter to average sentiment over a window.
    #[must_use]
    pub fn weight(self) -> i32 {
        match self {
            Self::VeryNegative => -2,
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
            Self::VeryPositive => 2,
        }
    }

    /// Whether the level is on the positive side.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.weight() > 0
    }
}

/// Raw accumulator over the four lexicon tiers.
#[must_use]
pub fn sentiment_score(message: &Normalized) -> i32 {
    let hits = |table: &[&str]| -> i32 {
        i32::try_from(table.iter().filter(|w| message.matches(w)).count()).unwrap_or(i32::MAX)
    };

    2 * hits(VERY_POSITIVE) + hits(POSITIVE) - hits(NEGATIVE) - 2 * hits(VERY_NEGATIVE)
}

/// Score a normalized message into one of the five levels.
#[must_use]
pub fn classify_sentiment(message: &Normalized) -> SentimentLevel {
    SentimentLevel::from_score(sentiment_score(message))
}
