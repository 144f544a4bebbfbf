//! Per-message classification aggregate.
//!
//! Runs the lexical normalizer once and feeds the shared view to the
//! intent, sentiment, entity, and toxicity matchers. Produced fresh per
//! message; never persisted, never fails.

use serde::{Deserialize, Serialize};

use crate::entities::{extract_entities, Entities};
use crate::intent::{classify_intent, Intent};
use crate::normalize::Normalized;
use crate::sentiment::{classify_sentiment, SentimentLevel};
use crate::toxicity::{classify_severity, Severity};

/// Everything the pipeline knows about one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Conversational purpose.
    pub intent: Intent,
    /// Emotional tone.
    pub sentiment: SentimentLevel,
    /// Extracted mentions/topics/keywords.
    pub entities: Entities,
    /// Raw toxicity severity, independent of user history.
    pub severity: Severity,
}

/// Classify one raw message.
#[must_use]
pub fn classify(raw: &str) -> Classification {
    let normalized = Normalized::from_raw(raw);
    Classification {
        intent: classify_intent(&normalized),
        sentiment: classify_sentiment(&normalized),
        entities: extract_entities(&normalized),
        severity: classify_severity(&normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_resolves_to_defaults() {
        let c = classify("");
        assert_eq!(c.intent, Intent::Statement);
        assert_eq!(c.sentiment, SentimentLevel::Neutral);
        assert_eq!(c.severity, Severity::Clean);
        assert!(c.entities.mentions.is_empty());
    }

    #[test]
    fn rules_question_classifies_as_inquiry_with_keyword() {
        let c = classify("@bot what are the rules?");
        assert!(c.intent.is_inquiry());
        assert!(c.entities.mentions_name("bot"));
        assert!(c.entities.keywords.contains("rule"));
        assert_eq!(c.severity, Severity::Clean);
    }

    #[test]
    fn classification_round_trips_through_json() {
        let c = classify("@bot what are the rules?");
        let json = serde_json::to_string(&c).expect("serialize");
        let back: Classification = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.intent, c.intent);
        assert_eq!(back.severity, c.severity);
        assert_eq!(back.entities, c.entities);
    }

    #[test]
    fn toxic_complaint() {
        let c = classify("This is f***ing stupid");
        assert_eq!(c.severity, Severity::Severe);
        assert!(c.sentiment <= SentimentLevel::Neutral);
    }
}
