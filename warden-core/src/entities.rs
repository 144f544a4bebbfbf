//! Entity extraction — mentions, topics, and moderation keywords.
//!
//! Mentions come from `@name` tokens, topics and keywords from the fixed
//! dictionaries in [`crate::lexicon`]. All three outputs are sets, so
//! duplicates within one message collapse to a single occurrence.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::{KEYWORDS, TOPICS};
use crate::normalize::Normalized;

/// Entities extracted from one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// `@name` mentions, without the leading `@`.
    pub mentions: BTreeSet<String>,
    /// Canonical topic names from the topic dictionary.
    pub topics: BTreeSet<String>,
    /// Canonical (singular) keywords from the keyword dictionary.
    pub keywords: BTreeSet<String>,
}

impl Entities {
    /// Whether the given name (case-insensitive) was mentioned.
    #[must_use]
    pub fn mentions_name(&self, name: &str) -> bool {
        self.mentions.contains(&name.to_lowercase())
    }
}

/// Extract all entities from a normalized message.
#[must_use]
pub fn extract_entities(message: &Normalized) -> Entities {
    let mut out = Entities::default();

    for token in &message.tokens {
        if let Some(name) = token.strip_prefix('@') {
            if !name.is_empty() {
                out.mentions.insert(name.to_string());
            }
            continue;
        }
        // Keywords match the canonical form or its plain plural.
        for keyword in KEYWORDS {
            if token == keyword || token.strip_suffix('s') == Some(keyword) {
                out.keywords.insert((*keyword).to_string());
            }
        }
    }

    for (topic, triggers) in TOPICS {
        if triggers.iter().any(|t| message.matches(t)) {
            out.topics.insert((*topic).to_string());
        }
    }

    out
}
