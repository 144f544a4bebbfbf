//! Toxicity severity — clean/moderate/severe, independent of user history.
//!
//! First stage of the moderation policy: raw lexicon/pattern matches only.
//! Accumulated per-user scoring and room thresholds live in
//! [`crate::behavior`] and [`crate::policy`].

use serde::{Deserialize, Serialize};

use crate::lexicon::{MODERATE_PATTERNS, MODERATE_WORDS, SEVERE_PATTERNS, SEVERE_WORDS};
use crate::normalize::Normalized;

/// Offensiveness classification of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No toxicity table hit.
    Clean,
    /// Mild insults and rudeness. Delivered with a warning.
    Moderate,
    /// Profanity (including masked forms) and personal attacks. Blocked.
    Severe,
}

/// Classify the toxicity severity of a normalized message.
///
/// Any severe hit wins outright; moderate hits only matter when no severe
/// table matched. Unmatched text is `Clean` — never an error.
#[must_use]
pub fn classify_severity(message: &Normalized) -> Severity {
    let any = |table: &[&str]| table.iter().any(|entry| message.matches(entry));

    if any(SEVERE_WORDS) || any(SEVERE_PATTERNS) {
        Severity::Severe
    } else if any(MODERATE_WORDS) || any(MODERATE_PATTERNS) {
        Severity::Moderate
    } else {
        Severity::Clean
    }
}
