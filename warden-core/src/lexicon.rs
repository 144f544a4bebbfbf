//! Static pattern tables driving the classification pipeline.
//!
//! Everything here is pure data: trigger phrases per intent, the weighted
//! sentiment lexicon, topic/keyword dictionaries, and the toxicity tiers.
//! Tables are versioned so that scoring changes are visible data artifacts,
//! and the intent table is ordered — table order IS the tie-break priority.
//!
//! Matching discipline (enforced by the matchers, documented here because
//! the tables depend on it):
//! - single words match whole tokens only ("hell" must not hit "hello")
//! - phrases (contain a space) and masked forms (contain `*`) match as
//!   substrings of the normalized text

use crate::intent::Intent;

/// Version of the rule tables. Bump on any table change.
pub const LEXICON_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Intent triggers (priority-ordered: first entry wins ties)
// ---------------------------------------------------------------------------

/// One intent category and its trigger phrases.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    /// The intent this rule votes for.
    pub intent: Intent,
    /// Trigger words/phrases for this intent.
    pub triggers: &'static [&'static str],
}

/// Priority-ordered intent rule table.
///
/// greeting > farewell > gratitude > complaint > question > request >
/// entertainment > information > opinion. `Intent::Statement` is the
/// no-match fallback and deliberately has no row.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        triggers: &[
            "hello", "hi", "hey", "howdy", "yo", "greetings", "sup",
            "good morning", "good afternoon", "good evening", "what's up",
        ],
    },
    IntentRule {
        intent: Intent::Farewell,
        triggers: &[
            "bye", "goodbye", "farewell", "cya", "gtg", "good night",
            "see you", "see ya", "later all", "im off", "i'm off",
        ],
    },
    IntentRule {
        intent: Intent::Gratitude,
        triggers: &[
            "thanks", "thank", "thx", "ty", "appreciated", "grateful",
            "thank you", "much appreciated", "cheers for that",
        ],
    },
    IntentRule {
        intent: Intent::Complaint,
        triggers: &[
            "annoying", "terrible", "awful", "worst", "unfair", "broken",
            "lame", "sucks", "i hate", "not working", "this is bad",
            "fed up", "sick of",
        ],
    },
    IntentRule {
        intent: Intent::Question,
        triggers: &[
            "what", "why", "how", "when", "where", "who", "which",
            "is there", "are there", "does anyone", "anyone know",
        ],
    },
    IntentRule {
        intent: Intent::Request,
        triggers: &[
            "please", "can you", "could you", "would you", "will you",
            "give me", "show me", "help me", "i need", "let me",
        ],
    },
    IntentRule {
        intent: Intent::Entertainment,
        triggers: &[
            "joke", "funny", "lol", "haha", "lmao", "meme", "play",
            "sing", "tell me a joke", "make me laugh",
        ],
    },
    IntentRule {
        intent: Intent::Information,
        triggers: &[
            "explain", "define", "info", "information", "fact", "facts",
            "tell me about", "what is", "who is", "did you know",
        ],
    },
    IntentRule {
        intent: Intent::Opinion,
        triggers: &[
            "imo", "imho", "agree", "disagree", "i think", "i believe",
            "i feel", "in my opinion", "you should", "do you think",
        ],
    },
];

// ---------------------------------------------------------------------------
// Sentiment lexicon (weighted tiers)
// ---------------------------------------------------------------------------

/// Words contributing +2 to the sentiment accumulator.
pub const VERY_POSITIVE: &[&str] = &[
    "love", "awesome", "amazing", "excellent", "fantastic", "wonderful",
    "brilliant", "perfect", "incredible", "best",
];

/// Words contributing +1.
pub const POSITIVE: &[&str] = &[
    "good", "great", "nice", "cool", "happy", "glad", "like", "fun",
    "helpful", "sweet", "thanks", "welcome",
];

/// Words contributing −1.
pub const NEGATIVE: &[&str] = &[
    "bad", "sad", "annoying", "boring", "meh", "dislike", "ugh", "slow",
    "broken", "wrong", "sucks",
];

/// Words contributing −2.
pub const VERY_NEGATIVE: &[&str] = &[
    "hate", "awful", "terrible", "horrible", "worst", "disgusting",
    "garbage", "useless", "pathetic",
];

// ---------------------------------------------------------------------------
// Entity dictionaries
// ---------------------------------------------------------------------------

/// Topic dictionary: canonical topic name → trigger words.
pub const TOPICS: &[(&str, &[&str])] = &[
    ("music", &["music", "song", "songs", "band", "album", "playlist"]),
    ("help", &["help", "support", "assist", "assistance"]),
    ("chat", &["chat", "talk", "talking", "conversation"]),
    ("moderation", &["moderation", "moderator", "mod", "mods", "banned"]),
    ("technology", &["technology", "tech", "computer", "software", "code"]),
    ("gaming", &["gaming", "game", "games", "gamer"]),
    ("movies", &["movie", "movies", "film", "films", "cinema"]),
    ("books", &["book", "books", "novel", "novels", "reading"]),
];

/// Keyword dictionary (moderation-relevant vocabulary). Tokens matching a
/// keyword or its plural collapse to the canonical singular form.
pub const KEYWORDS: &[&str] = &[
    "rule", "help", "question", "problem", "issue", "admin", "ban",
    "kick", "mute",
];

// ---------------------------------------------------------------------------
// Toxicity tiers
// ---------------------------------------------------------------------------

/// Severe tier, token-matched words.
pub const SEVERE_WORDS: &[&str] = &[
    "fuck", "fucking", "fucked", "cunt", "bitch", "asshole", "bastard",
];

/// Severe tier, substring-matched patterns: masked profanity and
/// personal-attack phrases.
pub const SEVERE_PATTERNS: &[&str] = &[
    "f***", "f**k", "f*ck", "fck you", "b*tch", "a**hole",
    "kill yourself", "kys", "go die", "you should die",
    "nobody likes you", "you're worthless", "you are worthless",
];

/// Moderate tier, token-matched words.
pub const MODERATE_WORDS: &[&str] = &[
    "stupid", "idiot", "idiots", "dumb", "moron", "crap", "damn", "hell",
    "trash", "loser", "jerk", "sucks",
];

/// Moderate tier, substring-matched phrases.
pub const MODERATE_PATTERNS: &[&str] = &["shut up", "hate you", "piss off"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_table_priority_order() {
        // The table order is the documented tie-break priority.
        let order: Vec<Intent> = INTENT_RULES.iter().map(|r| r.intent).collect();
        assert_eq!(order[0], Intent::Greeting);
        assert_eq!(order[1], Intent::Farewell);
        assert_eq!(order[2], Intent::Gratitude);
        assert_eq!(order[3], Intent::Complaint);
        assert_eq!(order[4], Intent::Question);
        assert_eq!(*order.last().expect("non-empty table"), Intent::Opinion);
    }

    #[test]
    fn no_statement_row() {
        assert!(INTENT_RULES.iter().all(|r| r.intent != Intent::Statement));
    }

    #[test]
    fn tables_are_lowercase() {
        let all = INTENT_RULES
            .iter()
            .flat_map(|r| r.triggers.iter())
            .chain(VERY_POSITIVE)
            .chain(POSITIVE)
            .chain(NEGATIVE)
            .chain(VERY_NEGATIVE)
            .chain(SEVERE_WORDS)
            .chain(MODERATE_WORDS);
        for word in all {
            assert_eq!(*word, word.to_lowercase(), "table entry must be lowercase");
        }
    }
}
