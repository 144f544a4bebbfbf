//! Reply generation — template tables keyed by intent, tone, and
//! personality register, with anti-repetition against the room's ring.
//!
//! Selection is pure: the caller passes the exclusion ring and an RNG, and
//! gets back the chosen template key plus rendered text. Latency simulation
//! and state updates belong to the engine, not here.
//!
//! Reply building never fails. An intent/tone combination with no usable
//! template falls through to [`fallback_reply`].

use std::collections::VecDeque;

use rand::Rng;

use crate::classify::Classification;
use crate::intent::Intent;
use crate::types::Personality;

/// A selected template, rendered for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    /// Stable identifier, recorded in the room's anti-repetition ring.
    pub template_key: String,
    /// The reply text, placeholders substituted.
    pub text: String,
}

/// Sentiment collapsed to three tones for template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Upbeat,
    Even,
    Gentle,
}

impl Tone {
    fn of(classification: &Classification) -> Self {
        match classification.sentiment.weight() {
            w if w > 0 => Self::Upbeat,
            0 => Self::Even,
            _ => Self::Gentle,
        }
    }
}

struct Template {
    key: &'static str,
    text: &'static str,
}

/// Whether this message is asking for the room rules.
#[must_use]
pub fn is_rules_request(classification: &Classification) -> bool {
    classification.intent.is_inquiry() && classification.entities.keywords.contains("rule")
}

/// Enumerate the configured rule list, verbatim and in order.
#[must_use]
pub fn rules_reply(rules: &[String]) -> RenderedReply {
    let mut text = String::from("Room rules:");
    for (i, rule) in rules.iter().enumerate() {
        text.push_str(&format!("\n{}. {rule}", i + 1));
    }
    if rules.is_empty() {
        text.push_str(" none configured. Use your judgement.");
    }
    RenderedReply { template_key: "rules-list".to_string(), text }
}

/// The reply of last resort. Used when no template survives selection and
/// when reply building fails for any other reason.
#[must_use]
pub fn fallback_reply() -> RenderedReply {
    RenderedReply {
        template_key: "fallback".to_string(),
        text: "I'm not sure what to say to that, but I'm listening.".to_string(),
    }
}

/// Select and render a reply for one classified message.
///
/// Templates used recently (present in `exclude`) are skipped; if that
/// leaves nothing, the exclusion is lifted rather than failing. The rules
/// request bypasses the ring entirely — rules are always enumerated.
pub fn render_reply<R: Rng + ?Sized>(
    classification: &Classification,
    personality: Personality,
    sender_name: &str,
    rules: &[String],
    exclude: &VecDeque<String>,
    rng: &mut R,
) -> RenderedReply {
    if is_rules_request(classification) {
        return rules_reply(rules);
    }

    let tone = Tone::of(classification);
    let formal = personality.formality >= 0.5;

    let mut candidates: Vec<&'static Template> = base_candidates(classification.intent, formal).iter().collect();
    candidates.extend(tone_candidates(classification.intent, tone));
    if personality.humor >= 0.6 {
        candidates.extend(playful_candidates(classification.intent));
    }
    if candidates.is_empty() {
        return fallback_reply();
    }

    let fresh: Vec<&'static Template> = candidates
        .iter()
        .copied()
        .filter(|t| !exclude.iter().any(|used| used == t.key))
        .collect();
    // With everything used recently, repeating beats silence.
    let pool = if fresh.is_empty() { &candidates } else { &fresh };
    let chosen = pool[rng.gen_range(0..pool.len())];

    let mut text = chosen.text.replace("{name}", sender_name);
    if let Some(topic) = classification.entities.topics.iter().next() {
        text = text.replace("{topic}", topic);
    } else {
        text = text.replace("{topic}", "that");
    }
    if personality.verbosity >= 0.6 && classification.intent.is_inquiry() {
        text.push_str(if formal {
            " If that does not cover it, please ask again with more detail."
        } else {
            " if that doesn't cover it, just ask again!"
        });
    }

    RenderedReply { template_key: chosen.key.to_string(), text }
}

// ---------------------------------------------------------------------------
// Template tables
// ---------------------------------------------------------------------------

fn base_candidates(intent: Intent, formal: bool) -> &'static [Template] {
    match (intent, formal) {
        (Intent::Greeting, true) => &[
            Template { key: "greet-formal-1", text: "Hello, {name}. Welcome to the room." },
            Template { key: "greet-formal-2", text: "Good to see you, {name}." },
        ],
        (Intent::Greeting, false) => &[
            Template { key: "greet-casual-1", text: "hey {name}!" },
            Template { key: "greet-casual-2", text: "yo {name}, welcome in" },
            Template { key: "greet-casual-3", text: "hi {name} o/" },
        ],
        (Intent::Farewell, true) => &[
            Template { key: "bye-formal-1", text: "Goodbye, {name}. Take care." },
            Template { key: "bye-formal-2", text: "Until next time, {name}." },
        ],
        (Intent::Farewell, false) => &[
            Template { key: "bye-casual-1", text: "later {name}!" },
            Template { key: "bye-casual-2", text: "cya {name} o/" },
        ],
        (Intent::Question, true) => &[
            Template { key: "question-formal-1", text: "A fair question about {topic}, {name}. I do not have a definitive answer, but someone here may." },
            Template { key: "question-formal-2", text: "Good question, {name} — perhaps another member knows more about {topic}." },
        ],
        (Intent::Question, false) => &[
            Template { key: "question-casual-1", text: "good one, {name} — anyone here know about {topic}?" },
            Template { key: "question-casual-2", text: "hmm, not sure about {topic} myself. anyone?" },
        ],
        (Intent::Request, true) => &[
            Template { key: "request-formal-1", text: "I will do what I can, {name}." },
            Template { key: "request-formal-2", text: "Understood, {name}. Let me see what is possible." },
        ],
        (Intent::Request, false) => &[
            Template { key: "request-casual-1", text: "on it, {name}" },
            Template { key: "request-casual-2", text: "sure thing, {name}, gimme a sec" },
        ],
        (Intent::Gratitude, true) => &[
            Template { key: "thanks-formal-1", text: "You are most welcome, {name}." },
            Template { key: "thanks-formal-2", text: "Happy to help, {name}." },
        ],
        (Intent::Gratitude, false) => &[
            Template { key: "thanks-casual-1", text: "anytime, {name}!" },
            Template { key: "thanks-casual-2", text: "np {name} :)" },
        ],
        (Intent::Complaint, true) => &[
            Template { key: "complaint-formal-1", text: "I am sorry to hear that, {name}. Your feedback is noted." },
            Template { key: "complaint-formal-2", text: "Noted, {name}. We will look into {topic}." },
        ],
        (Intent::Complaint, false) => &[
            Template { key: "complaint-casual-1", text: "ugh, that's rough {name}. noted." },
            Template { key: "complaint-casual-2", text: "fair point {name}, passing it along" },
        ],
        (Intent::Entertainment, true) => &[
            Template { key: "fun-formal-1", text: "An amusing thought, {name}." },
        ],
        (Intent::Entertainment, false) => &[
            Template { key: "fun-casual-1", text: "haha, good one {name}" },
            Template { key: "fun-casual-2", text: "lol {name}" },
        ],
        (Intent::Information, true) => &[
            Template { key: "info-formal-1", text: "Thank you for sharing that, {name}." },
            Template { key: "info-formal-2", text: "Interesting — noted, {name}." },
        ],
        (Intent::Information, false) => &[
            Template { key: "info-casual-1", text: "oh nice, didn't know that {name}" },
            Template { key: "info-casual-2", text: "good to know!" },
        ],
        (Intent::Opinion, true) => &[
            Template { key: "opinion-formal-1", text: "A reasonable position, {name}." },
        ],
        (Intent::Opinion, false) => &[
            Template { key: "opinion-casual-1", text: "fair take, {name}" },
            Template { key: "opinion-casual-2", text: "i can see that" },
        ],
        (Intent::Statement, true) => &[
            Template { key: "statement-formal-1", text: "Understood, {name}." },
        ],
        (Intent::Statement, false) => &[
            Template { key: "statement-casual-1", text: "gotcha, {name}" },
            Template { key: "statement-casual-2", text: "mm, hear you" },
        ],
    }
}

fn tone_candidates(intent: Intent, tone: Tone) -> &'static [Template] {
    match (intent, tone) {
        (Intent::Greeting, Tone::Upbeat) => &[
            Template { key: "greet-upbeat-1", text: "great energy, {name} — welcome!" },
        ],
        (Intent::Complaint | Intent::Statement, Tone::Gentle) => &[
            Template { key: "gentle-1", text: "Sorry things aren't going smoothly, {name}. Hang in there." },
        ],
        (Intent::Question, Tone::Gentle) => &[
            Template { key: "question-gentle-1", text: "That sounds frustrating, {name}. Let's see if anyone can help with {topic}." },
        ],
        (Intent::Statement | Intent::Opinion, Tone::Upbeat) => &[
            Template { key: "upbeat-1", text: "love the enthusiasm, {name}!" },
        ],
        _ => &[],
    }
}

fn playful_candidates(intent: Intent) -> &'static [Template] {
    match intent {
        Intent::Greeting => &[
            Template { key: "greet-playful-1", text: "{name} has entered the chat — everyone act natural." },
        ],
        Intent::Farewell => &[
            Template { key: "bye-playful-1", text: "escaping already, {name}? fine, be that way ;)" },
        ],
        Intent::Question => &[
            Template { key: "question-playful-1", text: "if i had a coin for every {topic} question... good one though, {name}" },
        ],
        Intent::Gratitude => &[
            Template { key: "thanks-playful-1", text: "flattery accepted, {name}" },
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn no_exclusions() -> VecDeque<String> {
        VecDeque::new()
    }

    fn rules() -> Vec<String> {
        vec!["Be kind.".to_string(), "No spam.".to_string()]
    }

    #[test]
    fn rules_request_enumerates_verbatim_in_order() {
        let c = classify("@bot what are the rules?");
        assert!(is_rules_request(&c));
        let reply =
            render_reply(&c, Personality::default(), "alice", &rules(), &no_exclusions(), &mut rng());
        assert_eq!(reply.template_key, "rules-list");
        assert_eq!(reply.text, "Room rules:\n1. Be kind.\n2. No spam.");
    }

    #[test]
    fn rules_reply_survives_empty_rule_list() {
        let reply = rules_reply(&[]);
        assert!(!reply.text.is_empty());
    }

    #[test]
    fn name_placeholder_is_substituted() {
        let c = classify("hello there");
        let reply =
            render_reply(&c, Personality::default(), "bob", &rules(), &no_exclusions(), &mut rng());
        assert!(!reply.text.contains("{name}"), "raw placeholder in {:?}", reply.text);
    }

    #[test]
    fn topic_placeholder_never_leaks() {
        // No topic in the message: the placeholder degrades to "that".
        let c = classify("why is it like this?");
        for seed in 0..20 {
            let mut r = StdRng::seed_from_u64(seed);
            let reply =
                render_reply(&c, Personality::default(), "bob", &rules(), &no_exclusions(), &mut r);
            assert!(!reply.text.contains("{topic}"), "raw placeholder in {:?}", reply.text);
        }
    }

    #[test]
    fn excluded_templates_are_skipped() {
        let c = classify("hello there");
        // Formality 0.5 selects the formal greeting table (two entries).
        let personality = Personality::new(0.5, 0.0, 0.5, 0.0);
        let mut exclude = VecDeque::new();
        exclude.push_back("greet-formal-1".to_string());
        for seed in 0..20 {
            let mut r = StdRng::seed_from_u64(seed);
            let reply = render_reply(&c, personality, "bob", &rules(), &exclude, &mut r);
            assert_ne!(reply.template_key, "greet-formal-1");
        }
    }

    #[test]
    fn full_exclusion_lifts_rather_than_fails() {
        let c = classify("hello there");
        let personality = Personality::new(0.5, 0.0, 0.5, 0.0);
        let mut exclude = VecDeque::new();
        for key in ["greet-formal-1", "greet-formal-2"] {
            exclude.push_back(key.to_string());
        }
        let reply = render_reply(&c, personality, "bob", &rules(), &exclude, &mut rng());
        assert!(reply.template_key.starts_with("greet-formal-"));
    }

    #[test]
    fn every_intent_produces_a_reply() {
        let samples = [
            "hello", "bye everyone", "what is this?", "please help me out",
            "thanks a lot", "this lag is annoying", "lol tell me a joke",
            "did you know the fact of the day", "i think this is fine",
            "the weather turned cold",
        ];
        for raw in samples {
            let c = classify(raw);
            for formality in [0.2_f32, 0.8] {
                let p = Personality::new(0.5, 0.8, formality, 0.8);
                let reply = render_reply(&c, p, "sam", &rules(), &no_exclusions(), &mut rng());
                assert!(!reply.text.is_empty(), "empty reply for {raw:?}");
                assert!(!reply.template_key.is_empty());
            }
        }
    }

    #[test]
    fn verbosity_extends_inquiry_replies() {
        let c = classify("what is going on here?");
        let terse = Personality::new(0.5, 0.0, 0.8, 0.2);
        let wordy = Personality::new(0.5, 0.0, 0.8, 0.9);
        let a = render_reply(&c, terse, "sam", &rules(), &no_exclusions(), &mut rng());
        let b = render_reply(&c, wordy, "sam", &rules(), &no_exclusions(), &mut rng());
        assert!(b.text.len() > a.text.len());
    }

    #[test]
    fn fallback_is_nonempty() {
        let reply = fallback_reply();
        assert_eq!(reply.template_key, "fallback");
        assert!(!reply.text.is_empty());
    }
}
