//! Property-based tests for the moderation pipeline.
//!
//! Random inputs verify the structural invariants: the toxicity score is
//! never negative and only decays, personality axes stay clamped, bounded
//! collections never exceed capacity, classification never panics, and the
//! safety-mode table stays monotonic.

use proptest::prelude::*;

use chrono::{Duration, TimeZone, Utc};
use warden_core::behavior::BehaviorRecord;
use warden_core::classify::classify;
use warden_core::config::{DecayConfig, ModerationConfig, RoomConfig, SpamConfig};
use warden_core::personality::adapt;
use warden_core::policy::{decide, Action, SafetyMode};
use warden_core::room::{Interaction, RoomState};
use warden_core::sentiment::SentimentLevel;
use warden_core::toxicity::Severity;
use warden_core::types::{Personality, RoomMood, UserId};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Clean),
        Just(Severity::Moderate),
        Just(Severity::Severe),
    ]
}

fn arb_sentiment() -> impl Strategy<Value = SentimentLevel> {
    (-5i32..=5).prop_map(SentimentLevel::from_score)
}

fn arb_intent() -> impl Strategy<Value = warden_core::Intent> {
    use warden_core::Intent;
    prop_oneof![
        Just(Intent::Greeting),
        Just(Intent::Farewell),
        Just(Intent::Question),
        Just(Intent::Request),
        Just(Intent::Gratitude),
        Just(Intent::Complaint),
        Just(Intent::Entertainment),
        Just(Intent::Information),
        Just(Intent::Opinion),
        Just(Intent::Statement),
    ]
}

fn arb_mode() -> impl Strategy<Value = SafetyMode> {
    prop_oneof![
        Just(SafetyMode::AnythingGoes),
        Just(SafetyMode::SpicyButSane),
        Just(SafetyMode::Balanced),
        Just(SafetyMode::SupportOnly),
        Just(SafetyMode::TeenSafe),
    ]
}

// ---------------------------------------------------------------------------
// Property: classification never panics and always lands on valid defaults
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn classify_never_panics(raw in ".{0,200}") {
        let c = classify(&raw);
        // The sentiment level is one of the five defined buckets; any text
        // resolves to something.
        let _ = c.sentiment.weight();
        let _ = c.intent;
        let _ = c.severity;
    }
}

// ---------------------------------------------------------------------------
// Property: toxicity score is never negative
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn toxicity_score_never_negative(
        steps in prop::collection::vec((arb_severity(), 0i64..3_600), 1..40)
    ) {
        let decay = DecayConfig::default();
        let spam = SpamConfig::default();
        let moderation = ModerationConfig::default();
        let mut record = BehaviorRecord::default();
        let mut now = Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp");
        for (i, (severity, gap)) in steps.into_iter().enumerate() {
            now += Duration::seconds(gap);
            let obs = record.observe(&format!("msg {i}"), severity, now, &decay, &spam, &moderation);
            prop_assert!(obs.toxicity_score >= 0.0);
            prop_assert!(record.toxicity_score >= 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: idle time never increases the score
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decay_is_monotone(initial in arb_severity(), idle_secs in 0i64..86_400) {
        let decay = DecayConfig::default();
        let spam = SpamConfig::default();
        let moderation = ModerationConfig::default();
        let mut record = BehaviorRecord::default();
        let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp");
        record.observe("first", initial, start, &decay, &spam, &moderation);
        let before = record.toxicity_score;
        let obs = record.observe(
            "second clean message",
            Severity::Clean,
            start + Duration::seconds(idle_secs),
            &decay,
            &spam,
            &moderation,
        );
        prop_assert!(obs.toxicity_score <= before + 1e-6);
    }
}

// ---------------------------------------------------------------------------
// Property: personality axes stay within [0, 1] under arbitrary windows
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn personality_stays_clamped(
        start in (0.0..1.0f32, 0.0..1.0f32, 0.0..1.0f32, 0.0..1.0f32),
        window in prop::collection::vec((arb_intent(), arb_sentiment()), 0..20),
        rounds in 1usize..50
    ) {
        let mut p = Personality::new(start.0, start.1, start.2, start.3);
        let interactions: Vec<Interaction> = window
            .into_iter()
            .map(|(intent, sentiment)| Interaction { user: UserId(1), intent, sentiment })
            .collect();
        for _ in 0..rounds {
            adapt(&mut p, &interactions);
            prop_assert!(p.is_valid());
        }
    }
}

// ---------------------------------------------------------------------------
// Property: bounded room collections never exceed capacity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn room_collections_stay_bounded(
        entries in prop::collection::vec((arb_intent(), arb_sentiment()), 0..100)
    ) {
        let config = RoomConfig::default();
        let mut state = RoomState::new(RoomMood::Relaxed, &config);
        for (i, (intent, sentiment)) in entries.into_iter().enumerate() {
            state.record_interaction(Interaction { user: UserId(1), intent, sentiment });
            state.cache_answer(&format!("question {i}?"), "answer");
            state.note_response(&format!("tpl-{i}"));
            prop_assert!(state.history().len() <= config.history_capacity);
            prop_assert!(state.faq_len() <= config.faq_capacity);
            prop_assert!(state.recent_responses().len() <= config.recent_responses);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: permissiveness is monotonic across safety modes
// ---------------------------------------------------------------------------

fn strictness(action: Action) -> u8 {
    match action {
        Action::Allow => 0,
        Action::Warn => 1,
        Action::Block => 2,
    }
}

proptest! {
    #[test]
    fn mode_ordering_is_monotonic(score in 0.0..20.0f32, severity in arb_severity()) {
        let modes = [
            SafetyMode::AnythingGoes,
            SafetyMode::SpicyButSane,
            SafetyMode::Balanced,
            SafetyMode::SupportOnly,
            SafetyMode::TeenSafe,
        ];
        let observation = warden_core::Observation {
            toxicity_score: score,
            ..Default::default()
        };
        let mut prev = 0u8;
        for mode in modes {
            let s = strictness(decide(UserId(1), severity, &observation, mode).action);
            prop_assert!(s >= prev, "mode {mode:?} relaxed the decision");
            prev = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Property: identical text twice in the window flags the second occurrence
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn repeat_always_flags_second_copy(text in "[a-z ]{1,40}") {
        prop_assume!(!text.trim().is_empty());
        let decay = DecayConfig::default();
        let spam = SpamConfig::default();
        let moderation = ModerationConfig::default();
        let mut record = BehaviorRecord::default();
        let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp");
        record.observe(&text, Severity::Clean, start, &decay, &spam, &moderation);
        let obs = record.observe(
            &text,
            Severity::Clean,
            start + Duration::seconds(10),
            &decay,
            &spam,
            &moderation,
        );
        prop_assert!(obs.is_spam());
    }
}
