//! # Warden Core Library
//!
//! Transport-agnostic moderation pipeline for chat rooms. Every message
//! flows through four classifiers and a threshold policy:
//!
//! - **Intent** — what the sender wants (greeting, question, complaint, ...)
//! - **Sentiment** — five ordered tone levels from a weighted lexicon
//! - **Entities** — `@name` mentions, topic and moderation keywords
//! - **Toxicity** — clean/moderate/severe from profanity and attack tables
//!
//! The [`behavior`] module carries per-user state across messages (decaying
//! toxicity score, spam flags), [`policy`] turns it all into an
//! allow/warn/block decision scaled by the room's safety mode, and
//! [`room`]/[`personality`]/[`respond`] drive the adaptive bot presence
//! that answers when addressed.
//!
//! Everything here is synchronous and deterministic (reply selection takes
//! the RNG as an argument). Concurrency, per-key serialization, and the
//! simulated reply latency live in the `warden-engine` crate.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod behavior;
pub mod classify;
pub mod config;
pub mod entities;
pub mod error;
pub mod intent;
pub mod lexicon;
pub mod normalize;
pub mod personality;
pub mod policy;
pub mod respond;
pub mod room;
pub mod sentiment;
pub mod toxicity;
pub mod types;

pub use behavior::{BehaviorRecord, Observation, SpamReason};
pub use classify::{classify, Classification};
pub use config::EngineConfig;
pub use error::{Result, WardenError};
pub use intent::Intent;
pub use policy::{decide, Action, ModerationDecision, SafetyMode};
pub use room::{Interaction, RoomState};
pub use sentiment::SentimentLevel;
pub use toxicity::Severity;
pub use types::{Personality, RoomId, RoomMood, UserId};
