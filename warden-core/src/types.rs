//! Core type definitions shared across the moderation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for a chat user, assigned by the message transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Unique identifier for a chat room, assigned by the message transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Room Mood
// ---------------------------------------------------------------------------

/// Room-level mood supplied by the room configuration collaborator.
///
/// Mood shapes the *initial* personality vector of a room's bot presence.
/// It never affects moderation thresholds — those come from the safety mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomMood {
    /// Easy-going general chat.
    Relaxed,
    /// High-energy, jokey rooms.
    Lively,
    /// On-topic, low-banter rooms.
    Serious,
    /// Help and support rooms.
    Supportive,
}

impl RoomMood {
    /// Parse a mood string from room configuration.
    ///
    /// Unknown or missing values fall back to [`RoomMood::Relaxed`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "lively" => Self::Lively,
            "serious" => Self::Serious,
            "supportive" => Self::Supportive,
            _ => Self::Relaxed,
        }
    }
}

impl Default for RoomMood {
    fn default() -> Self {
        Self::Relaxed
    }
}

// ---------------------------------------------------------------------------
// Personality Vector
// ---------------------------------------------------------------------------

/// Adaptive per-room personality parameters. Each axis ranges 0.0–1.0:
///
/// - **helpfulness**: terse answers (0) → goes out of its way to assist (1)
/// - **humor**: dry (0) → playful (1)
/// - **formality**: slang and contractions (0) → stiff and polite (1)
/// - **verbosity**: one-liners (0) → elaborated replies (1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// How eagerly the bot assists (0.0–1.0).
    pub helpfulness: f32,
    /// How playful replies are (0.0–1.0).
    pub humor: f32,
    /// How formal the register is (0.0–1.0).
    pub formality: f32,
    /// How long replies run (0.0–1.0).
    pub verbosity: f32,
}

impl Personality {
    /// Create a personality vector, clamping every axis to [0, 1].
    #[must_use]
    pub fn new(helpfulness: f32, humor: f32, formality: f32, verbosity: f32) -> Self {
        Self {
            helpfulness: helpfulness.clamp(0.0, 1.0),
            humor: humor.clamp(0.0, 1.0),
            formality: formality.clamp(0.0, 1.0),
            verbosity: verbosity.clamp(0.0, 1.0),
        }
    }

    /// Initial personality vector for a room mood.
    #[must_use]
    pub fn for_mood(mood: RoomMood) -> Self {
        match mood {
            RoomMood::Relaxed => Self::new(0.5, 0.5, 0.4, 0.4),
            RoomMood::Lively => Self::new(0.5, 0.7, 0.2, 0.6),
            RoomMood::Serious => Self::new(0.6, 0.2, 0.8, 0.5),
            RoomMood::Supportive => Self::new(0.8, 0.3, 0.6, 0.6),
        }
    }

    /// Nudge a single axis by `delta`, clamping the result to [0, 1].
    pub fn nudge(axis: &mut f32, delta: f32) {
        *axis = (*axis + delta).clamp(0.0, 1.0);
    }

    /// Whether every axis is within [0, 1]. Used by invariant tests.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        in_range(self.helpfulness)
            && in_range(self.humor)
            && in_range(self.formality)
            && in_range(self.verbosity)
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personality_new_clamps() {
        let p = Personality::new(1.5, -0.5, 0.5, 2.0);
        assert!((p.helpfulness - 1.0).abs() < f32::EPSILON);
        assert!(p.humor.abs() < f32::EPSILON);
        assert!(p.is_valid());
    }

    #[test]
    fn mood_defaults_are_valid() {
        for mood in [
            RoomMood::Relaxed,
            RoomMood::Lively,
            RoomMood::Serious,
            RoomMood::Supportive,
        ] {
            assert!(Personality::for_mood(mood).is_valid());
        }
    }

    #[test]
    fn unknown_mood_falls_back_to_relaxed() {
        assert_eq!(RoomMood::parse("chaotic"), RoomMood::Relaxed);
        assert_eq!(RoomMood::parse(""), RoomMood::Relaxed);
        assert_eq!(RoomMood::parse("supportive"), RoomMood::Supportive);
    }

    #[test]
    fn nudge_saturates() {
        let mut v = 0.95;
        Personality::nudge(&mut v, 0.2);
        assert!((v - 1.0).abs() < f32::EPSILON);
        Personality::nudge(&mut v, -5.0);
        assert!(v.abs() < f32::EPSILON);
    }

    #[test]
    fn id_display() {
        assert_eq!(UserId(7).to_string(), "user:7");
        assert_eq!(RoomId(3).to_string(), "room:3");
    }
}
