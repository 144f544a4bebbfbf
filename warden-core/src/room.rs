//! Per-room state — personality vector, interaction history, FAQ cache,
//! and the anti-repetition ring for reply templates.
//!
//! Every collection here is bounded: history to the configured capacity,
//! the FAQ cache through LRU eviction, the response ring by truncation.
//! Total memory per room is constant regardless of message volume.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::config::RoomConfig;
use crate::intent::Intent;
use crate::personality::adapt;
use crate::sentiment::SentimentLevel;
use crate::types::{Personality, RoomMood, UserId};

/// One classified message, as remembered by the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Who sent it.
    pub user: UserId,
    /// What they wanted.
    pub intent: Intent,
    /// How it read.
    pub sentiment: SentimentLevel,
}

/// Adaptive state for one room, created lazily on its first message.
#[derive(Debug)]
pub struct RoomState {
    /// Current personality vector. Starts at the mood's defaults and
    /// drifts with the room's tone.
    pub personality: Personality,
    mood: RoomMood,
    history: VecDeque<Interaction>,
    history_capacity: usize,
    faq_cache: LruCache<String, String>,
    recent_responses: VecDeque<String>,
    recent_capacity: usize,
}

impl RoomState {
    /// Fresh room state seeded from the room's mood.
    #[must_use]
    pub fn new(mood: RoomMood, config: &RoomConfig) -> Self {
        let faq_capacity =
            NonZeroUsize::new(config.faq_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            personality: Personality::for_mood(mood),
            mood,
            history: VecDeque::with_capacity(config.history_capacity),
            history_capacity: config.history_capacity,
            faq_cache: LruCache::new(faq_capacity),
            recent_responses: VecDeque::with_capacity(config.recent_responses),
            recent_capacity: config.recent_responses,
        }
    }

    /// Re-seed the personality when the room's configured mood changes.
    /// A no-op while the mood stays the same, so adaptation survives.
    pub fn sync_mood(&mut self, mood: RoomMood) {
        if mood != self.mood {
            self.mood = mood;
            self.personality = Personality::for_mood(mood);
        }
    }

    /// Append a classified message to the history (evicting the oldest at
    /// capacity) and let the personality adapt to the updated window.
    pub fn record_interaction(&mut self, interaction: Interaction) {
        self.history.push_back(interaction);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
        adapt(&mut self.personality, self.history.make_contiguous());
    }

    /// Recent interactions, oldest first.
    #[must_use]
    pub fn history(&self) -> &VecDeque<Interaction> {
        &self.history
    }

    /// Look up a previously answered question. Refreshes its LRU slot.
    pub fn cached_answer(&mut self, question: &str) -> Option<String> {
        self.faq_cache.get(&canonical_question(question)).cloned()
    }

    /// Remember the answer given to a question. Evicts the least recently
    /// used entry at capacity.
    pub fn cache_answer(&mut self, question: &str, reply: &str) {
        self.faq_cache.put(canonical_question(question), reply.to_string());
    }

    /// Number of cached questions. Used by capacity tests.
    #[must_use]
    pub fn faq_len(&self) -> usize {
        self.faq_cache.len()
    }

    /// Template keys used recently in this room, newest last.
    #[must_use]
    pub fn recent_responses(&self) -> &VecDeque<String> {
        &self.recent_responses
    }

    /// Push a used template key onto the anti-repetition ring.
    pub fn note_response(&mut self, template_key: &str) {
        self.recent_responses.push_back(template_key.to_string());
        while self.recent_responses.len() > self.recent_capacity {
            self.recent_responses.pop_front();
        }
    }
}

fn canonical_question(raw: &str) -> String {
    raw.trim().to_lowercase()
}
