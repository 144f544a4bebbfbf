//! Per-user behavior tracking — toxicity accumulation, decay, spam detection.
//!
//! One [`BehaviorRecord`] per user holds everything the policy needs that
//! outlives a single message: the accumulated toxicity score, spam flag
//! history, and arrival timing. Records are updated through
//! [`BehaviorRecord::observe`], which runs the full sequence for one
//! message: decay first, then spam rules, then the toxicity penalty.
//!
//! Decay is lazy. Nothing ticks in the background; the idle gap is settled
//! when the user's next message arrives.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{DecayConfig, ModerationConfig, SpamConfig};
use crate::toxicity::Severity;

/// Why a message was flagged as spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamReason {
    /// Identical to an earlier message in the repeat window.
    Repeat,
    /// Mostly uppercase (shouting).
    Caps,
    /// A long run of `?`/`!`.
    PunctuationRun,
    /// Several messages in rapid succession.
    Flooding,
}

/// What one message did to a user's record.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    /// Spam rules this message tripped. Empty means clean.
    pub spam_reasons: Vec<SpamReason>,
    /// Accumulated flags inside the rolling window, after this message.
    pub flags_in_window: u32,
    /// The flag count crossed the warning threshold.
    pub warn_spam: bool,
    /// The flag count crossed the admin-alert threshold.
    pub alert_spam: bool,
    /// Toxicity score after decay and this message's penalty.
    pub toxicity_score: f32,
}

impl Observation {
    /// Whether any spam rule fired on this message.
    #[must_use]
    pub fn is_spam(&self) -> bool {
        !self.spam_reasons.is_empty()
    }
}

/// Rolling behavior state for one user.
///
/// Created lazily on the user's first message via `Default`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorRecord {
    /// Total messages observed.
    pub message_count: u64,
    /// Accumulated toxicity score, never negative.
    pub toxicity_score: f32,
    /// Total messages flagged as spam.
    pub spam_count: u32,
    /// Warnings issued to this user (toxicity or spam).
    pub warning_count: u32,
    /// When the previous message arrived. `None` before the first.
    pub last_message_at: Option<DateTime<Utc>>,
    /// Last few raw texts, for the repeat rule. Newest at the back.
    recent_texts: VecDeque<String>,
    /// Timestamps of recent spam flags, pruned to the rolling window.
    flag_times: VecDeque<DateTime<Utc>>,
    /// Consecutive fast inter-arrivals ending at the last message.
    fast_streak: u32,
}

impl BehaviorRecord {
    /// Settle decay, run the spam rules, and apply the toxicity penalty for
    /// one message arriving at `now`.
    pub fn observe(
        &mut self,
        raw: &str,
        severity: Severity,
        now: DateTime<Utc>,
        decay: &DecayConfig,
        spam: &SpamConfig,
        moderation: &ModerationConfig,
    ) -> Observation {
        self.apply_decay(now, decay);

        let mut reasons = Vec::new();
        if self.is_fast_arrival(now, spam) {
            reasons.push(SpamReason::Flooding);
        }
        if self.is_repeat(raw, spam) {
            reasons.push(SpamReason::Repeat);
        }
        if is_shouting(raw, spam) {
            reasons.push(SpamReason::Caps);
        }
        if has_punctuation_run(raw, spam) {
            reasons.push(SpamReason::PunctuationRun);
        }

        // One flag per message no matter how many rules fired.
        if !reasons.is_empty() {
            self.spam_count += 1;
            self.flag_times.push_back(now);
        }
        self.prune_flags(now, spam);
        let flags = u32::try_from(self.flag_times.len()).unwrap_or(u32::MAX);

        let warn_spam = !reasons.is_empty() && flags >= spam.warn_after_flags;
        let alert_spam = !reasons.is_empty() && flags >= spam.alert_after_flags;
        if warn_spam {
            self.warning_count += 1;
        }

        match severity {
            Severity::Clean => {}
            Severity::Moderate => self.toxicity_score += moderation.moderate_penalty,
            Severity::Severe => self.toxicity_score += moderation.severe_penalty,
        }

        self.remember_text(raw, spam);
        self.message_count += 1;
        self.last_message_at = Some(now);

        Observation {
            spam_reasons: reasons,
            flags_in_window: flags,
            warn_spam,
            alert_spam,
            toxicity_score: self.toxicity_score,
        }
    }

    /// Record a warning issued for reasons outside the spam rules
    /// (the policy calls this for toxicity warnings).
    pub fn record_warning(&mut self) {
        self.warning_count += 1;
    }

    // -----------------------------------------------------------------------
    // Decay
    // -----------------------------------------------------------------------

    /// Linear decay over the full idle span, once the idle threshold has
    /// been passed. Idempotent for a fixed `now`: the second call sees a
    /// zero-length gap.
    fn apply_decay(&mut self, now: DateTime<Utc>, decay: &DecayConfig) {
        let Some(last) = self.last_message_at else {
            return;
        };
        let idle = now.signed_duration_since(last);
        if idle <= clamped_seconds(decay.idle_threshold_secs) {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let idle_minutes = idle.num_milliseconds() as f32 / 60_000.0;
        self.toxicity_score = (self.toxicity_score - decay.rate_per_minute * idle_minutes).max(0.0);
    }

    // -----------------------------------------------------------------------
    // Spam rules
    // -----------------------------------------------------------------------

    /// Flooding: the inter-arrival gap stayed under the minimum for enough
    /// consecutive messages. Updates the streak as a side effect.
    fn is_fast_arrival(&mut self, now: DateTime<Utc>, spam: &SpamConfig) -> bool {
        let fast = self
            .last_message_at
            .is_some_and(|last| now.signed_duration_since(last).num_milliseconds() < spam.min_interval_ms);
        if fast {
            self.fast_streak += 1;
        } else {
            self.fast_streak = 0;
        }
        self.fast_streak >= spam.fast_streak
    }

    /// Repeat: the same text (case-insensitive, trimmed) already appears in
    /// the recent window. The current message counts as the second copy.
    fn is_repeat(&self, raw: &str, spam: &SpamConfig) -> bool {
        let needle = canonical_text(raw);
        if needle.is_empty() {
            return false;
        }
        self.recent_texts
            .iter()
            .rev()
            .take(spam.repeat_window.saturating_sub(1))
            .any(|prev| *prev == needle)
    }

    fn remember_text(&mut self, raw: &str, spam: &SpamConfig) {
        self.recent_texts.push_back(canonical_text(raw));
        while self.recent_texts.len() > spam.repeat_window {
            self.recent_texts.pop_front();
        }
    }

    fn prune_flags(&mut self, now: DateTime<Utc>, spam: &SpamConfig) {
        let window = clamped_seconds(spam.flag_window_secs);
        while let Some(oldest) = self.flag_times.front() {
            if now.signed_duration_since(*oldest) > window {
                self.flag_times.pop_front();
            } else {
                break;
            }
        }
    }
}

fn canonical_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// chrono::Duration::seconds panics outside ±i64::MAX/1000.
fn clamped_seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX).min(i64::MAX / 1_000))
}

/// Shouting: mostly uppercase among the alphabetic characters, on messages
/// long enough for the ratio to mean anything.
fn is_shouting(raw: &str, spam: &SpamConfig) -> bool {
    if raw.chars().count() <= spam.caps_min_len {
        return false;
    }
    let alphabetic: Vec<char> = raw.chars().filter(|c| c.is_alphabetic()).collect();
    if alphabetic.is_empty() {
        return false;
    }
    let upper = alphabetic.iter().filter(|c| c.is_uppercase()).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = upper as f32 / alphabetic.len() as f32;
    ratio > spam.caps_ratio
}

/// Excessive punctuation: a run of `?`/`!` longer than the configured limit.
fn has_punctuation_run(raw: &str, spam: &SpamConfig) -> bool {
    let mut run = 0usize;
    for c in raw.chars() {
        if c == '?' || c == '!' {
            run += 1;
            if run > spam.max_punct_run {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
