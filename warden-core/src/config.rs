//! Configuration for the warden engine.
//!
//! Maps directly to `warden.toml`. Every field has a serde default so a
//! partial (or empty) file yields a fully working configuration.

use serde::{Deserialize, Serialize};

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Identity and reply behavior of the bot.
    #[serde(default)]
    pub bot: BotConfig,
    /// Toxicity score decay.
    #[serde(default)]
    pub decay: DecayConfig,
    /// Spam detection thresholds.
    #[serde(default)]
    pub spam: SpamConfig,
    /// Per-message toxicity penalties.
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Room state capacities.
    #[serde(default)]
    pub room: RoomConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `WardenError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::WardenError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Bot identity and reply pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Mention name the bot answers to (matched against `@name` tokens).
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Lower bound of the simulated reply latency, milliseconds.
    #[serde(default = "default_latency_min")]
    pub latency_min_ms: u64,
    /// Upper bound of the simulated reply latency, milliseconds.
    #[serde(default = "default_latency_max")]
    pub latency_max_ms: u64,
    /// Default room rules, enumerated verbatim when someone asks for them.
    /// Rooms may override this list via their room profile.
    #[serde(default = "default_rules")]
    pub rules: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            latency_min_ms: default_latency_min(),
            latency_max_ms: default_latency_max(),
            rules: default_rules(),
        }
    }
}

/// Linear toxicity decay applied before each message is scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Idle time (seconds) before decay kicks in.
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_secs: u64,
    /// Score units removed per idle minute once the threshold is passed.
    #[serde(default = "default_decay_per_minute")]
    pub rate_per_minute: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            idle_threshold_secs: default_idle_threshold(),
            rate_per_minute: default_decay_per_minute(),
        }
    }
}

/// Spam detection rules and escalation thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpamConfig {
    /// How many recent raw texts are kept per user for repeat detection.
    #[serde(default = "default_repeat_window")]
    pub repeat_window: usize,
    /// Minimum message length (chars) before the caps rule applies.
    #[serde(default = "default_caps_min_len")]
    pub caps_min_len: usize,
    /// Uppercase ratio (among alphabetic chars) above which a message flags.
    #[serde(default = "default_caps_ratio")]
    pub caps_ratio: f32,
    /// A run of `?`/`!` longer than this flags the message.
    #[serde(default = "default_max_punct_run")]
    pub max_punct_run: usize,
    /// Messages arriving closer together than this count as "fast".
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: i64,
    /// Consecutive fast arrivals needed to flag for flooding.
    #[serde(default = "default_fast_streak")]
    pub fast_streak: u32,
    /// Rolling window (seconds) over which spam flags accumulate.
    #[serde(default = "default_flag_window")]
    pub flag_window_secs: u64,
    /// Accumulated flags in the window that trigger a user warning.
    #[serde(default = "default_warn_after")]
    pub warn_after_flags: u32,
    /// Accumulated flags in the window that trigger an admin notification.
    #[serde(default = "default_alert_after")]
    pub alert_after_flags: u32,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            repeat_window: default_repeat_window(),
            caps_min_len: default_caps_min_len(),
            caps_ratio: default_caps_ratio(),
            max_punct_run: default_max_punct_run(),
            min_interval_ms: default_min_interval_ms(),
            fast_streak: default_fast_streak(),
            flag_window_secs: default_flag_window(),
            warn_after_flags: default_warn_after(),
            alert_after_flags: default_alert_after(),
        }
    }
}

/// Toxicity score penalties per message severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Score added for a moderate message.
    #[serde(default = "default_moderate_penalty")]
    pub moderate_penalty: f32,
    /// Score added for a severe message.
    #[serde(default = "default_severe_penalty")]
    pub severe_penalty: f32,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            moderate_penalty: default_moderate_penalty(),
            severe_penalty: default_severe_penalty(),
        }
    }
}

/// Bounded capacities of per-room state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Recent classified interactions kept per room.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Frequently-seen questions kept per room (LRU).
    #[serde(default = "default_faq_capacity")]
    pub faq_capacity: usize,
    /// Recently used reply templates excluded from re-selection.
    #[serde(default = "default_recent_responses")]
    pub recent_responses: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            faq_capacity: default_faq_capacity(),
            recent_responses: default_recent_responses(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_bot_name() -> String {
    "bot".to_string()
}
fn default_latency_min() -> u64 {
    500
}
fn default_latency_max() -> u64 {
    2000
}
fn default_rules() -> Vec<String> {
    vec![
        "Be respectful to other members.".to_string(),
        "No spam or flooding.".to_string(),
        "Keep content appropriate for this room's safety mode.".to_string(),
        "Follow the moderators' instructions.".to_string(),
    ]
}
fn default_idle_threshold() -> u64 {
    300
}
fn default_decay_per_minute() -> f32 {
    0.2
}
fn default_repeat_window() -> usize {
    5
}
fn default_caps_min_len() -> usize {
    10
}
fn default_caps_ratio() -> f32 {
    0.7
}
fn default_max_punct_run() -> usize {
    3
}
fn default_min_interval_ms() -> i64 {
    1000
}
fn default_fast_streak() -> u32 {
    3
}
fn default_flag_window() -> u64 {
    120
}
// The repeat rule cannot fire on a user's first message, so two flags in
// the window means the third identical occurrence: warn on the 3rd message,
// notify admins on the 5th.
fn default_warn_after() -> u32 {
    2
}
fn default_alert_after() -> u32 {
    4
}
fn default_moderate_penalty() -> f32 {
    1.0
}
fn default_severe_penalty() -> f32 {
    2.5
}
fn default_history_capacity() -> usize {
    10
}
fn default_faq_capacity() -> usize {
    20
}
fn default_recent_responses() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml("").expect("empty toml");
        assert_eq!(config.bot.name, "bot");
        assert_eq!(config.spam.repeat_window, 5);
        assert_eq!(config.room.history_capacity, 10);
        assert_eq!(config.room.faq_capacity, 20);
        assert!((config.decay.rate_per_minute - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = EngineConfig::from_toml(
            r#"
            [bot]
            name = "warden"

            [spam]
            warn_after_flags = 3
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.bot.name, "warden");
        assert_eq!(config.spam.warn_after_flags, 3);
        // Untouched fields keep defaults.
        assert_eq!(config.spam.alert_after_flags, 4);
        assert_eq!(config.bot.latency_min_ms, 500);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = EngineConfig::from_toml("bot = {").unwrap_err();
        assert!(matches!(err, crate::WardenError::Config(_)));
    }

    #[test]
    fn default_rules_are_ordered() {
        let config = EngineConfig::default();
        assert!(config.bot.rules.len() >= 2);
        assert!(config.bot.rules[0].contains("respectful"));
    }
}
