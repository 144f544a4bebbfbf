//! Moderation policy — allow/warn/block plus the safety-mode table.
//!
//! Each message is decided independently: the accumulated toxicity score
//! lives in [`crate::behavior`], the room's safety mode scales it here.
//! Permissiveness is monotonic across the table: `anything_goes` is the
//! least strict row, `teen_safe` the most strict.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::behavior::Observation;
use crate::toxicity::Severity;
use crate::types::UserId;

/// Room-level strictness setting.
///
/// Supplied by the room configuration; unknown values fall back to
/// [`SafetyMode::Balanced`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMode {
    /// Nearly no scaling, very high block threshold.
    AnythingGoes,
    /// Mildly forgiving.
    SpicyButSane,
    /// Neutral scaling.
    #[default]
    Balanced,
    /// Stricter scaling for support spaces.
    SupportOnly,
    /// Strictest row.
    TeenSafe,
}

impl SafetyMode {
    /// Parse a configuration string, falling back to `Balanced` for
    /// anything unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "anything_goes" => Self::AnythingGoes,
            "spicy_but_sane" => Self::SpicyButSane,
            "support_only" => Self::SupportOnly,
            "teen_safe" => Self::TeenSafe,
            _ => Self::Balanced,
        }
    }

    /// Factor applied to the accumulated toxicity score.
    #[must_use]
    pub fn toxicity_multiplier(self) -> f32 {
        match self {
            Self::AnythingGoes => 0.5,
            Self::SpicyButSane => 0.7,
            Self::Balanced => 1.0,
            Self::SupportOnly => 1.5,
            Self::TeenSafe => 2.0,
        }
    }

    /// Effective score at or above which messages are blocked outright.
    #[must_use]
    pub fn auto_block_threshold(self) -> f32 {
        match self {
            Self::AnythingGoes => 10.0,
            Self::SpicyButSane => 8.0,
            Self::Balanced => 5.0,
            Self::SupportOnly => 3.0,
            Self::TeenSafe => 2.0,
        }
    }
}

/// What the transport must do with the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Deliver normally.
    Allow,
    /// Deliver, but send the caution privately to the sender.
    Warn,
    /// Do not deliver; notify admins.
    Block,
}

/// The outcome of moderating one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationDecision {
    /// Allow, warn, or block.
    pub action: Action,
    /// Private caution for the sender, if any.
    pub user_notice: Option<String>,
    /// Alert text for users with moderation privileges, if any.
    pub admin_alert: Option<String>,
}

impl ModerationDecision {
    /// Whether the message may be broadcast.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.action != Action::Block
    }
}

/// Decide what to do with one message, given its raw severity and the
/// sender's updated behavior observation.
///
/// Block beats warn: a severe message blocks regardless of the score, and
/// an accumulated score at or over the room threshold blocks even a clean
/// message. Spam warnings merge into whatever the toxicity path decided.
#[must_use]
pub fn decide(
    user: UserId,
    severity: Severity,
    observation: &Observation,
    mode: SafetyMode,
) -> ModerationDecision {
    let effective = observation.toxicity_score * mode.toxicity_multiplier();

    let mut decision = if effective >= mode.auto_block_threshold() || severity == Severity::Severe {
        ModerationDecision {
            action: Action::Block,
            user_notice: Some("Your message was blocked for violating room standards.".to_string()),
            admin_alert: Some(format!(
                "Blocked a message from {user} (toxicity score {:.1}).",
                observation.toxicity_score
            )),
        }
    } else if severity == Severity::Moderate {
        ModerationDecision {
            action: Action::Warn,
            user_notice: Some("Please keep it civil.".to_string()),
            admin_alert: None,
        }
    } else {
        ModerationDecision { action: Action::Allow, user_notice: None, admin_alert: None }
    };

    if observation.warn_spam && decision.action == Action::Allow {
        decision.action = Action::Warn;
    }
    if observation.warn_spam && decision.user_notice.is_none() {
        decision.user_notice = Some("Please slow down — repeated or flooding messages are treated as spam.".to_string());
    }
    if observation.alert_spam {
        let alert = format!("{user} keeps spamming ({} flags in the last window).", observation.flags_in_window);
        decision.admin_alert = Some(match decision.admin_alert.take() {
            Some(existing) => format!("{existing} {alert}"),
            None => alert,
        });
    }

    if decision.action != Action::Allow {
        debug!(
            %user,
            ?mode,
            action = ?decision.action,
            score = observation.toxicity_score,
            effective,
            "moderation intervened"
        );
    }

    decision
}
