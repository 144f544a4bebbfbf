//! Event types crossing the engine boundary.
//!
//! The transport collaborator hands the engine an [`InboundMessage`] plus a
//! [`RoomSnapshot`] of the room's current configuration, and gets back a
//! [`MessageOutcome`] immediately. Bot replies arrive later, as
//! [`BotReply`] values on the engine's reply channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::{Classification, ModerationDecision, RoomId, RoomMood, SafetyMode, UserId};

/// One chat message as delivered by the message transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Room the message was posted to.
    pub room: RoomId,
    /// Sender's user id.
    pub sender: UserId,
    /// Sender's display name, used in replies.
    pub sender_name: String,
    /// Raw message text.
    pub text: String,
    /// Transport-assigned arrival time.
    pub timestamp: DateTime<Utc>,
    /// Whether the sender holds moderation privileges.
    pub sender_is_admin: bool,
}

/// The room's current configuration, read from the room-config collaborator
/// at the moment the message arrives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Personality seed for the room's bot presence.
    pub mood: RoomMood,
    /// Strictness row of the policy table.
    pub safety_mode: SafetyMode,
    /// Room-specific rule list. `None` falls back to the engine's
    /// configured default rules.
    #[serde(default)]
    pub rules: Option<Vec<String>>,
}

/// What the engine decided about one message, returned synchronously.
#[derive(Debug, Clone)]
pub struct MessageOutcome {
    /// The full classification, for transport-side logging or display.
    pub classification: Classification,
    /// The decision the transport must honor.
    pub decision: ModerationDecision,
    /// A reply was scheduled and will arrive on the reply channel unless
    /// the room is torn down first.
    pub reply_pending: bool,
}

/// A reply emitted by the bot, attributed to the engine's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    /// Unique id for this reply message.
    pub id: Uuid,
    /// Room the reply is addressed to.
    pub room: RoomId,
    /// Reply text.
    pub text: String,
}
