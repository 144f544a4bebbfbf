//! The moderation engine — one call per inbound message.
//!
//! [`WardenEngine::process`] runs the full pipeline synchronously:
//! classification, per-user behavior update, the moderation decision, and
//! the room-state update. If the bot is addressed and the message is
//! allowed, a reply is rendered immediately (while the room lock is held)
//! and scheduled behind a simulated typing delay on the tokio runtime; it
//! arrives on the reply channel unless the room is torn down first.
//!
//! Lock discipline: the per-user mutex is released before the per-room
//! mutex is taken, and neither is ever held across an await point. The
//! latency sleep happens in a spawned task that re-acquires the room lock
//! only after the wait, so one room's pending reply never stalls another
//! room's pipeline.
//!
//! Processing is infallible by construction — unmatched text classifies to
//! defaults and reply selection falls back to a stock line — so one
//! message can never poison the state another message needs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use warden_core::respond::{fallback_reply, render_reply, RenderedReply};
use warden_core::room::Interaction;
use warden_core::{classify, decide, Action, EngineConfig, RoomId, Severity};

use crate::event::{BotReply, InboundMessage, MessageOutcome, RoomSnapshot};
use crate::registry::{RoomRegistry, UserRegistry};

/// Monotonic counters exposed for health inspection.
#[derive(Debug, Default)]
pub struct EngineStats {
    messages: AtomicU64,
    warned: AtomicU64,
    blocked: AtomicU64,
    replies_sent: AtomicU64,
    replies_cancelled: AtomicU64,
}

/// Point-in-time copy of the engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Messages processed.
    pub messages: u64,
    /// Messages that drew a warning.
    pub warned: u64,
    /// Messages blocked.
    pub blocked: u64,
    /// Replies delivered on the reply channel.
    pub replies_sent: u64,
    /// Replies dropped because their room was torn down.
    pub replies_cancelled: u64,
}

impl EngineStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            messages: self.messages.load(Ordering::Relaxed),
            warned: self.warned.load(Ordering::Relaxed),
            blocked: self.blocked.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            replies_cancelled: self.replies_cancelled.load(Ordering::Relaxed),
        }
    }
}

/// The engine. Shared behind an [`Arc`]; all methods take `&self`.
#[derive(Debug)]
pub struct WardenEngine {
    config: EngineConfig,
    users: UserRegistry,
    rooms: RoomRegistry,
    replies: mpsc::UnboundedSender<BotReply>,
    teardowns: DashMap<RoomId, watch::Sender<bool>>,
    stats: EngineStats,
}

impl WardenEngine {
    /// Build an engine and the channel its bot replies arrive on.
    #[must_use]
    pub fn new(config: EngineConfig) -> (Arc<Self>, mpsc::UnboundedReceiver<BotReply>) {
        let (replies, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Self {
            rooms: RoomRegistry::new(config.room),
            users: UserRegistry::default(),
            replies,
            teardowns: DashMap::new(),
            stats: EngineStats::default(),
            config,
        });
        (engine, rx)
    }

    /// Process one inbound message.
    ///
    /// Returns the decision the transport must honor. Must be called from
    /// within a tokio runtime: pending replies are spawned as tasks.
    pub fn process(self: &Arc<Self>, message: &InboundMessage, snapshot: RoomSnapshot) -> MessageOutcome {
        self.stats.messages.fetch_add(1, Ordering::Relaxed);

        let classification = classify(&message.text);
        debug!(
            sender = %message.sender,
            room = %message.room,
            intent = ?classification.intent,
            sentiment = ?classification.sentiment,
            severity = ?classification.severity,
            "classified"
        );

        let record = self.users.entry(message.sender);
        let observation = record.lock().observe(
            &message.text,
            classification.severity,
            message.timestamp,
            &self.config.decay,
            &self.config.spam,
            &self.config.moderation,
        );

        let decision = decide(message.sender, classification.severity, &observation, snapshot.safety_mode);
        match decision.action {
            Action::Allow => {}
            Action::Warn => {
                self.stats.warned.fetch_add(1, Ordering::Relaxed);
                // Spam warnings were already counted inside observe().
                if classification.severity == Severity::Moderate {
                    record.lock().record_warning();
                }
            }
            Action::Block => {
                self.stats.blocked.fetch_add(1, Ordering::Relaxed);
                info!(
                    sender = %message.sender,
                    room = %message.room,
                    admin = message.sender_is_admin,
                    "message blocked"
                );
            }
        }

        let room_handle = self.rooms.entry(message.room, snapshot.mood);
        let mut scheduled: Option<(RenderedReply, bool)> = None;
        {
            let mut room = room_handle.lock();
            room.sync_mood(snapshot.mood);
            // Blocked messages never reach the room, so they contribute
            // nothing to its tone.
            if decision.is_delivered() {
                room.record_interaction(Interaction {
                    user: message.sender,
                    intent: classification.intent,
                    sentiment: classification.sentiment,
                });
            }
            if decision.action == Action::Allow
                && classification.entities.mentions_name(&self.config.bot.name)
            {
                // Everything the reply needs is read here, before the
                // latency wait, so the lock is free while the bot "types".
                let rules = snapshot.rules.as_deref().unwrap_or(&self.config.bot.rules);
                let cacheable = classification.intent.is_inquiry();
                let mut reply = cacheable
                    .then(|| room.cached_answer(&message.text))
                    .flatten()
                    .map(|text| RenderedReply { template_key: "faq-cache".to_string(), text })
                    .unwrap_or_else(|| {
                        render_reply(
                            &classification,
                            room.personality,
                            &message.sender_name,
                            rules,
                            room.recent_responses(),
                            &mut rand::thread_rng(),
                        )
                    });
                if reply.text.trim().is_empty() {
                    warn!(room = %message.room, key = %reply.template_key, "empty reply, using fallback");
                    reply = fallback_reply();
                }
                scheduled = Some((reply, cacheable));
            }
        }

        let reply_pending = scheduled.is_some();
        if let Some((reply, cacheable)) = scheduled {
            self.schedule_reply(message.room, message.text.clone(), cacheable, reply);
        }

        MessageOutcome { classification, decision, reply_pending }
    }

    /// Tear a room down: drop its state and cancel any pending replies.
    /// Idempotent; tearing down an unknown room is a no-op.
    pub fn teardown_room(&self, room: RoomId) {
        if let Some((_, signal)) = self.teardowns.remove(&room) {
            // Receivers observe either the sent value or the dropped
            // sender; both cancel the pending reply.
            let _ = signal.send(true);
        }
        if self.rooms.remove(room) {
            info!(%room, "room torn down");
        }
    }

    /// Current counter values.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of users with live behavior records.
    #[must_use]
    pub fn tracked_users(&self) -> usize {
        self.users.len()
    }

    /// Number of rooms with live state.
    #[must_use]
    pub fn live_rooms(&self) -> usize {
        self.rooms.len()
    }

    fn teardown_signal(&self, room: RoomId) -> watch::Receiver<bool> {
        self.teardowns
            .entry(room)
            .or_insert_with(|| watch::channel(false).0)
            .subscribe()
    }

    fn schedule_reply(self: &Arc<Self>, room: RoomId, question: String, cacheable: bool, reply: RenderedReply) {
        let mut cancelled = self.teardown_signal(room);
        let min = self.config.bot.latency_min_ms;
        let max = self.config.bot.latency_max_ms.max(min);
        let latency = Duration::from_millis(rand::thread_rng().gen_range(min..=max));
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(latency) => {}
                _ = cancelled.changed() => {
                    engine.stats.replies_cancelled.fetch_add(1, Ordering::Relaxed);
                    debug!(%room, "pending reply dropped");
                    return;
                }
            }
            // The room may have gone away during the wait.
            let Some(handle) = engine.rooms.get(room) else {
                engine.stats.replies_cancelled.fetch_add(1, Ordering::Relaxed);
                debug!(%room, "pending reply dropped");
                return;
            };
            {
                let mut state = handle.lock();
                state.note_response(&reply.template_key);
                if cacheable {
                    state.cache_answer(&question, &reply.text);
                }
            }
            engine.stats.replies_sent.fetch_add(1, Ordering::Relaxed);
            let _ = engine.replies.send(BotReply { id: Uuid::new_v4(), room, text: reply.text });
        });
    }
}
