//! Sharded per-key registries for user and room state.
//!
//! Concurrent messages for the *same* user or room must serialize their
//! mutations; messages for different keys must not contend. Each key maps
//! to its own `Arc<Mutex<_>>` inside a `DashMap` shard, so the map itself
//! is only touched to look the handle up — the per-key mutex is the only
//! serialization point.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use warden_core::{BehaviorRecord, RoomMood, RoomState, UserId};
use warden_core::config::RoomConfig;
use warden_core::types::RoomId;

/// Per-user behavior records, created lazily on first message.
///
/// Records live for the process lifetime; memory stays `O(active users)`
/// because each record's collections are bounded.
#[derive(Debug, Default)]
pub struct UserRegistry {
    records: DashMap<UserId, Arc<Mutex<BehaviorRecord>>>,
}

impl UserRegistry {
    /// Handle to a user's record, creating it on first sight.
    pub fn entry(&self, user: UserId) -> Arc<Mutex<BehaviorRecord>> {
        self.records.entry(user).or_default().clone()
    }

    /// Number of users observed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no user has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-room adaptive state, created lazily on the room's first message and
/// dropped when the room is torn down.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<Mutex<RoomState>>>,
    config: RoomConfig,
}

impl RoomRegistry {
    /// Registry with the given room capacities.
    #[must_use]
    pub fn new(config: RoomConfig) -> Self {
        Self { rooms: DashMap::new(), config }
    }

    /// Handle to a room's state, creating it with the given mood on first
    /// sight.
    pub fn entry(&self, room: RoomId, mood: RoomMood) -> Arc<Mutex<RoomState>> {
        self.rooms
            .entry(room)
            .or_insert_with(|| Arc::new(Mutex::new(RoomState::new(mood, &self.config))))
            .clone()
    }

    /// Handle to a room's state if the room is still live. Used by reply
    /// tasks, which must not resurrect a torn-down room.
    #[must_use]
    pub fn get(&self, room: RoomId) -> Option<Arc<Mutex<RoomState>>> {
        self.rooms.get(&room).map(|entry| entry.clone())
    }

    /// Drop a room's state. Returns whether the room existed.
    pub fn remove(&self, room: RoomId) -> bool {
        self.rooms.remove(&room).is_some()
    }

    /// Number of live rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
