//! # Warden Engine
//!
//! Async shell around [`warden_core`]: per-key serialized state registries,
//! the one-call-per-message pipeline, reply scheduling with simulated
//! typing latency, and room teardown with reply cancellation.
//!
//! The engine exposes no listener of its own. A message transport calls
//! [`WardenEngine::process`] once per inbound message and honors the
//! returned decision; bot replies arrive on the channel handed out by
//! [`WardenEngine::new`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod event;
pub mod registry;

pub use engine::{StatsSnapshot, WardenEngine};
pub use event::{BotReply, InboundMessage, MessageOutcome, RoomSnapshot};
pub use registry::{RoomRegistry, UserRegistry};
