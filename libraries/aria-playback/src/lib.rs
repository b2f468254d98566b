//! Aria Player - Playback State Engine
//!
//! Client-side state engine for a streaming player: the current track, an
//! ordered playback queue, transport flags and quality selection, kept
//! mutually consistent across every user action.
//!
//! This crate provides:
//! - `PlaybackStore`: the single-owner state container and all mutations
//! - Snapshot subscriptions delivered synchronously on every commit
//! - Shuffle that keeps the playing track pinned at the head of the queue
//! - Auto/manual quality resolution and sample-rate continuity
//! - A side-effect outbox (`PlayerEffect`) plus `EffectDispatcher` for the
//!   history, album-visit and quality-preference collaborators
//! - `PlayerHandle`, a command channel for driving one store from many tasks
//!
//! # Architecture
//!
//! `aria-playback` does no I/O on the mutation path:
//! - No audio decoding or output
//! - No network or storage access; collaborators only see effects after commit
//! - Collaborator failures are logged and dropped, never rolled back
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use aria_playback::{PlaybackStore, PlayerConfig};
//! use aria_core::Track;
//!
//! let mut store = PlaybackStore::new(PlayerConfig::default());
//!
//! store.set_queue(
//!     vec![
//!         Track::new("a", "Intro", 95.0),
//!         Track::new("b", "Theme", 240.0),
//!         Track::new("c", "Outro", 120.0),
//!     ],
//!     1,
//! );
//! assert_eq!(store.state().current_track_id(), Some("b"));
//!
//! store.next();
//! store.next(); // already on the last track: no-op
//! assert_eq!(store.state().queue_index, Some(2));
//! ```
//!
//! # Example: Observing and Dispatching Effects
//!
//! ```rust,no_run
//! use aria_playback::{EffectDispatcher, PlaybackStore, PlayerConfig};
//! use tokio::sync::mpsc;
//!
//! # fn run() {
//! let dispatcher = EffectDispatcher::new(); // .with_history(...) etc.
//! let config = PlayerConfig::load().unwrap_or_default();
//!
//! let (effect_tx, effect_rx) = mpsc::unbounded_channel();
//! let _dispatch_task = dispatcher.spawn(effect_rx);
//!
//! let mut store = PlaybackStore::new(config).with_effect_sink(effect_tx);
//! let _subscription = store.subscribe(|state| {
//!     println!("now playing: {:?}", state.current_track_id());
//! });
//! # }
//! ```

mod collab;
mod config;
mod effects;
mod error;
mod handle;
mod shuffle;
mod state;
mod store;
mod subscription;

// Public exports
pub use collab::{AlbumVisits, EffectDispatcher, PlayHistory, QualityPreferences};
pub use crate::config::{PlayerConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use effects::PlayerEffect;
pub use error::{PlayerError, Result};
pub use handle::{PlayerCommand, PlayerHandle};
pub use state::PlayerState;
pub use store::PlaybackStore;
pub use subscription::{Listener, Subscription};
