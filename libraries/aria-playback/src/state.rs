//! Player state snapshot
//!
//! `PlayerState` is what subscribers receive after every commit. The store
//! owns the authoritative copy; everything handed out is a clone or a borrow.

use crate::config::PlayerConfig;
use aria_core::{AudioQuality, QualitySource, Track};
use serde::{Deserialize, Serialize};

/// Snapshot of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Track considered "now playing"
    pub current_track: Option<Track>,

    pub is_playing: bool,
    pub is_loading: bool,

    /// Playback position in seconds
    pub current_time: f64,

    /// Length of the current track in seconds (0 with no track)
    pub duration: f64,

    /// Output volume, 0.0-1.0
    pub volume: f64,

    pub quality: AudioQuality,
    pub quality_source: QualitySource,

    /// Playback queue, in playback order
    pub queue: Vec<Track>,

    /// Index of the current track in `queue`; `None` iff the queue is empty
    pub queue_index: Option<usize>,

    /// Sample rate reported by the decoder for the current track
    pub sample_rate: Option<u32>,
}

impl PlayerState {
    /// Initial snapshot for a configuration
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            is_loading: false,
            current_time: 0.0,
            duration: 0.0,
            volume: config.volume.clamp(0.0, 1.0),
            quality: config.quality,
            quality_source: config.quality_source,
            queue: Vec::new(),
            queue_index: None,
            sample_rate: None,
        }
    }

    /// Queue index with `-1` standing in for "no current index"
    pub fn queue_index_or_sentinel(&self) -> i64 {
        self.queue_index.map_or(-1, |index| index as i64)
    }

    pub fn current_track_id(&self) -> Option<&str> {
        self.current_track.as_ref().map(|track| track.id.as_str())
    }

    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Fraction of the current track played, 0.0-1.0
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 && self.current_time.is_finite() {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether `next()` would move to another track
    pub fn has_next(&self) -> bool {
        self.queue_index
            .is_some_and(|index| index + 1 < self.queue.len())
    }

    /// Whether `previous()` would move to another track
    pub fn has_previous(&self) -> bool {
        self.queue_index.is_some_and(|index| index > 0)
    }

    /// Tracks after the current one
    pub fn upcoming(&self) -> &[Track] {
        match self.queue_index {
            Some(index) if index < self.queue.len() => &self.queue[index + 1..],
            _ => &[],
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}
