//! Side effects emitted by committed mutations
//!
//! Mutations never call collaborators directly. They queue `PlayerEffect`s,
//! which are either drained by the caller or forwarded over a channel to an
//! [`EffectDispatcher`](crate::collab::EffectDispatcher).

use aria_core::{AlbumWithArtist, AudioQuality, Track};
use serde::{Deserialize, Serialize};

/// Fire-and-forget notification for an external collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEffect {
    /// A track became current
    TrackPlayed {
        /// The new current track
        track: Track,
    },

    /// The new current track belongs to an album
    AlbumVisited {
        /// Album with artist fields backfilled from the track
        album: AlbumWithArtist,
    },

    /// The user picked a quality manually
    QualityPreferenceChanged {
        /// Quality to persist
        quality: AudioQuality,
    },
}

impl PlayerEffect {
    /// Effects announcing that `track` became current
    pub(crate) fn announce(track: &Track) -> Vec<Self> {
        let mut effects = vec![PlayerEffect::TrackPlayed {
            track: track.clone(),
        }];

        if let Some(album) = track.album_visit() {
            effects.push(PlayerEffect::AlbumVisited { album });
        }

        effects
    }

    /// Short name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerEffect::TrackPlayed { .. } => "track_played",
            PlayerEffect::AlbumVisited { .. } => "album_visited",
            PlayerEffect::QualityPreferenceChanged { .. } => "quality_preference_changed",
        }
    }
}
