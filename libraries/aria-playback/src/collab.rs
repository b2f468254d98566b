//! External collaborators and the effect dispatcher
//!
//! Collaborators are best-effort: every failure is logged and dropped, and
//! nothing here can affect a snapshot that has already been committed.

use crate::effects::PlayerEffect;
use crate::error::Result;
use aria_core::{AlbumWithArtist, AudioQuality, Track};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Receives a notification whenever a track becomes current
#[async_trait]
pub trait PlayHistory: Send + Sync {
    async fn notify_played(&self, track: &Track) -> Result<()>;
}

/// Receives a notification whenever the current track carries album metadata
#[async_trait]
pub trait AlbumVisits: Send + Sync {
    async fn notify_album_visited(&self, album: &AlbumWithArtist) -> Result<()>;
}

/// Durable storage for the manual quality choice
#[async_trait]
pub trait QualityPreferences: Send + Sync {
    /// Read the stored preference, if any
    async fn load(&self) -> Result<Option<AudioQuality>>;

    /// Persist a new preference
    async fn write(&self, quality: AudioQuality) -> Result<()>;
}

/// Routes [`PlayerEffect`]s to whichever collaborators are configured
///
/// Missing collaborators simply drop their effects.
#[derive(Clone, Default)]
pub struct EffectDispatcher {
    history: Option<Arc<dyn PlayHistory>>,
    albums: Option<Arc<dyn AlbumVisits>>,
    preferences: Option<Arc<dyn QualityPreferences>>,
}

impl EffectDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn PlayHistory>) -> Self {
        self.history = Some(history);
        self
    }

    #[must_use]
    pub fn with_album_visits(mut self, albums: Arc<dyn AlbumVisits>) -> Self {
        self.albums = Some(albums);
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, preferences: Arc<dyn QualityPreferences>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Read the persisted quality preference once, at startup
    ///
    /// Returns `None` when no preference store is configured, nothing is
    /// stored, or the read fails.
    pub async fn load_preferred_quality(&self) -> Option<AudioQuality> {
        let preferences = self.preferences.as_ref()?;

        match preferences.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to load quality preference");
                None
            }
        }
    }

    /// Deliver one effect; failures are logged, never returned
    pub async fn dispatch(&self, effect: &PlayerEffect) {
        let result = match effect {
            PlayerEffect::TrackPlayed { track } => match &self.history {
                Some(history) => history.notify_played(track).await,
                None => Ok(()),
            },
            PlayerEffect::AlbumVisited { album } => match &self.albums {
                Some(albums) => albums.notify_album_visited(album).await,
                None => Ok(()),
            },
            PlayerEffect::QualityPreferenceChanged { quality } => match &self.preferences {
                Some(preferences) => preferences.write(*quality).await,
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            warn!(effect = effect.kind(), error = %e, "Collaborator call failed; dropping effect");
        }
    }

    /// Deliver a batch of effects in order
    pub async fn dispatch_all(&self, effects: impl IntoIterator<Item = PlayerEffect>) {
        for effect in effects {
            self.dispatch(&effect).await;
        }
    }

    /// Drain `rx` on a background task until every sender is dropped
    pub fn spawn(self, mut rx: mpsc::UnboundedReceiver<PlayerEffect>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(effect) = rx.recv().await {
                self.dispatch(&effect).await;
            }
            debug!("Effect channel closed; dispatcher stopping");
        })
    }
}
