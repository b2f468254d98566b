//! Single-owner player task
//!
//! Moves a [`PlaybackStore`] onto a tokio task and serializes every mutation
//! through an unbounded command channel, so any number of UI handlers and
//! media-element callbacks can drive one store without locks.

use crate::{
    error::{PlayerError, Result},
    state::PlayerState,
    store::PlaybackStore,
    subscription::{Listener, Subscription},
};
use aria_core::{AudioQuality, QualitySource, Track};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Commands accepted by the player task
pub enum PlayerCommand {
    SetTrack(Track),
    SetQueue {
        tracks: Vec<Track>,
        start_index: usize,
    },
    Enqueue(Track),
    EnqueueNext(Track),
    Next,
    Previous,
    PlayAtIndex(usize),
    RemoveFromQueue(usize),
    MoveInQueue {
        from: usize,
        to: usize,
    },
    ShuffleQueue,
    ClearQueue,
    Play,
    Pause,
    TogglePlay,
    SetCurrentTime(f64),
    SetDuration(f64),
    SetSampleRate(Option<u32>),
    SetVolume(f64),
    SetLoading(bool),
    SetQuality(AudioQuality),
    SetQualitySource(QualitySource),
    Reset,
    /// Reply with the latest committed snapshot
    Snapshot(oneshot::Sender<PlayerState>),
    /// Register a listener and reply with its handle
    Subscribe {
        listener: Listener,
        reply: oneshot::Sender<Subscription>,
    },
}

impl PlayerCommand {
    fn apply(self, store: &mut PlaybackStore) {
        match self {
            PlayerCommand::SetTrack(track) => store.set_track(track),
            PlayerCommand::SetQueue {
                tracks,
                start_index,
            } => store.set_queue(tracks, start_index),
            PlayerCommand::Enqueue(track) => store.enqueue(track),
            PlayerCommand::EnqueueNext(track) => store.enqueue_next(track),
            PlayerCommand::Next => store.next(),
            PlayerCommand::Previous => store.previous(),
            PlayerCommand::PlayAtIndex(index) => store.play_at_index(index),
            PlayerCommand::RemoveFromQueue(index) => store.remove_from_queue(index),
            PlayerCommand::MoveInQueue { from, to } => store.move_in_queue(from, to),
            PlayerCommand::ShuffleQueue => store.shuffle_queue(),
            PlayerCommand::ClearQueue => store.clear_queue(),
            PlayerCommand::Play => store.play(),
            PlayerCommand::Pause => store.pause(),
            PlayerCommand::TogglePlay => store.toggle_play(),
            PlayerCommand::SetCurrentTime(seconds) => store.set_current_time(seconds),
            PlayerCommand::SetDuration(seconds) => store.set_duration(seconds),
            PlayerCommand::SetSampleRate(rate) => store.set_sample_rate(rate),
            PlayerCommand::SetVolume(volume) => store.set_volume(volume),
            PlayerCommand::SetLoading(loading) => store.set_loading(loading),
            PlayerCommand::SetQuality(quality) => store.set_quality(quality),
            PlayerCommand::SetQualitySource(source) => store.set_quality_source(source),
            PlayerCommand::Reset => store.reset(),
            PlayerCommand::Snapshot(reply) => {
                // Requester may have gone away
                let _ = reply.send(store.state().clone());
            }
            PlayerCommand::Subscribe { listener, reply } => {
                let subscription = store.subscribe_boxed(listener);
                if let Err(subscription) = reply.send(subscription) {
                    subscription.unsubscribe();
                }
            }
        }
    }
}

/// Cloneable handle to a player task
#[derive(Clone)]
pub struct PlayerHandle {
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl PlayerHandle {
    /// Move `store` onto a new task
    ///
    /// The task ends when every handle is dropped and returns the store.
    pub fn spawn(mut store: PlaybackStore) -> (Self, JoinHandle<PlaybackStore>) {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<PlayerCommand>();

        let task = tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                command.apply(&mut store);
            }
            debug!("All player handles dropped; player task stopping");
            store
        });

        (Self { command_tx }, task)
    }

    /// Queue a command; dropped with a warning if the task has stopped
    pub fn send(&self, command: PlayerCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("Player task stopped; dropping command");
        }
    }

    pub fn set_track(&self, track: Track) {
        self.send(PlayerCommand::SetTrack(track));
    }

    pub fn set_queue(&self, tracks: Vec<Track>, start_index: usize) {
        self.send(PlayerCommand::SetQueue {
            tracks,
            start_index,
        });
    }

    pub fn enqueue(&self, track: Track) {
        self.send(PlayerCommand::Enqueue(track));
    }

    pub fn enqueue_next(&self, track: Track) {
        self.send(PlayerCommand::EnqueueNext(track));
    }

    pub fn next(&self) {
        self.send(PlayerCommand::Next);
    }

    pub fn previous(&self) {
        self.send(PlayerCommand::Previous);
    }

    pub fn play_at_index(&self, index: usize) {
        self.send(PlayerCommand::PlayAtIndex(index));
    }

    pub fn remove_from_queue(&self, index: usize) {
        self.send(PlayerCommand::RemoveFromQueue(index));
    }

    pub fn move_in_queue(&self, from: usize, to: usize) {
        self.send(PlayerCommand::MoveInQueue { from, to });
    }

    pub fn shuffle_queue(&self) {
        self.send(PlayerCommand::ShuffleQueue);
    }

    pub fn clear_queue(&self) {
        self.send(PlayerCommand::ClearQueue);
    }

    pub fn play(&self) {
        self.send(PlayerCommand::Play);
    }

    pub fn pause(&self) {
        self.send(PlayerCommand::Pause);
    }

    pub fn toggle_play(&self) {
        self.send(PlayerCommand::TogglePlay);
    }

    pub fn set_current_time(&self, seconds: f64) {
        self.send(PlayerCommand::SetCurrentTime(seconds));
    }

    pub fn set_duration(&self, seconds: f64) {
        self.send(PlayerCommand::SetDuration(seconds));
    }

    pub fn set_sample_rate(&self, sample_rate: Option<u32>) {
        self.send(PlayerCommand::SetSampleRate(sample_rate));
    }

    pub fn set_volume(&self, volume: f64) {
        self.send(PlayerCommand::SetVolume(volume));
    }

    pub fn set_loading(&self, loading: bool) {
        self.send(PlayerCommand::SetLoading(loading));
    }

    pub fn set_quality(&self, quality: AudioQuality) {
        self.send(PlayerCommand::SetQuality(quality));
    }

    pub fn set_quality_source(&self, source: QualitySource) {
        self.send(PlayerCommand::SetQualitySource(source));
    }

    pub fn reset(&self) {
        self.send(PlayerCommand::Reset);
    }

    /// Latest snapshot, after every command sent before this call
    pub async fn snapshot(&self) -> Result<PlayerState> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(PlayerCommand::Snapshot(reply))
            .map_err(|_| PlayerError::ChannelClosed)?;
        rx.await.map_err(|_| PlayerError::ChannelClosed)
    }

    /// Register a listener on the player task
    ///
    /// The listener runs on the player task, synchronously with each commit.
    pub async fn subscribe<F>(&self, listener: F) -> Result<Subscription>
    where
        F: FnMut(&PlayerState) + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(PlayerCommand::Subscribe {
                listener: Box::new(listener),
                reply,
            })
            .map_err(|_| PlayerError::ChannelClosed)?;
        rx.await.map_err(|_| PlayerError::ChannelClosed)
    }
}

impl PlaybackStore {
    /// Shorthand for [`PlayerHandle::spawn`]
    pub fn into_handle(self) -> (PlayerHandle, JoinHandle<PlaybackStore>) {
        PlayerHandle::spawn(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), 180.0)
    }

    #[tokio::test]
    async fn commands_apply_in_send_order() {
        let (handle, _task) = PlayerHandle::spawn(PlaybackStore::default());

        handle.set_queue(
            vec![
                create_test_track("a"),
                create_test_track("b"),
                create_test_track("c"),
            ],
            1,
        );
        handle.next();
        handle.next();
        handle.previous();
        handle.set_volume(0.25);

        let state = handle.snapshot().await.unwrap();
        assert_eq!(state.queue_index, Some(1));
        assert_eq!(state.current_track_id(), Some("b"));
        assert_eq!(state.volume, 0.25);
    }

    #[tokio::test]
    async fn subscribers_see_every_commit() {
        let (handle, _task) = PlaybackStore::default().into_handle();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let subscription = handle
            .subscribe(move |state: &PlayerState| sink.lock().unwrap().push(state.is_playing))
            .await
            .unwrap();

        handle.play();
        handle.pause();
        handle.snapshot().await.unwrap();
        subscription.unsubscribe();
        handle.play();
        handle.snapshot().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }

    #[tokio::test]
    async fn task_returns_store_when_handles_drop() {
        let (handle, task) = PlayerHandle::spawn(PlaybackStore::default());
        let other = handle.clone();

        handle.enqueue(create_test_track("a"));
        other.enqueue(create_test_track("b"));
        drop(handle);
        drop(other);

        let store = task.await.unwrap();
        assert_eq!(store.state().queue.len(), 2);
        assert!(store.state().is_playing);
    }
}
