//! Playback state store - core orchestration
//!
//! Owns the authoritative [`PlayerState`], applies every mutation, keeps
//! queue/pointer/derived fields consistent, and notifies subscribers.
//!
//! Every mutation follows the same path: build the next snapshot from the
//! current one, reconcile derived fields, commit, queue side effects, then
//! notify subscribers synchronously. Operations that turn out to be no-ops
//! (out-of-range index, boundary skip) commit nothing and notify nobody.

use crate::{
    config::PlayerConfig,
    effects::PlayerEffect,
    shuffle::{pinned_index, shuffle_pinned},
    state::PlayerState,
    subscription::{Listener, Subscribers, Subscription},
};
use aria_core::{resolve_auto_quality, AudioQuality, QualitySource, Track};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Whether adopting a track announces it to history/album collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Announce {
    /// Always announce (explicit track or queue selection)
    Always,
    /// Announce only when the track identity changes
    OnChange,
}

/// Next snapshot under construction, plus the effects it will emit
struct Draft {
    next: PlayerState,
    effects: Vec<PlayerEffect>,
}

impl Draft {
    fn new(current: &PlayerState) -> Self {
        Self {
            next: current.clone(),
            effects: Vec::new(),
        }
    }

    /// Make `track` the current track and reconcile the derived fields
    ///
    /// Duration follows the track, the sample rate survives only if the
    /// track id is unchanged, and auto quality is recomputed.
    fn adopt(&mut self, track: Option<Track>, announce: Announce) {
        let previous_id = self.next.current_track.as_ref().map(|t| t.id.as_str());
        let next_id = track.as_ref().map(|t| t.id.as_str());
        let same_identity = previous_id == next_id;

        if !same_identity {
            self.next.sample_rate = None;
        }

        self.next.duration = track.as_ref().map_or(0.0, Track::duration_secs);

        if self.next.quality_source == QualitySource::Auto {
            let derived = resolve_auto_quality(track.as_ref());
            if derived != self.next.quality {
                self.next.quality = derived;
            }
        }

        if let Some(track) = &track {
            if announce == Announce::Always || !same_identity {
                self.effects.extend(PlayerEffect::announce(track));
            }
        }

        self.next.current_track = track;
    }

    /// Point the queue at `index` and adopt that track from the start
    fn jump_to(&mut self, index: usize) {
        let track = self.next.queue[index].clone();
        self.next.queue_index = Some(index);
        self.next.current_time = 0.0;
        self.adopt(Some(track), Announce::OnChange);
    }

    /// Replace the queue and adopt its start track
    fn replace_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        if tracks.is_empty() {
            self.empty_queue();
            return;
        }

        let index = start_index.min(tracks.len() - 1);
        let track = tracks[index].clone();

        self.next.queue = tracks;
        self.next.queue_index = Some(index);
        self.next.is_loading = true;
        self.adopt(Some(track), Announce::Always);
    }

    /// Reset to "nothing queued, nothing playing"
    fn empty_queue(&mut self) {
        self.next.queue.clear();
        self.next.queue_index = None;
        self.adopt(None, Announce::OnChange);
        self.next.is_playing = false;
        self.next.is_loading = false;
        self.next.current_time = 0.0;
        self.next.duration = 0.0;
        self.next.sample_rate = None;
    }
}

/// Playback state store
///
/// Single owner of the player snapshot. Methods take `&mut self`, so there
/// is exactly one writer; use [`PlayerHandle`](crate::PlayerHandle) to share
/// the store across tasks.
pub struct PlaybackStore {
    state: PlayerState,

    subscribers: Subscribers,

    // Effects not yet drained (only used when no sink is attached)
    outbox: Vec<PlayerEffect>,

    effect_sink: Option<mpsc::UnboundedSender<PlayerEffect>>,
}

impl PlaybackStore {
    /// Create a store whose startup snapshot comes from `config`
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            state: PlayerState::from_config(&config),
            subscribers: Subscribers::default(),
            outbox: Vec::new(),
            effect_sink: None,
        }
    }

    /// Forward effects to `sink` as they are committed instead of buffering them
    #[must_use]
    pub fn with_effect_sink(mut self, sink: mpsc::UnboundedSender<PlayerEffect>) -> Self {
        self.attach_effect_sink(sink);
        self
    }

    /// Attach an effect channel; anything already buffered is forwarded first
    pub fn attach_effect_sink(&mut self, sink: mpsc::UnboundedSender<PlayerEffect>) {
        let buffered = std::mem::take(&mut self.outbox);
        self.effect_sink = Some(sink);
        self.emit(buffered);
    }

    // ===== Observation =====

    /// Latest committed snapshot
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Register a listener; it receives the current snapshot immediately
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerState) + Send + 'static,
    {
        self.subscribe_boxed(Box::new(listener))
    }

    pub(crate) fn subscribe_boxed(&mut self, mut listener: Listener) -> Subscription {
        listener(&self.state);
        self.subscribers.add(listener)
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Take every effect buffered since the last drain, oldest first
    pub fn drain_effects(&mut self) -> Vec<PlayerEffect> {
        std::mem::take(&mut self.outbox)
    }

    // ===== Track & Queue =====

    /// Make `track` current without touching the queue
    pub fn set_track(&mut self, track: Track) {
        debug!(track_id = %track.id, "Setting current track");

        let mut draft = Draft::new(&self.state);
        draft.next.is_loading = true;
        draft.adopt(Some(track), Announce::Always);
        self.commit(draft);
    }

    /// Replace the queue and start from `start_index` (clamped)
    ///
    /// An empty `tracks` clears the queue and stops playback.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        debug!(
            queue_len = tracks.len(),
            start_index, "Replacing queue"
        );

        let mut draft = Draft::new(&self.state);
        draft.replace_queue(tracks, start_index);
        self.commit(draft);
    }

    /// Append `track`; on an empty queue, start playing it
    pub fn enqueue(&mut self, track: Track) {
        let mut draft = Draft::new(&self.state);

        if draft.next.queue.is_empty() {
            debug!(track_id = %track.id, "Queue empty; starting playback");
            draft.replace_queue(vec![track], 0);
            draft.next.current_time = 0.0;
            draft.next.is_playing = true;
        } else {
            debug!(track_id = %track.id, "Appending to queue");
            draft.next.queue.push(track);
        }

        self.commit(draft);
    }

    /// Insert `track` right after the current one; on an empty queue, start playing it
    pub fn enqueue_next(&mut self, track: Track) {
        if self.state.queue.is_empty() {
            self.enqueue(track);
            return;
        }

        let mut draft = Draft::new(&self.state);
        let position = draft
            .next
            .queue_index
            .map_or(0, |index| index + 1)
            .min(draft.next.queue.len());

        debug!(track_id = %track.id, position, "Inserting after current track");
        draft.next.queue.insert(position, track);

        if let Some(index) = draft.next.queue_index {
            if position <= index {
                draft.next.queue_index = Some(index + 1);
            }
        }

        self.commit(draft);
    }

    /// Skip to the next queued track; no-op on the last one
    pub fn next(&mut self) {
        match self.state.queue_index {
            Some(index) if index + 1 < self.state.queue.len() => self.jump(index + 1),
            _ => trace!("next() at end of queue; ignoring"),
        }
    }

    /// Go back to the previous queued track; no-op on the first one
    pub fn previous(&mut self) {
        match self.state.queue_index {
            Some(index) if index > 0 => self.jump(index - 1),
            _ => trace!("previous() at start of queue; ignoring"),
        }
    }

    /// Play the queued track at `index`; out-of-range indices are ignored
    pub fn play_at_index(&mut self, index: usize) {
        self.try_play_at_index(index);
    }

    /// Like [`play_at_index`](Self::play_at_index), returning whether anything changed
    pub fn try_play_at_index(&mut self, index: usize) -> bool {
        if index >= self.state.queue.len() {
            trace!(index, "play_at_index out of range; ignoring");
            return false;
        }

        debug!(index, "Playing queue entry");
        let mut draft = Draft::new(&self.state);
        draft.jump_to(index);
        draft.next.is_playing = true;
        draft.next.is_loading = true;
        self.commit(draft);
        true
    }

    /// Remove the queued track at `index`; out-of-range indices are ignored
    pub fn remove_from_queue(&mut self, index: usize) {
        self.try_remove_from_queue(index);
    }

    /// Like [`remove_from_queue`](Self::remove_from_queue), returning whether anything changed
    pub fn try_remove_from_queue(&mut self, index: usize) -> bool {
        if index >= self.state.queue.len() {
            trace!(index, "remove_from_queue out of range; ignoring");
            return false;
        }

        let mut draft = Draft::new(&self.state);
        let removed = draft.next.queue.remove(index);
        debug!(index, track_id = %removed.id, "Removed from queue");

        match draft.next.queue_index {
            Some(current) if index < current => {
                draft.next.queue_index = Some(current - 1);
            }
            Some(current) if index == current => {
                if draft.next.queue.is_empty() {
                    draft.empty_queue();
                } else {
                    let replacement = current.min(draft.next.queue.len() - 1);
                    draft.jump_to(replacement);
                    draft.next.is_loading = true;
                }
            }
            _ => {}
        }

        self.commit(draft);
        true
    }

    /// Move the queued track at `from` to `to`, keeping the current track current
    pub fn move_in_queue(&mut self, from: usize, to: usize) {
        self.try_move_in_queue(from, to);
    }

    /// Like [`move_in_queue`](Self::move_in_queue), returning whether anything changed
    pub fn try_move_in_queue(&mut self, from: usize, to: usize) -> bool {
        let len = self.state.queue.len();
        if from >= len || to >= len || from == to {
            trace!(from, to, "move_in_queue out of range or no-op; ignoring");
            return false;
        }

        let mut draft = Draft::new(&self.state);
        let track = draft.next.queue.remove(from);
        draft.next.queue.insert(to, track);

        if let Some(current) = draft.next.queue_index {
            let moved = if current == from {
                to
            } else if from < current && to >= current {
                current - 1
            } else if from > current && to <= current {
                current + 1
            } else {
                current
            };
            draft.next.queue_index = Some(moved);
        }

        debug!(from, to, "Reordered queue");
        self.commit(draft);
        true
    }

    /// Shuffle the queue, keeping the current track at the head
    pub fn shuffle_queue(&mut self) {
        self.shuffle_queue_with(&mut rand::thread_rng());
    }

    /// Shuffle with a caller-provided random source
    pub fn shuffle_queue_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.state.queue.len() <= 1 {
            trace!("shuffle_queue with <= 1 track; ignoring");
            return;
        }

        let mut draft = Draft::new(&self.state);
        let pinned = pinned_index(
            &draft.next.queue,
            draft.next.current_track.as_ref(),
            draft.next.queue_index,
        );
        shuffle_pinned(&mut draft.next.queue, pinned, rng);

        debug!(
            queue_len = draft.next.queue.len(),
            pinned = ?pinned,
            "Shuffled queue"
        );
        draft.jump_to(0);
        self.commit(draft);
    }

    /// Empty the queue and stop playback
    pub fn clear_queue(&mut self) {
        self.set_queue(Vec::new(), 0);
    }

    // ===== Transport =====

    pub fn play(&mut self) {
        self.update(|state| state.is_playing = true);
    }

    pub fn pause(&mut self) {
        self.update(|state| state.is_playing = false);
    }

    pub fn toggle_play(&mut self) {
        self.update(|state| state.is_playing = !state.is_playing);
    }

    /// Set the playback position; negative or non-finite values become 0
    pub fn set_current_time(&mut self, seconds: f64) {
        let seconds = non_negative(seconds);
        self.update(|state| state.current_time = seconds);
    }

    /// Set the duration reported by the media element
    pub fn set_duration(&mut self, seconds: f64) {
        let seconds = non_negative(seconds);
        self.update(|state| state.duration = seconds);
    }

    /// Record the sample rate the decoder reported for the current track
    pub fn set_sample_rate(&mut self, sample_rate: Option<u32>) {
        self.update(|state| state.sample_rate = sample_rate);
    }

    /// Set volume, clamped to 0.0-1.0; NaN is ignored
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            trace!("set_volume(NaN); ignoring");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.update(|state| state.volume = volume);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.update(|state| state.is_loading = loading);
    }

    // ===== Quality =====

    /// Pin quality manually and persist the choice
    pub fn set_quality(&mut self, quality: AudioQuality) {
        debug!(%quality, "Quality set manually");

        let mut draft = Draft::new(&self.state);
        draft.next.quality = quality;
        draft.next.quality_source = QualitySource::Manual;
        draft
            .effects
            .push(PlayerEffect::QualityPreferenceChanged { quality });
        self.commit(draft);
    }

    /// Switch between automatic and manual quality selection
    ///
    /// Switching to auto recomputes quality from the current track right away;
    /// switching to manual keeps the current value.
    pub fn set_quality_source(&mut self, source: QualitySource) {
        debug!(%source, "Quality source changed");

        let mut draft = Draft::new(&self.state);
        draft.next.quality_source = source;
        if source == QualitySource::Auto {
            draft.next.quality = resolve_auto_quality(draft.next.current_track.as_ref());
        }
        self.commit(draft);
    }

    /// Shorthand for `set_quality_source(QualitySource::Auto)`
    pub fn enable_auto_quality(&mut self) {
        self.set_quality_source(QualitySource::Auto);
    }

    // ===== Lifecycle =====

    /// Restore the fixed initial snapshot
    ///
    /// Startup overrides from [`PlayerConfig`] are not reapplied.
    pub fn reset(&mut self) {
        debug!("Resetting player state");

        let mut draft = Draft::new(&self.state);
        draft.next = PlayerState::default();
        self.commit(draft);
    }

    // ===== Internals =====

    /// Commit a simple field update with no reconciliation
    fn update(&mut self, apply: impl FnOnce(&mut PlayerState)) {
        let mut draft = Draft::new(&self.state);
        apply(&mut draft.next);
        self.commit(draft);
    }

    fn jump(&mut self, index: usize) {
        debug!(index, "Moving to queue entry");
        let mut draft = Draft::new(&self.state);
        draft.jump_to(index);
        self.commit(draft);
    }

    fn commit(&mut self, draft: Draft) {
        let Draft { next, effects } = draft;
        self.state = next;

        trace!(
            queue_len = self.state.queue.len(),
            queue_index = ?self.state.queue_index,
            track_id = ?self.state.current_track_id(),
            "Committed player state"
        );

        self.emit(effects);
        self.subscribers.notify(&self.state);
    }

    fn emit(&mut self, effects: Vec<PlayerEffect>) {
        if effects.is_empty() {
            return;
        }

        match &self.effect_sink {
            Some(sink) => {
                for effect in effects {
                    let kind = effect.kind();
                    if sink.send(effect).is_err() {
                        warn!(effect = kind, "Effect channel closed; dropping effect");
                    }
                }
            }
            None => self.outbox.extend(effects),
        }
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

fn non_negative(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
