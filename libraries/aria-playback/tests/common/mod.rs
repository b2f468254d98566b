//! Shared helpers for aria-playback integration tests

#![allow(dead_code)]

use aria_core::{Album, Artist, QualitySource, Track};
use aria_playback::PlayerState;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness (filter with `RUST_LOG`)
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn create_track(id: &str, duration_secs: f64) -> Track {
    Track::new(id, format!("Track {id}"), duration_secs)
}

pub fn create_album_track(id: &str, album_id: &str) -> Track {
    Track::new(id, format!("Track {id}"), 200.0)
        .with_artist(Artist::new(format!("artist-{id}"), "Artist"))
        .with_album(Album::new(album_id, format!("Album {album_id}")))
}

pub fn ids(state: &PlayerState) -> Vec<&str> {
    state.queue.iter().map(|t| t.id.as_str()).collect()
}

/// Check the invariants every committed snapshot must satisfy
///
/// `detached` is true when the current track was set directly (not from the queue).
pub fn assert_invariants(state: &PlayerState, detached: bool) {
    match state.queue_index {
        None => assert!(state.queue.is_empty(), "index None with non-empty queue"),
        Some(index) => assert!(
            index < state.queue.len(),
            "index {index} out of bounds for queue of {}",
            state.queue.len()
        ),
    }

    if !detached {
        match state.queue_index {
            Some(index) => assert_eq!(
                state.current_track.as_ref().map(|t| &t.id),
                Some(&state.queue[index].id),
                "current track does not match queue[index]"
            ),
            None => assert!(state.current_track.is_none(), "current track without queue"),
        }
    }

    assert!((0.0..=1.0).contains(&state.volume));

    if state.quality_source == QualitySource::Auto {
        assert_eq!(
            state.quality,
            aria_core::resolve_auto_quality(state.current_track.as_ref()),
            "auto quality out of sync with current track"
        );
    }
}

/// Check the invariants that relate a snapshot to the one before it
///
/// Whenever the current track id changes, duration follows the new track and
/// the sample rate is cleared.
pub fn assert_transition(previous: &PlayerState, state: &PlayerState) {
    if previous.current_track_id() == state.current_track_id() {
        return;
    }

    let expected = state.current_track.as_ref().map_or(0.0, Track::duration_secs);
    assert_eq!(
        state.duration, expected,
        "duration does not mirror the new current track"
    );
    assert_eq!(
        state.sample_rate, None,
        "sample rate carried across a track change"
    );
}
