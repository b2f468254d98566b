//! Queue shuffle with a pinned head
//!
//! The track that is playing stays at index 0 and everything else is
//! permuted uniformly behind it.

use aria_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick the index of the track to keep at the head of the queue
///
/// Prefers the queue entry whose id matches the current track, then the
/// entry at `queue_index`. A current track that is not in the queue is never
/// injected into it.
pub(crate) fn pinned_index(
    queue: &[Track],
    current: Option<&Track>,
    queue_index: Option<usize>,
) -> Option<usize> {
    current
        .and_then(|track| queue.iter().position(|t| t.id == track.id))
        .or_else(|| queue_index.filter(|&index| index < queue.len()))
}

/// Shuffle `queue` in place, moving the pinned entry (if any) to index 0
pub(crate) fn shuffle_pinned<R: Rng + ?Sized>(
    queue: &mut Vec<Track>,
    pinned: Option<usize>,
    rng: &mut R,
) {
    match pinned {
        Some(index) => {
            let head = queue.remove(index);
            queue.shuffle(rng);
            queue.insert(0, head);
        }
        None => queue.shuffle(rng),
    }
}
