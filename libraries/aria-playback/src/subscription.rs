//! Snapshot subscribers
//!
//! Listeners run synchronously, in subscription order, on every commit.

use crate::state::PlayerState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback receiving each committed snapshot
pub type Listener = Box<dyn FnMut(&PlayerState) + Send>;

struct Entry {
    active: Arc<AtomicBool>,
    listener: Listener,
}

/// Registry of snapshot listeners
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push(Entry {
            active: Arc::clone(&active),
            listener,
        });

        Subscription { id, active }
    }

    pub(crate) fn notify(&mut self, state: &PlayerState) {
        self.entries
            .retain(|entry| entry.active.load(Ordering::Acquire));

        for entry in &mut self.entries {
            (entry.listener)(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.active.load(Ordering::Acquire))
            .count()
    }
}

/// Handle returned by `subscribe`
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to stop delivery.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stop delivering snapshots to this listener
    pub fn unsubscribe(self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn notifies_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            subscribers.add(Box::new(move |_| log.lock().unwrap().push(name)));
        }

        subscribers.notify(&PlayerState::default());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_listener_is_skipped_and_pruned() {
        let count = Arc::new(Mutex::new(0));
        let mut subscribers = Subscribers::default();

        let counter = Arc::clone(&count);
        let subscription = subscribers.add(Box::new(move |_| *counter.lock().unwrap() += 1));
        subscribers.add(Box::new(|_| {}));
        assert_eq!(subscribers.len(), 2);

        subscribers.notify(&PlayerState::default());
        assert!(subscription.is_active());
        subscription.unsubscribe();
        subscribers.notify(&PlayerState::default());

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(subscribers.len(), 1);
        assert_eq!(subscribers.entries.len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let mut subscribers = Subscribers::default();
        let a = subscribers.add(Box::new(|_| {}));
        let b = subscribers.add(Box::new(|_| {}));
        assert_ne!(a.id(), b.id());
    }
}
