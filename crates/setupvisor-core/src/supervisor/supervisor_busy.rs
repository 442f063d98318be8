//! Busy/free signal published by a shared dependency such as a remote server.
//!
//! [`BusySignal`] wraps a [`tokio::sync::watch`] channel. The owner pushes
//! transitions with [`BusySignal::set_busy`]; a supervisor observes them
//! through a [`BusySubscription`] that lives only as long as one action.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared busy flag. Cloning yields another handle to the same flag.
#[derive(Debug, Clone)]
pub struct BusySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl BusySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Publishes the busy state. Returns false when the state did not change,
    /// in which case subscribers are not woken.
    pub fn set_busy(&self, busy: bool) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == busy {
                return false;
            }
            *current = busy;
            true
        })
    }

    pub fn is_busy(&self) -> bool {
        *self.tx.borrow()
    }

    /// Starts observing transitions published after this call.
    pub fn subscribe(&self) -> BusySubscription {
        BusySubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BusySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`BusySignal`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct BusySubscription {
    rx: watch::Receiver<bool>,
}

impl BusySubscription {
    /// Waits for the next published state. Returns `None` once every
    /// [`BusySignal`] handle has been dropped.
    ///
    /// Only the latest state is kept: a busy/free pair published between
    /// two calls is seen as the final state alone, and a round trip back to
    /// the starting state may not be observed at all.
    ///
    /// Cancel safe.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn is_busy(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn subscription_sees_transitions_after_subscribe() {
        let signal = BusySignal::new();
        assert_eq!(signal.subscriber_count(), 0);

        let mut sub = signal.subscribe();
        assert_eq!(signal.subscriber_count(), 1);
        assert!(!sub.is_busy());

        assert!(signal.set_busy(true));
        assert_eq!(sub.changed().await, Some(true));

        assert!(signal.set_busy(false));
        assert_eq!(sub.changed().await, Some(false));

        drop(sub);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn repeated_state_is_not_published() {
        let signal = BusySignal::new();
        assert!(!signal.set_busy(false));
        assert!(signal.set_busy(true));
        assert!(!signal.set_busy(true));
        assert!(signal.is_busy());
    }

    #[tokio::test]
    async fn changed_ends_when_signal_is_dropped() {
        let signal = BusySignal::new();
        let mut sub = signal.subscribe();
        drop(signal);
        assert_eq!(sub.changed().await, None);
    }

    #[tokio::test]
    async fn burst_between_polls_yields_latest_state() {
        let signal = BusySignal::new();
        let mut sub = signal.subscribe();

        signal.set_busy(true);
        signal.set_busy(false);
        signal.set_busy(true);

        assert_eq!(sub.changed().await, Some(true));
        assert!(sub.is_busy());
        let pending = tokio::time::timeout(Duration::from_millis(10), sub.changed()).await;
        assert!(pending.is_err());
    }

    #[test]
    fn clones_share_one_flag() {
        let signal = BusySignal::new();
        let other = signal.clone();
        other.set_busy(true);
        assert!(signal.is_busy());
        let _sub = signal.subscribe();
        assert_eq!(other.subscriber_count(), 1);
    }
}
