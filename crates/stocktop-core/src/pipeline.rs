//! Hand-off between the background poller and the foreground render loop.
//!
//! One ordered stream of [`Message`]s feeds the single consumer, but the two
//! producers get different semantics: the snapshot slot has capacity 1 with
//! overwrite (a newer snapshot replaces an unread one, so the consumer only
//! ever sees the freshest), while user input queues FIFO and is always
//! delivered in the order typed. Sending never blocks; receiving blocks
//! until something is available.
//!
//! Pending user input drains ahead of the snapshot slot. A deferred snapshot
//! is never lost, only delivered after the keystrokes that beat it.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::snapshot::Snapshot;

/// Messages consumed by the foreground loop.
#[derive(Debug)]
pub enum Message {
    /// Fresh snapshot from the poller.
    Snapshot(Snapshot),
    /// User selected a column (0-based) for sorting.
    SelectColumn(usize),
    /// Repaint without a state change (terminal resize).
    Redraw,
    /// User asked to quit; terminates the foreground loop.
    Quit,
}

struct Inner {
    snapshot: Option<Snapshot>,
    user: VecDeque<Message>,
    senders: usize,
    receiver_alive: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    ready: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

/// Creates a connected sender/receiver pair.
pub fn channel() -> (PipelineTx, PipelineRx) {
    let shared = Arc::new(Shared {
        inner: Mutex::new(Inner {
            snapshot: None,
            user: VecDeque::new(),
            senders: 1,
            receiver_alive: true,
        }),
        ready: Condvar::new(),
    });
    (
        PipelineTx {
            shared: shared.clone(),
        },
        PipelineRx { shared },
    )
}

/// Producer handle; cloneable so the poller and the input thread can share
/// the pipeline.
pub struct PipelineTx {
    shared: Arc<Shared>,
}

impl Clone for PipelineTx {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl Drop for PipelineTx {
    fn drop(&mut self) {
        // A panic inside drop during unwind would abort; skip a poisoned lock.
        let Ok(mut inner) = self.shared.inner.lock() else {
            return;
        };
        inner.senders -= 1;
        if inner.senders == 0 {
            drop(inner);
            self.shared.ready.notify_all();
        }
    }
}

impl PipelineTx {
    /// Hands off a snapshot, replacing any unread one. Returns `false` once
    /// the consumer is gone, so the poller can stop.
    pub fn send_snapshot(&self, snapshot: Snapshot) -> bool {
        let mut inner = self.shared.lock();
        if !inner.receiver_alive {
            return false;
        }
        inner.snapshot = Some(snapshot);
        drop(inner);
        self.shared.ready.notify_one();
        true
    }

    /// Enqueues a message. Snapshots take the overwrite path; everything
    /// else queues in order.
    pub fn send(&self, message: Message) -> bool {
        match message {
            Message::Snapshot(snapshot) => self.send_snapshot(snapshot),
            other => {
                let mut inner = self.shared.lock();
                if !inner.receiver_alive {
                    return false;
                }
                inner.user.push_back(other);
                drop(inner);
                self.shared.ready.notify_one();
                true
            }
        }
    }
}

/// Consumer handle, owned by the foreground loop.
pub struct PipelineRx {
    shared: Arc<Shared>,
}

impl PipelineRx {
    /// Blocks until the next message: queued user input first, then the
    /// snapshot slot. `None` once every sender is gone and nothing is
    /// pending.
    pub fn recv(&self) -> Option<Message> {
        let mut inner = self.shared.lock();
        loop {
            if let Some(message) = inner.user.pop_front() {
                return Some(message);
            }
            if let Some(snapshot) = inner.snapshot.take() {
                return Some(Message::Snapshot(snapshot));
            }
            if inner.senders == 0 {
                return None;
            }
            inner = self.shared.ready.wait(inner).unwrap();
        }
    }
}

impl Drop for PipelineRx {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.inner.lock() {
            inner.receiver_alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn snapshot(symbol: &str) -> Snapshot {
        Snapshot::from_rows(["symbol"], vec![vec![symbol.into()]]).unwrap()
    }

    #[test]
    fn test_fresher_snapshot_overwrites_unread_one() {
        let (tx, rx) = channel();
        assert!(tx.send_snapshot(snapshot("AAPL")));
        assert!(tx.send_snapshot(snapshot("MSFT")));
        drop(tx);

        match rx.recv() {
            Some(Message::Snapshot(s)) => assert_eq!(s, snapshot("MSFT")),
            other => panic!("expected snapshot, got {other:?}"),
        }
        assert!(rx.recv().is_none());
    }

    #[test]
    fn test_user_messages_keep_typed_order() {
        let (tx, rx) = channel();
        assert!(tx.send(Message::SelectColumn(1)));
        assert!(tx.send(Message::SelectColumn(2)));
        assert!(tx.send(Message::Quit));
        drop(tx);

        assert!(matches!(rx.recv(), Some(Message::SelectColumn(1))));
        assert!(matches!(rx.recv(), Some(Message::SelectColumn(2))));
        assert!(matches!(rx.recv(), Some(Message::Quit)));
        assert!(rx.recv().is_none());
    }

    #[test]
    fn test_pending_input_drains_before_snapshot() {
        let (tx, rx) = channel();
        assert!(tx.send_snapshot(snapshot("AAPL")));
        assert!(tx.send(Message::SelectColumn(0)));
        drop(tx);

        assert!(matches!(rx.recv(), Some(Message::SelectColumn(0))));
        assert!(matches!(rx.recv(), Some(Message::Snapshot(_))));
        assert!(rx.recv().is_none());
    }

    #[test]
    fn test_recv_blocks_until_producer_sends() {
        let (tx, rx) = channel();
        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send_snapshot(snapshot("AAPL"));
        });
        assert!(matches!(rx.recv(), Some(Message::Snapshot(_))));
        producer.join().unwrap();
    }

    #[test]
    fn test_send_after_receiver_dropped_reports_disconnect() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.send_snapshot(snapshot("AAPL")));
        assert!(!tx.send(Message::Quit));
    }

    #[test]
    fn test_cloned_senders_all_count() {
        let (tx, rx) = channel();
        let tx2 = tx.clone();
        drop(tx);
        assert!(tx2.send(Message::Redraw));
        drop(tx2);
        assert!(matches!(rx.recv(), Some(Message::Redraw)));
        assert!(rx.recv().is_none());
    }
}
