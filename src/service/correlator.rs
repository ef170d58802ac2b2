//! Pending confirmation registry.
//!
//! A handler that needs a follow-up message (a game bot reply, a yes/no answer) registers
//! a predicate for a channel and awaits it with a deadline. Every inbound message is
//! offered to the registry before tracking; the first registration whose channel
//! and predicate match receives the message and is removed. Registrations that pass
//! their deadline are discarded by the waiter itself, by the next `offer`, or by the
//! periodic sweep, whichever comes first.
//!
//! Each gateway event runs in its own task, so an awaiting handler never blocks the
//! delivery of the message it is waiting for.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::time::Instant;

use crate::model::message::InboundMessage;

type Predicate = Box<dyn Fn(&InboundMessage) -> bool + Send + Sync>;

struct PendingConfirmation {
    id: u64,
    channel_id: u64,
    predicate: Predicate,
    deadline: Instant,
    sender: oneshot::Sender<InboundMessage>,
}

impl PendingConfirmation {
    fn is_live(&self, now: Instant) -> bool {
        now < self.deadline && !self.sender.is_closed()
    }
}

/// Handle returned by [`ConfirmationRegistry::register`]; pass it to `wait`.
pub struct PendingHandle {
    id: u64,
    deadline: Instant,
    receiver: oneshot::Receiver<InboundMessage>,
}

#[derive(Clone, Default)]
pub struct ConfirmationRegistry {
    pending: Arc<Mutex<Vec<PendingConfirmation>>>,
    next_id: Arc<AtomicU64>,
}

impl ConfirmationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wait for a message in `channel_id` satisfying `predicate`.
    ///
    /// Registration order is match order: when several registrations accept the same
    /// message, the oldest one receives it.
    pub async fn register<F>(&self, channel_id: u64, timeout: Duration, predicate: F) -> PendingHandle
    where
        F: Fn(&InboundMessage) -> bool + Send + Sync + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let deadline = Instant::now() + timeout;

        self.pending.lock().await.push(PendingConfirmation {
            id,
            channel_id,
            predicate: Box::new(predicate),
            deadline,
            sender,
        });

        PendingHandle {
            id,
            deadline,
            receiver,
        }
    }

    /// Waits for the registration behind `handle` to be satisfied.
    ///
    /// # Returns
    /// - `Some(InboundMessage)` - The matching message
    /// - `None` - Deadline passed first; the registration has been removed
    pub async fn wait(&self, handle: PendingHandle) -> Option<InboundMessage> {
        match tokio::time::timeout_at(handle.deadline, handle.receiver).await {
            Ok(Ok(message)) => Some(message),
            _ => {
                self.pending
                    .lock()
                    .await
                    .retain(|pending| pending.id != handle.id);
                None
            }
        }
    }

    /// Registers and waits in one call.
    pub async fn wait_for<F>(
        &self,
        channel_id: u64,
        timeout: Duration,
        predicate: F,
    ) -> Option<InboundMessage>
    where
        F: Fn(&InboundMessage) -> bool + Send + Sync + 'static,
    {
        let handle = self.register(channel_id, timeout, predicate).await;
        self.wait(handle).await
    }

    /// Offers an inbound message to the outstanding registrations.
    ///
    /// A message satisfies at most one registration.
    ///
    /// # Returns
    /// - `true` - A waiter received the message
    /// - `false` - No live registration matched
    pub async fn offer(&self, message: &InboundMessage) -> bool {
        let mut pending = self.pending.lock().await;
        let now = Instant::now();
        pending.retain(|p| p.is_live(now));

        let Some(index) = pending
            .iter()
            .position(|p| p.channel_id == message.channel_id && (p.predicate)(message))
        else {
            return false;
        };

        let matched = pending.remove(index);
        matched.sender.send(message.clone()).is_ok()
    }

    /// Drops registrations whose deadline has passed.
    ///
    /// # Returns
    /// - `usize` - Number of registrations removed
    pub async fn expire_stale(&self) -> usize {
        let mut pending = self.pending.lock().await;
        let before = pending.len();
        let now = Instant::now();
        pending.retain(|p| p.is_live(now));
        before - pending.len()
    }

    pub async fn outstanding(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(channel_id: u64, author_id: u64, content: &str) -> InboundMessage {
        InboundMessage {
            id: 1,
            guild_id: Some(1),
            channel_id,
            author_id,
            author_name: "someone".to_string(),
            author_is_bot: false,
            content: content.to_string(),
            embed_count: 0,
            author_role_ids: Vec::new(),
        }
    }

    /// Tests delivery of a matching follow-up.
    ///
    /// Verifies that a message offered while a handler waits resolves the wait and
    /// removes the registration.
    ///
    /// Expected: Some(message), no outstanding registrations
    #[tokio::test]
    async fn delivers_matching_message() {
        let registry = ConfirmationRegistry::new();
        let handle = registry
            .register(10, Duration::from_secs(2), |m| m.author_id == 99)
            .await;

        let offered = registry.offer(&message(10, 99, "reply")).await;
        let received = registry.wait(handle).await;

        assert!(offered);
        assert_eq!(received.unwrap().content, "reply");
        assert_eq!(registry.outstanding().await, 0);
    }

    /// Tests the timeout path.
    ///
    /// Expected: None and the registration removed
    #[tokio::test]
    async fn times_out_without_reply() {
        let registry = ConfirmationRegistry::new();

        let received = registry
            .wait_for(10, Duration::from_millis(30), |_| true)
            .await;

        assert!(received.is_none());
        assert_eq!(registry.outstanding().await, 0);
    }

    /// Tests that channel and predicate both gate a match.
    ///
    /// Expected: wrong channel and wrong author are not delivered
    #[tokio::test]
    async fn ignores_other_channels_and_authors() {
        let registry = ConfirmationRegistry::new();
        let _handle = registry
            .register(10, Duration::from_secs(2), |m| m.author_id == 99)
            .await;

        assert!(!registry.offer(&message(11, 99, "other channel")).await);
        assert!(!registry.offer(&message(10, 5, "other author")).await);
        assert_eq!(registry.outstanding().await, 1);
    }

    /// Tests first-registered-first-matched.
    ///
    /// Verifies that one message satisfies only the oldest of two equal registrations.
    ///
    /// Expected: first handle resolves, second still outstanding
    #[tokio::test]
    async fn one_message_satisfies_one_waiter() {
        let registry = ConfirmationRegistry::new();
        let first = registry
            .register(10, Duration::from_secs(2), |_| true)
            .await;
        let _second = registry
            .register(10, Duration::from_secs(2), |_| true)
            .await;

        assert!(registry.offer(&message(10, 99, "reply")).await);

        assert!(registry.wait(first).await.is_some());
        assert_eq!(registry.outstanding().await, 1);
    }

    /// Tests concurrent waits resolved from another task.
    ///
    /// Expected: the spawned waiter receives the message offered afterwards
    #[tokio::test]
    async fn waiter_in_other_task_is_resolved() {
        let registry = ConfirmationRegistry::new();
        let handle = registry
            .register(10, Duration::from_secs(2), |m| m.content == "ok")
            .await;

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.wait(handle).await })
        };
        registry.offer(&message(10, 1, "ok")).await;

        let received = waiter.await.unwrap();
        assert!(received.is_some());
    }

    /// Tests the periodic sweep.
    ///
    /// Expected: expired registration counted and removed
    #[tokio::test]
    async fn sweeps_expired_registrations() {
        let registry = ConfirmationRegistry::new();
        let _handle = registry
            .register(10, Duration::from_millis(10), |_| true)
            .await;

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(registry.expire_stale().await, 1);
        assert!(!registry.offer(&message(10, 1, "late")).await);
    }
}
