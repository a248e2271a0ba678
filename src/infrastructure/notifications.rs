//! Per-user notification queues.
//!
//! Messages sent through [`NotificationChannel`] stay queued until the user
//! collects them through [`NotificationInbox`]. Each queue holds at most
//! `capacity` messages; the oldest one is dropped to make room.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::ports::{Notification, NotificationChannel, NotificationError, NotificationInbox};

#[derive(Debug)]
pub struct InMemoryNotificationChannel {
    queues: RwLock<HashMap<String, VecDeque<Notification>>>,
    capacity: usize,
}

impl InMemoryNotificationChannel {
    pub const DEFAULT_CAPACITY: usize = 100;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Keeps at most `capacity` messages per user. A capacity of zero is
    /// treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel for InMemoryNotificationChannel {
    fn send_to_user<'a>(
        &'a self,
        user: &'a str,
        destination: &'a str,
        message: String,
    ) -> BoxFuture<'a, Result<(), NotificationError>> {
        Box::pin(async move {
            let notification = Notification {
                destination: destination.to_string(),
                message,
                sent_at: Utc::now(),
            };
            let mut queues = self.queues.write().await;
            let queue = queues.entry(user.to_string()).or_default();
            while queue.len() >= self.capacity {
                if let Some(dropped) = queue.pop_front() {
                    tracing::debug!(
                        user,
                        destination = %dropped.destination,
                        "Notification queue full, dropping oldest message"
                    );
                }
            }
            queue.push_back(notification);
            drop(queues);

            tracing::debug!(user, destination, "Notification queued");
            Ok(())
        })
    }
}

impl NotificationInbox for InMemoryNotificationChannel {
    fn drain<'a>(&'a self, user: &'a str) -> BoxFuture<'a, Vec<Notification>> {
        Box::pin(async move {
            self.queues
                .write()
                .await
                .remove(user)
                .map(Vec::from)
                .unwrap_or_default()
        })
    }
}
