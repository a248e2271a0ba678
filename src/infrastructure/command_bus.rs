//! In-process command processor.
//!
//! Keeps one event stream per task. Each command is handled while holding a
//! single lock, so commands are applied strictly one after another:
//!
//! 1. replay the target stream into the current [`Task`]
//! 2. [`decide`] the new events
//! 3. hand them to every registered [`TaskEventListener`]
//! 4. append them to the stream
//!
//! Events are only stored once every listener has accepted them. A listener
//! failure leaves the stream untouched, so the command can be sent again.
//! A successful `send_and_wait` means the read model already reflects the
//! command.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::domain::{Task, TaskCommand, TaskEvent, TaskId, decide};
use crate::ports::{CommandError, CommandGateway, TaskEventListener};

pub struct InMemoryCommandBus {
    event_streams: Mutex<HashMap<TaskId, Vec<TaskEvent>>>,
    listeners: Vec<Arc<dyn TaskEventListener>>,
}

impl InMemoryCommandBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_streams: Mutex::new(HashMap::new()),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener that receives every stored event.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn TaskEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    #[cfg(test)]
    async fn events_for(&self, id: &TaskId) -> Vec<TaskEvent> {
        self.event_streams
            .lock()
            .await
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn handle(&self, command: TaskCommand) -> Result<(), CommandError> {
        let mut streams = self.event_streams.lock().await;

        let stream = streams.get(command.id());
        let state = stream.and_then(|events| Task::replay(events));
        let events = decide(state.as_ref(), &command, Utc::now())?;

        if events.is_empty() {
            tracing::debug!(
                command = command.name(),
                task_id = %command.id(),
                "Command produced no events"
            );
            return Ok(());
        }

        for event in &events {
            tracing::debug!(
                event = event.event_type(),
                task_id = %event.id(),
                "Dispatching event"
            );
            for listener in &self.listeners {
                listener
                    .on_event(event)
                    .await
                    .map_err(|error| {
                        tracing::error!(
                            command = command.name(),
                            task_id = %command.id(),
                            %error,
                            "Listener rejected event, command discarded"
                        );
                        CommandError::internal(error.to_string())
                    })?;
            }
        }

        streams
            .entry(command.id().clone())
            .or_default()
            .extend(events);

        Ok(())
    }
}

impl Default for InMemoryCommandBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryCommandBus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("InMemoryCommandBus")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CommandGateway for InMemoryCommandBus {
    fn send_and_wait(&self, command: TaskCommand) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(self.handle(command))
    }
}

// =============================================================================
// Tests
// =============================================================================
