//! Collaborator interfaces.
//!
//! The HTTP gateway only talks to the outside world through the traits in
//! this module. Each one is object safe so that [`AppState`] can hold it as
//! `Arc<dyn _>` and tests can substitute doubles. Asynchronous operations
//! return a boxed future.
//!
//! | Trait | Role |
//! |-------|------|
//! | [`CommandGateway`] | submits a command and waits until it is applied |
//! | [`TaskEventListener`] | receives events after the processor stored them |
//! | [`TaskEntryRepository`] | read-model storage and queries |
//! | [`IdentifierFactory`] | hands out fresh task identifiers |
//! | [`NotificationChannel`] | delivers a message to one user |
//! | [`NotificationInbox`] | hands a user's pending messages back out |
//!
//! [`AppState`]: crate::api::AppState

pub mod pagination;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{DomainError, TaskCommand, TaskEntry, TaskEvent, TaskId};

pub use pagination::{Page, PageRequest};

// =============================================================================
// Errors
// =============================================================================

/// Failure reported by the command processor for one command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command targets a task that does not exist.
    #[error("Task [ identifier = {identifier} ] does not exist.")]
    NotFound { identifier: TaskId },

    /// A business rule refused the command.
    #[error("{message}")]
    Rejected { message: String },

    /// The processor could not be reached or is shutting down.
    #[error("Command processor unavailable: {message}")]
    Unavailable { message: String },

    /// Anything else that went wrong while applying the command.
    #[error("Command processing failed: {message}")]
    Internal { message: String },
}

impl CommandError {
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound(identifier) => Self::NotFound { identifier },
            other @ (DomainError::AlreadyExists(_) | DomainError::AlreadyCompleted(_)) => {
                Self::rejected(other.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

// =============================================================================
// Command side
// =============================================================================

/// Forwards commands to the command processor.
pub trait CommandGateway: Send + Sync {
    /// Submits `command` and resolves once the processor has fully applied
    /// it, or with the reason it was not applied.
    fn send_and_wait(&self, command: TaskCommand) -> BoxFuture<'_, Result<(), CommandError>>;
}

/// Subscriber to the events the command processor stores.
pub trait TaskEventListener: Send + Sync {
    fn on_event<'a>(&'a self, event: &'a TaskEvent) -> BoxFuture<'a, Result<(), RepositoryError>>;
}

/// Process-wide source of task identifiers.
///
/// Implementations must never return the same identifier twice, including
/// under concurrent calls.
pub trait IdentifierFactory: Send + Sync {
    fn generate_identifier(&self) -> TaskId;
}

// =============================================================================
// Query side
// =============================================================================

pub trait TaskEntryRepository: Send + Sync {
    fn find_by_id<'a>(
        &'a self,
        id: &'a TaskId,
    ) -> BoxFuture<'a, Result<Option<TaskEntry>, RepositoryError>>;

    /// Inserts or replaces the entry with the same identifier.
    fn save(&self, entry: TaskEntry) -> BoxFuture<'_, Result<(), RepositoryError>>;

    /// Returns the entries owned by `username` whose completed flag equals
    /// `completed`, oldest first.
    fn find_by_username_and_completed<'a>(
        &'a self,
        username: &'a str,
        completed: bool,
        page: PageRequest,
    ) -> BoxFuture<'a, Result<Page<TaskEntry>, RepositoryError>>;
}

// =============================================================================
// Notifications
// =============================================================================

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub destination: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Private, per-user delivery of messages.
pub trait NotificationChannel: Send + Sync {
    fn send_to_user<'a>(
        &'a self,
        user: &'a str,
        destination: &'a str,
        message: String,
    ) -> BoxFuture<'a, Result<(), NotificationError>>;
}

/// Pull side of a [`NotificationChannel`].
pub trait NotificationInbox: Send + Sync {
    /// Removes and returns every message queued for `user`, oldest first.
    fn drain<'a>(&'a self, user: &'a str) -> BoxFuture<'a, Vec<Notification>>;
}

// =============================================================================
// Tests
// =============================================================================
