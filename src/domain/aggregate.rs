//! Write-side task aggregate.
//!
//! State is never stored directly. It is folded from the task's event
//! stream with [`Task::replay`], and [`decide`] turns a command plus that
//! state into the events to append.
//!
//! # Rules
//!
//! - a task is created exactly once
//! - every other command needs an existing task
//! - a completed task can no longer be renamed, starred or unstarred
//! - commands that would not change anything produce no events

use chrono::{DateTime, Utc};

use super::commands::TaskCommand;
use super::errors::DomainError;
use super::events::TaskEvent;
use super::identifier::TaskId;

/// Current write-side state of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub username: String,
    pub title: String,
    pub completed: bool,
    pub starred: bool,
}

impl Task {
    /// Rebuilds a task from its event stream.
    ///
    /// Returns `None` when the stream does not start with a creation event.
    #[must_use]
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a TaskEvent>) -> Option<Self> {
        events.into_iter().fold(None, Self::evolve)
    }

    fn evolve(state: Option<Self>, event: &TaskEvent) -> Option<Self> {
        match event {
            TaskEvent::Created {
                id,
                username,
                title,
                ..
            } => Some(Self {
                id: id.clone(),
                username: username.clone(),
                title: title.clone(),
                completed: false,
                starred: false,
            }),
            TaskEvent::TitleModified { title, .. } => state.map(|task| Self {
                title: title.clone(),
                ..task
            }),
            TaskEvent::Completed { .. } => state.map(|task| Self {
                completed: true,
                ..task
            }),
            TaskEvent::Starred { .. } => state.map(|task| Self {
                starred: true,
                ..task
            }),
            TaskEvent::Unstarred { .. } => state.map(|task| Self {
                starred: false,
                ..task
            }),
        }
    }
}

/// Decides which events `command` produces against `state`.
///
/// `state` is `None` when the target task has no events yet.
///
/// # Errors
///
/// - [`DomainError::AlreadyExists`] when creating a task that exists
/// - [`DomainError::NotFound`] for any other command on a missing task
/// - [`DomainError::AlreadyCompleted`] when renaming, starring or
///   unstarring a completed task
pub fn decide(
    state: Option<&Task>,
    command: &TaskCommand,
    now: DateTime<Utc>,
) -> Result<Vec<TaskEvent>, DomainError> {
    let Some(task) = state else {
        return match command {
            TaskCommand::Create {
                id,
                username,
                title,
            } => Ok(vec![TaskEvent::Created {
                id: id.clone(),
                username: username.clone(),
                title: title.clone(),
                occurred_at: now,
            }]),
            other => Err(DomainError::NotFound(other.id().clone())),
        };
    };

    match command {
        TaskCommand::Create { id, .. } => Err(DomainError::AlreadyExists(id.clone())),
        TaskCommand::ModifyTitle { id, title } => {
            require_open(task)?;
            Ok(vec![TaskEvent::TitleModified {
                id: id.clone(),
                title: title.clone(),
                occurred_at: now,
            }])
        }
        TaskCommand::Complete { id } => Ok(if task.completed {
            Vec::new()
        } else {
            vec![TaskEvent::Completed {
                id: id.clone(),
                occurred_at: now,
            }]
        }),
        TaskCommand::Star { id } => {
            require_open(task)?;
            Ok(if task.starred {
                Vec::new()
            } else {
                vec![TaskEvent::Starred {
                    id: id.clone(),
                    occurred_at: now,
                }]
            })
        }
        TaskCommand::Unstar { id } => {
            require_open(task)?;
            Ok(if task.starred {
                vec![TaskEvent::Unstarred {
                    id: id.clone(),
                    occurred_at: now,
                }]
            } else {
                Vec::new()
            })
        }
    }
}

fn require_open(task: &Task) -> Result<(), DomainError> {
    if task.completed {
        Err(DomainError::AlreadyCompleted(task.id.clone()))
    } else {
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
