//! Task events.
//!
//! Events are the only thing the command processor persists. Write-side
//! state is rebuilt from them (see [`Task::replay`](super::Task::replay))
//! and the read model is projected from them
//! (see [`TaskEntry::project`](super::TaskEntry::project)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifier::TaskId;

/// A fact about a task, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    Created {
        id: TaskId,
        username: String,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    TitleModified {
        id: TaskId,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    Completed {
        id: TaskId,
        occurred_at: DateTime<Utc>,
    },
    Starred {
        id: TaskId,
        occurred_at: DateTime<Utc>,
    },
    Unstarred {
        id: TaskId,
        occurred_at: DateTime<Utc>,
    },
}

impl TaskEvent {
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        match self {
            Self::Created { id, .. }
            | Self::TitleModified { id, .. }
            | Self::Completed { id, .. }
            | Self::Starred { id, .. }
            | Self::Unstarred { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Created { occurred_at, .. }
            | Self::TitleModified { occurred_at, .. }
            | Self::Completed { occurred_at, .. }
            | Self::Starred { occurred_at, .. }
            | Self::Unstarred { occurred_at, .. } => *occurred_at,
        }
    }

    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "TaskCreated",
            Self::TitleModified { .. } => "TaskTitleModified",
            Self::Completed { .. } => "TaskCompleted",
            Self::Starred { .. } => "TaskStarred",
            Self::Unstarred { .. } => "TaskUnstarred",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
