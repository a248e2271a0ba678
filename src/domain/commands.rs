//! Task commands.
//!
//! A command is an intent to mutate a task. The gateway constructs one per
//! mutation request and hands it to the
//! [`CommandGateway`](crate::ports::CommandGateway); whether it is applied
//! is decided by the command processor, not by the caller.

use serde::{Deserialize, Serialize};

use super::identifier::TaskId;

/// One requested mutation of a task.
///
/// Every variant except [`TaskCommand::Create`] targets a task that must
/// already exist. Existence is checked by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskCommand {
    /// Creates a task owned by `username`.
    Create {
        id: TaskId,
        username: String,
        title: String,
    },
    /// Replaces the title of a task.
    ModifyTitle { id: TaskId, title: String },
    /// Marks a task as completed.
    Complete { id: TaskId },
    /// Stars a task.
    Star { id: TaskId },
    /// Removes the star from a task.
    Unstar { id: TaskId },
}

impl TaskCommand {
    #[must_use]
    pub fn create(id: TaskId, username: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Create {
            id,
            username: username.into(),
            title: title.into(),
        }
    }

    #[must_use]
    pub fn modify_title(id: TaskId, title: impl Into<String>) -> Self {
        Self::ModifyTitle {
            id,
            title: title.into(),
        }
    }

    #[must_use]
    pub const fn complete(id: TaskId) -> Self {
        Self::Complete { id }
    }

    #[must_use]
    pub const fn star(id: TaskId) -> Self {
        Self::Star { id }
    }

    #[must_use]
    pub const fn unstar(id: TaskId) -> Self {
        Self::Unstar { id }
    }

    /// Returns the identifier of the task this command targets.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        match self {
            Self::Create { id, .. }
            | Self::ModifyTitle { id, .. }
            | Self::Complete { id }
            | Self::Star { id }
            | Self::Unstar { id } => id,
        }
    }

    /// Returns a stable name for logs and traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CreateTask",
            Self::ModifyTitle { .. } => "ModifyTaskTitle",
            Self::Complete { .. } => "CompleteTask",
            Self::Star { .. } => "StarTask",
            Self::Unstar { .. } => "UnstarTask",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
