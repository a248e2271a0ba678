use thiserror::Error;

use super::identifier::TaskId;

/// Business rule violations raised while deciding a command.
///
/// The `Display` text is what ends up in the caller's error notification,
/// so it is phrased for end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Task [ identifier = {0} ] already exists.")]
    AlreadyExists(TaskId),

    #[error("Task [ identifier = {0} ] does not exist.")]
    NotFound(TaskId),

    #[error("Task [ identifier = {0} ] is completed.")]
    AlreadyCompleted(TaskId),
}

impl DomainError {
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::AlreadyExists(id) | Self::NotFound(id) | Self::AlreadyCompleted(id) => id,
        }
    }
}
