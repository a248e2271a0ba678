//! Read-side task entry.
//!
//! A denormalized, query-friendly view of one task. Entries are only ever
//! produced by folding events through [`TaskEntry::project`]; the HTTP
//! gateway reads them but never writes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::TaskEvent;
use super::identifier::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub id: TaskId,
    pub username: String,
    pub title: String,
    pub completed: bool,
    pub starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskEntry {
    /// Applies one event to the current entry, if any.
    ///
    /// A creation event always yields a fresh entry. Any other event needs
    /// an existing entry and yields `None` without one.
    #[must_use]
    pub fn project(current: Option<Self>, event: &TaskEvent) -> Option<Self> {
        match event {
            TaskEvent::Created {
                id,
                username,
                title,
                occurred_at,
            } => Some(Self {
                id: id.clone(),
                username: username.clone(),
                title: title.clone(),
                completed: false,
                starred: false,
                created_at: *occurred_at,
                updated_at: *occurred_at,
            }),
            TaskEvent::TitleModified {
                title, occurred_at, ..
            } => current.map(|entry| Self {
                title: title.clone(),
                updated_at: *occurred_at,
                ..entry
            }),
            TaskEvent::Completed { occurred_at, .. } => current.map(|entry| Self {
                completed: true,
                updated_at: *occurred_at,
                ..entry
            }),
            TaskEvent::Starred { occurred_at, .. } => current.map(|entry| Self {
                starred: true,
                updated_at: *occurred_at,
                ..entry
            }),
            TaskEvent::Unstarred { occurred_at, .. } => current.map(|entry| Self {
                starred: false,
                updated_at: *occurred_at,
                ..entry
            }),
        }
    }

    /// Returns `true` when creating this entry does not depend on prior state.
    #[must_use]
    pub const fn is_creation(event: &TaskEvent) -> bool {
        matches!(event, TaskEvent::Created { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn created_entry() -> TaskEntry {
        TaskEntry::project(
            None,
            &TaskEvent::Created {
                id: TaskId::new("t-1"),
                username: "alice".to_string(),
                title: "Buy milk".to_string(),
                occurred_at: created_at(),
            },
        )
        .unwrap()
    }

    #[rstest]
    fn created_event_builds_fresh_entry() {
        let entry = created_entry();

        assert_eq!(entry.username, "alice");
        assert_eq!(entry.title, "Buy milk");
        assert!(!entry.completed);
        assert!(!entry.starred);
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[rstest]
    fn later_events_update_fields_and_timestamp() {
        let later = created_at() + Duration::minutes(5);
        let id = TaskId::new("t-1");

        let entry = [
            TaskEvent::TitleModified {
                id: id.clone(),
                title: "Buy bread".to_string(),
                occurred_at: later,
            },
            TaskEvent::Starred {
                id: id.clone(),
                occurred_at: later,
            },
            TaskEvent::Completed {
                id,
                occurred_at: later,
            },
        ]
        .iter()
        .fold(Some(created_entry()), TaskEntry::project)
        .unwrap();

        assert_eq!(entry.title, "Buy bread");
        assert!(entry.starred);
        assert!(entry.completed);
        assert_eq!(entry.created_at, created_at());
        assert_eq!(entry.updated_at, later);
    }

    #[rstest]
    fn unstarred_clears_star() {
        let entry = TaskEntry {
            starred: true,
            ..created_entry()
        };

        let entry = TaskEntry::project(
            Some(entry),
            &TaskEvent::Unstarred {
                id: TaskId::new("t-1"),
                occurred_at: created_at(),
            },
        )
        .unwrap();

        assert!(!entry.starred);
    }

    #[rstest]
    fn update_without_entry_yields_nothing() {
        let event = TaskEvent::Completed {
            id: TaskId::new("t-1"),
            occurred_at: created_at(),
        };

        assert_eq!(TaskEntry::project(None, &event), None);
        assert!(!TaskEntry::is_creation(&event));
    }
}
