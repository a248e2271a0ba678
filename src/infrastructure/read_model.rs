//! Read-model storage and the projection that keeps it current.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{TaskEntry, TaskEvent, TaskId};
use crate::ports::{Page, PageRequest, RepositoryError, TaskEntryRepository, TaskEventListener};

// =============================================================================
// In-Memory Task Entry Repository
// =============================================================================

/// Task entries held in a process-local map.
///
/// Queries return entries ordered by creation time, with the identifier as
/// a tie breaker, so that paging is stable.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskEntryRepository {
    entries: Arc<RwLock<HashMap<TaskId, TaskEntry>>>,
}

impl InMemoryTaskEntryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskEntryRepository for InMemoryTaskEntryRepository {
    fn find_by_id<'a>(
        &'a self,
        id: &'a TaskId,
    ) -> BoxFuture<'a, Result<Option<TaskEntry>, RepositoryError>> {
        Box::pin(async move {
            let guard = self.entries.read().await;
            Ok(guard.get(id).cloned())
        })
    }

    fn save(&self, entry: TaskEntry) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut guard = self.entries.write().await;
            guard.insert(entry.id.clone(), entry);
            Ok(())
        })
    }

    fn find_by_username_and_completed<'a>(
        &'a self,
        username: &'a str,
        completed: bool,
        page: PageRequest,
    ) -> BoxFuture<'a, Result<Page<TaskEntry>, RepositoryError>> {
        Box::pin(async move {
            let guard = self.entries.read().await;
            let mut matching: Vec<TaskEntry> = guard
                .values()
                .filter(|entry| entry.username == username && entry.completed == completed)
                .cloned()
                .collect();
            drop(guard);

            matching.sort_by(|left, right| {
                left.created_at
                    .cmp(&right.created_at)
                    .then_with(|| left.id.cmp(&right.id))
            });

            let total = matching.len() as u64;
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.size()).unwrap_or(usize::MAX);
            let content = matching.into_iter().skip(offset).take(limit).collect();

            Ok(Page::new(content, page, total))
        })
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Applies task events to a [`TaskEntryRepository`].
pub struct TaskEntryProjection {
    repository: Arc<dyn TaskEntryRepository>,
}

impl TaskEntryProjection {
    #[must_use]
    pub fn new(repository: Arc<dyn TaskEntryRepository>) -> Self {
        Self { repository }
    }

    async fn apply(&self, event: &TaskEvent) -> Result<(), RepositoryError> {
        let current = if TaskEntry::is_creation(event) {
            None
        } else {
            self.repository.find_by_id(event.id()).await?
        };

        match TaskEntry::project(current, event) {
            Some(entry) => self.repository.save(entry).await,
            None => {
                tracing::warn!(
                    event = event.event_type(),
                    task_id = %event.id(),
                    "No task entry to update, event ignored"
                );
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for TaskEntryProjection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("TaskEntryProjection").finish_non_exhaustive()
    }
}

impl TaskEventListener for TaskEntryProjection {
    fn on_event<'a>(&'a self, event: &'a TaskEvent) -> BoxFuture<'a, Result<(), RepositoryError>> {
        Box::pin(self.apply(event))
    }
}

// =============================================================================
// Tests
// =============================================================================
