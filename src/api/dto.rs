//! Request and response bodies, plus their validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::api::error::ApiError;
use crate::domain::{TaskEntry, TaskId};
use crate::ports::{Notification, Page, PageRequest};

pub const MAX_TITLE_LENGTH: usize = 255;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModifyTitleRequest {
    pub title: Option<String>,
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListTasksQuery {
    pub completed: bool,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListTasksQuery {
    /// Resolves the requested page, falling back to `default_size` and
    /// clamping to `max_size`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `size` is zero.
    pub fn page_request(&self, default_size: u32, max_size: u32) -> Result<PageRequest, ApiError> {
        let size = self.size.unwrap_or(default_size).min(max_size);
        PageRequest::new(self.page.unwrap_or(0), size)
            .ok_or_else(|| ApiError::validation_field("size", "must be greater than 0"))
    }
}

/// Checks a task title and returns it trimmed.
///
/// # Errors
///
/// Returns a validation error when the title is missing, blank, or longer
/// than [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: Option<&str>) -> Result<String, ApiError> {
    let title = title
        .map(str::trim)
        .ok_or_else(|| ApiError::validation_field("title", "must not be null"))?;

    if title.is_empty() {
        return Err(ApiError::validation_field("title", "must not be blank"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ApiError::validation_field(
            "title",
            format!("must be at most {MAX_TITLE_LENGTH} characters"),
        ));
    }
    Ok(title.to_string())
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntryResponse {
    pub id: TaskId,
    pub username: String,
    pub title: String,
    pub completed: bool,
    pub starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskEntry> for TaskEntryResponse {
    fn from(entry: TaskEntry) -> Self {
        Self {
            id: entry.id,
            username: entry.username,
            title: entry.title,
            completed: entry.completed,
            starred: entry.starred,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
}

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let page = page.map(U::from);
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            has_next,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub destination: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            destination: notification.destination,
            message: notification.message,
            sent_at: notification.sent_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Response
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetailResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetailResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetailResponse {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    #[must_use]
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: JsonValue,
    ) -> Self {
        Self {
            error: ErrorDetailResponse {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
