//! Task endpoint handlers.
//!
//! Mutations are translated into a [`TaskCommand`] and forwarded to the
//! command gateway. The handler only responds once the gateway has
//! acknowledged the command. When the gateway reports a failure, the caller
//! additionally receives the failure message on their error queue.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::api::dto::{
    CreateTaskRequest, ListTasksQuery, ModifyTitleRequest, NotificationResponse, PageResponse,
    TaskEntryResponse, validate_title,
};
use crate::api::error::ApiError;
use crate::api::identity::Caller;
use crate::api::state::AppState;
use crate::domain::{TaskCommand, TaskId};

/// Destination of failure notifications.
pub const ERROR_DESTINATION: &str = "/queue/errors";

// =============================================================================
// Queries
// =============================================================================

pub async fn list_tasks(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<PageResponse<TaskEntryResponse>>, ApiError> {
    let Query(query) = query?;
    let page_request =
        query.page_request(state.config.default_page_size, state.config.max_page_size)?;

    let page = state
        .task_entries
        .find_by_username_and_completed(caller.name(), query.completed, page_request)
        .await?;

    Ok(Json(PageResponse::from(page)))
}

/// Hands out, and forgets, every notification queued for the caller.
pub async fn list_notifications(
    State(state): State<AppState>,
    caller: Caller,
) -> Json<Vec<NotificationResponse>> {
    let notifications = state.notification_inbox.drain(caller.name()).await;

    Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    )
}

// =============================================================================
// Commands
// =============================================================================

pub async fn create_task(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let title = validate_title(request.title.as_deref())?;

    let id = state.identifier_factory.generate_identifier();
    let command = TaskCommand::create(id, caller.name(), title);
    send_and_wait(&state, &caller, command).await?;

    Ok(StatusCode::CREATED)
}

pub async fn modify_title(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ModifyTitleRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let title = validate_title(request.title.as_deref())?;

    send_and_wait(&state, &caller, TaskCommand::modify_title(TaskId::from(id), title)).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_task(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    send_and_wait(&state, &caller, TaskCommand::complete(TaskId::from(id))).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn star_task(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    send_and_wait(&state, &caller, TaskCommand::star(TaskId::from(id))).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unstar_task(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    send_and_wait(&state, &caller, TaskCommand::unstar(TaskId::from(id))).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Accepted but not yet backed by a command; nothing is forwarded.
pub async fn delete_task(
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    tracing::debug!(task_id = %id, user = caller.name(), "Delete requested, not forwarded");
    Ok(StatusCode::NO_CONTENT)
}

/// Restricted to the admin role. Accepted but not yet backed by a command.
pub async fn restore_task(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    if !caller.has_role(&state.config.admin_role) {
        tracing::warn!(task_id = %id, user = caller.name(), "Restore refused");
        return Err(ApiError::forbidden(format!(
            "role {} is required",
            state.config.admin_role
        )));
    }

    tracing::debug!(task_id = %id, user = caller.name(), "Restore requested, not forwarded");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Forwarding
// =============================================================================

async fn send_and_wait(
    state: &AppState,
    caller: &Caller,
    command: TaskCommand,
) -> Result<(), ApiError> {
    let command_name = command.name();
    let task_id = command.id().clone();
    tracing::debug!(
        command = command_name,
        task_id = %task_id,
        user = caller.name(),
        "Forwarding command"
    );

    let Err(error) = state.command_gateway.send_and_wait(command).await else {
        return Ok(());
    };

    tracing::warn!(
        command = command_name,
        task_id = %task_id,
        user = caller.name(),
        error = %error,
        "Command failed"
    );

    if let Err(delivery_error) = state
        .notification_channel
        .send_to_user(caller.name(), ERROR_DESTINATION, error.to_string())
        .await
    {
        tracing::warn!(
            user = caller.name(),
            error = %delivery_error,
            "Failed to deliver error notification"
        );
    }

    Err(ApiError::from(error))
}
