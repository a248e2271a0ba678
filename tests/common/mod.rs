//! Shared doubles and helpers for the HTTP integration tests.
//!
//! Each integration test file is compiled as its own crate, so helpers used
//! by only one of them would otherwise warn as dead code.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::Value;

use todo_gateway::api::{AppState, HeaderIdentityProvider, create_router};
use todo_gateway::domain::{TaskCommand, TaskEntry, TaskId};
use todo_gateway::infrastructure::{
    AppConfig, InMemoryNotificationChannel, InMemoryTaskEntryRepository,
};
use todo_gateway::ports::{
    CommandError, CommandGateway, IdentifierFactory, NotificationChannel, NotificationError, Page,
    PageRequest, RepositoryError, TaskEntryRepository,
};

// =============================================================================
// Command Gateway Double
// =============================================================================

/// Records every command it receives and answers with a fixed outcome,
/// optionally after a delay.
#[derive(Debug, Default)]
pub struct RecordingCommandGateway {
    commands: Mutex<Vec<TaskCommand>>,
    delay: Option<Duration>,
    failure: Option<CommandError>,
}

impl RecordingCommandGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_with(mut self, failure: CommandError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn commands(&self) -> Vec<TaskCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandGateway for RecordingCommandGateway {
    fn send_and_wait(&self, command: TaskCommand) -> BoxFuture<'_, Result<(), CommandError>> {
        Box::pin(async move {
            self.commands.lock().unwrap().push(command);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.failure.clone().map_or(Ok(()), Err)
        })
    }
}

// =============================================================================
// Identifier Factory Double
// =============================================================================

/// Hands out `task-1`, `task-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdentifierFactory {
    issued: AtomicU64,
}

impl IdentifierFactory for SequentialIdentifierFactory {
    fn generate_identifier(&self) -> TaskId {
        let next = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        TaskId::new(format!("task-{next}"))
    }
}

// =============================================================================
// Failing Collaborators
// =============================================================================

#[derive(Debug, Default)]
pub struct UnreachableNotificationChannel;

impl NotificationChannel for UnreachableNotificationChannel {
    fn send_to_user<'a>(
        &'a self,
        _user: &'a str,
        _destination: &'a str,
        _message: String,
    ) -> BoxFuture<'a, Result<(), NotificationError>> {
        Box::pin(async { Err(NotificationError::Delivery("broker offline".to_string())) })
    }
}

#[derive(Debug, Default)]
pub struct BrokenTaskEntryRepository;

impl TaskEntryRepository for BrokenTaskEntryRepository {
    fn find_by_id<'a>(
        &'a self,
        _id: &'a TaskId,
    ) -> BoxFuture<'a, Result<Option<TaskEntry>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::Storage("read model offline".to_string())) })
    }

    fn save(&self, _entry: TaskEntry) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async { Err(RepositoryError::Storage("read model offline".to_string())) })
    }

    fn find_by_username_and_completed<'a>(
        &'a self,
        _username: &'a str,
        _completed: bool,
        _page: PageRequest,
    ) -> BoxFuture<'a, Result<Page<TaskEntry>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::Storage("read model offline".to_string())) })
    }
}

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Router backed by doubles, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<RecordingCommandGateway>,
    pub notifications: Arc<InMemoryNotificationChannel>,
    pub task_entries: Arc<InMemoryTaskEntryRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_gateway(RecordingCommandGateway::new())
    }

    pub fn with_gateway(gateway: RecordingCommandGateway) -> Self {
        let gateway = Arc::new(gateway);
        let notifications = Arc::new(InMemoryNotificationChannel::new());
        let task_entries = Arc::new(InMemoryTaskEntryRepository::new());

        let state = AppState {
            config: Arc::new(AppConfig::default()),
            command_gateway: gateway.clone(),
            task_entries: task_entries.clone(),
            identifier_factory: Arc::new(SequentialIdentifierFactory::default()),
            notification_channel: notifications.clone(),
            notification_inbox: notifications.clone(),
            identity_provider: Arc::new(HeaderIdentityProvider::default()),
        };

        Self {
            router: create_router(state),
            gateway,
            notifications,
            task_entries,
        }
    }

    /// Same wiring, with one collaborator swapped.
    pub fn with_state(customize: impl FnOnce(&mut AppState)) -> Self {
        let app = Self::new();
        let mut state = AppState {
            config: Arc::new(AppConfig::default()),
            command_gateway: app.gateway.clone(),
            task_entries: app.task_entries.clone(),
            identifier_factory: Arc::new(SequentialIdentifierFactory::default()),
            notification_channel: app.notifications.clone(),
            notification_inbox: app.notifications.clone(),
            identity_provider: Arc::new(HeaderIdentityProvider::default()),
        };
        customize(&mut state);

        Self {
            router: create_router(state),
            ..app
        }
    }
}

/// Router wired to the real in-process command bus and read model.
pub fn in_memory_router() -> Router {
    create_router(AppState::in_memory(AppConfig::default()).unwrap())
}

// =============================================================================
// Request Helpers
// =============================================================================

pub struct RequestBuilder {
    method: &'static str,
    uri: String,
    user: Option<String>,
    roles: Option<String>,
    body: Option<Value>,
    raw_body: Option<&'static str>,
}

pub fn request(method: &'static str, uri: impl Into<String>) -> RequestBuilder {
    RequestBuilder {
        method,
        uri: uri.into(),
        user: None,
        roles: None,
        body: None,
        raw_body: None,
    }
}

impl RequestBuilder {
    pub fn user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn roles(mut self, roles: &str) -> Self {
        self.roles = Some(roles.to_string());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn raw_json(mut self, body: &'static str) -> Self {
        self.raw_body = Some(body);
        self
    }

    pub fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(user) = self.user {
            builder = builder.header("x-user", user);
        }
        if let Some(roles) = self.roles {
            builder = builder.header("x-roles", roles);
        }

        let body = match (self.body, self.raw_body) {
            (Some(json), _) => Body::from(json.to_string()),
            (None, Some(raw)) => Body::from(raw),
            (None, None) => return builder.body(Body::empty()).unwrap(),
        };
        builder
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
