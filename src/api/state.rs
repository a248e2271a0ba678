use std::fmt;
use std::sync::Arc;

use crate::api::identity::{HeaderIdentityProvider, IdentityProvider};
use crate::infrastructure::{
    AppConfig, ConfigError, InMemoryCommandBus, InMemoryNotificationChannel,
    InMemoryTaskEntryRepository, TaskEntryProjection, UuidIdentifierFactory,
};
use crate::ports::{
    CommandGateway, IdentifierFactory, NotificationChannel, NotificationInbox, TaskEntryRepository,
};

// =============================================================================
// AppState
// =============================================================================

/// Collaborators shared by every request handler.
///
/// Each collaborator is held behind a trait object, so the binary and the
/// tests can wire different implementations into the same router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub command_gateway: Arc<dyn CommandGateway>,
    pub task_entries: Arc<dyn TaskEntryRepository>,
    pub identifier_factory: Arc<dyn IdentifierFactory>,
    pub notification_channel: Arc<dyn NotificationChannel>,
    pub notification_inbox: Arc<dyn NotificationInbox>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wires the in-process command bus, read model and notification queues.
    ///
    /// The projection is registered on the bus, so a task entry is up to
    /// date by the time a command is acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configured identity headers are not
    /// valid header names.
    pub fn in_memory(config: AppConfig) -> Result<Self, ConfigError> {
        let identity_provider = HeaderIdentityProvider::from_config(&config)?;

        let task_entries = Arc::new(InMemoryTaskEntryRepository::new());
        let projection = TaskEntryProjection::new(task_entries.clone());
        let command_bus = InMemoryCommandBus::new().with_listener(Arc::new(projection));
        let notifications = Arc::new(InMemoryNotificationChannel::new());

        Ok(Self {
            config: Arc::new(config),
            command_gateway: Arc::new(command_bus),
            task_entries,
            identifier_factory: Arc::new(UuidIdentifierFactory::new()),
            notification_channel: notifications.clone(),
            notification_inbox: notifications,
            identity_provider: Arc::new(identity_provider),
        })
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("config", &self.config)
            .field("command_gateway", &"<dyn CommandGateway>")
            .field("task_entries", &"<dyn TaskEntryRepository>")
            .field("identifier_factory", &"<dyn IdentifierFactory>")
            .field("notification_channel", &"<dyn NotificationChannel>")
            .field("notification_inbox", &"<dyn NotificationInbox>")
            .field("identity_provider", &"<dyn IdentityProvider>")
            .finish()
    }
}
