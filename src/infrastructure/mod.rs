//! Concrete adapters behind the traits in [`crate::ports`], plus
//! configuration.

mod command_bus;
mod config;
mod identifier;
mod notifications;
mod read_model;

pub use command_bus::InMemoryCommandBus;
pub use config::{AppConfig, ConfigError};
pub use identifier::UuidIdentifierFactory;
pub use notifications::InMemoryNotificationChannel;
pub use read_model::{InMemoryTaskEntryRepository, TaskEntryProjection};
