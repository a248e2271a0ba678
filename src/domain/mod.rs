//! Domain layer for task tracking.
//!
//! # Structure
//!
//! - [`identifier`] - The opaque task identifier
//! - [`commands`] - Mutation intents submitted through the command gateway
//! - [`events`] - Facts recorded once a command has been applied
//! - [`aggregate`] - Write-side task state and the command decision function
//! - [`entry`] - Read-side projection of a task
//! - [`errors`] - Business rule violations
//!
//! Everything in this module is pure: no I/O, no clocks, no identifier
//! generation. Timestamps and identifiers are passed in by the caller.

pub mod aggregate;
pub mod commands;
pub mod entry;
pub mod errors;
pub mod events;
pub mod identifier;

pub use aggregate::{Task, decide};
pub use commands::TaskCommand;
pub use entry::TaskEntry;
pub use errors::DomainError;
pub use events::TaskEvent;
pub use identifier::TaskId;
