//! # todo-gateway
//!
//! HTTP gateway for a task-tracking service built on command/query
//! separation.
//!
//! Writes never touch stored task state directly: each mutation becomes a
//! command that is forwarded to a command processor, and the request waits
//! until the processor has applied it. Reads are served from a denormalized
//! read model that the processor keeps current by publishing events.
//!
//! ## Layers
//!
//! - [`domain`]: commands, events, the task aggregate and the read entry
//! - [`ports`]: traits for every collaborator the gateway talks to
//! - [`infrastructure`]: in-process implementations and configuration
//! - [`api`]: axum handlers, identity, DTOs and the error boundary
//! - [`server`]: listener binding and graceful shutdown

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod server;
