use uuid::Uuid;

use crate::domain::TaskId;
use crate::ports::IdentifierFactory;

/// Identifier factory backed by random (version 4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdentifierFactory;

impl UuidIdentifierFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdentifierFactory for UuidIdentifierFactory {
    fn generate_identifier(&self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}
