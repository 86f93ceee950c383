//! Category entity - read-only grouping for stories

use crate::value_objects::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(id: EntityId, name: String, slug: String) -> Self {
        Self { id, name, slug }
    }
}
