use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Canonical entity records, grouped by owning collection (a section's
/// fields, a table's columns). Insertion order within a collection is the
/// natural order used when a scope has no explicit order list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityStore {
    collections: HashMap<String, Vec<Entity>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to a collection. Ids must be unique within the
    /// collection; a colliding add is rejected and logged.
    pub fn add(&mut self, collection: &str, entity: Entity) -> bool {
        let entities = self.collections.entry(collection.to_string()).or_default();
        if entities.iter().any(|e| e.id == entity.id) {
            warn!(collection, id = %entity.id, "Rejecting duplicate entity id");
            return false;
        }
        entities.push(entity);
        true
    }

    pub fn entity(&self, collection: &str, id: &str) -> Option<&Entity> {
        self.collections
            .get(collection)
            .and_then(|entities| entities.iter().find(|e| e.id == id))
    }

    pub fn entity_mut(&mut self, collection: &str, id: &str) -> Option<&mut Entity> {
        self.collections
            .get_mut(collection)
            .and_then(|entities| entities.iter_mut().find(|e| e.id == id))
    }

    /// All entities of a collection in natural (insertion) order
    pub fn entities(&self, collection: &str) -> &[Entity] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entities_mut(&mut self, collection: &str) -> &mut [Entity] {
        self.collections
            .get_mut(collection)
            .map(Vec::as_mut_slice)
            .unwrap_or(&mut [])
    }

    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.entity(collection, id).is_some()
    }

    pub fn remove(&mut self, collection: &str, id: &str) -> Option<Entity> {
        let entities = self.collections.get_mut(collection)?;
        let index = entities.iter().position(|e| e.id == id)?;
        Some(entities.remove(index))
    }
}
