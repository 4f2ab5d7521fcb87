//! # Document Mutations
//!
//! High-level semantic operations on document state.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation represents one user-level edit
//! 2. **Validated**: structural constraints are checked before any change
//! 3. **Atomic**: a rejected mutation leaves the document untouched
//!
//! ## Mutation Semantics
//!
//! ### MoveEntity
//! - Delegates to the order model's move contract: an absent id or
//!   out-of-range index is a logged no-op, not an error
//! - Only the named scope's order changes; no other scope is perturbed
//!
//! ### AddField / AddColumn
//! - Allocates a fresh namespaced custom id, appends to the scope's order
//! - Predefined and custom entities compose identically afterwards
//!
//! ### RemoveEntity
//! - Refused for the protected subset: title fields, calculated totals,
//!   and a free-text section's designated main field
//! - Removes the entity record and filters it out of the scope's order

use crate::document::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Move an entity to a new index within its scope's order
    MoveEntity {
        scope_id: String,
        entity_id: String,
        index: usize,
    },

    /// Add a user-defined field to a section
    AddField {
        section_id: String,
        label: String,
        placeholder: Option<String>,
    },

    /// Add a user-defined column to a table
    AddColumn { table_id: String, label: String },

    /// Remove an entity from its scope
    RemoveEntity {
        scope_id: String,
        entity_id: String,
    },

    /// Rename an entity's label
    SetLabel {
        scope_id: String,
        entity_id: String,
        label: String,
    },

    /// Replace an entity's stored value (atomic replacement)
    SetValue {
        scope_id: String,
        entity_id: String,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity is protected and cannot be removed: {0}")]
    ProtectedEntity(String),

    #[error("Calculated value cannot be edited directly: {0}")]
    CalculatedEntity(String),
}

impl Mutation {
    /// Apply without re-validating; `Document::apply` validates first
    pub(crate) fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        match self {
            Mutation::MoveEntity {
                scope_id,
                entity_id,
                index,
            } => {
                doc.orders.apply_move(scope_id, entity_id, *index);
                Ok(())
            }

            Mutation::AddField {
                section_id,
                label,
                placeholder,
            } => {
                let id = doc.allocate_custom_id();
                let mut entity = docsmith_model::Entity::custom(&id, label);
                if let Some(placeholder) = placeholder {
                    entity = entity.with_placeholder(placeholder);
                }
                doc.store.add(section_id, entity);
                doc.orders.insert_append(section_id, &id);
                Ok(())
            }

            Mutation::AddColumn { table_id, label } => {
                let id = doc.allocate_custom_id();
                doc.store
                    .add(table_id, docsmith_model::Entity::custom(&id, label));
                doc.orders.insert_append(table_id, &id);
                Ok(())
            }

            Mutation::RemoveEntity {
                scope_id,
                entity_id,
            } => {
                doc.store.remove(scope_id, entity_id);
                doc.orders.remove(scope_id, entity_id);
                Ok(())
            }

            Mutation::SetLabel {
                scope_id,
                entity_id,
                label,
            } => {
                let entity = doc
                    .store
                    .entity_mut(scope_id, entity_id)
                    .ok_or_else(|| MutationError::EntityNotFound(entity_id.clone()))?;
                entity.label = label.clone();
                Ok(())
            }

            Mutation::SetValue {
                scope_id,
                entity_id,
                value,
            } => {
                let entity = doc
                    .store
                    .entity_mut(scope_id, entity_id)
                    .ok_or_else(|| MutationError::EntityNotFound(entity_id.clone()))?;
                entity.value = value.clone();
                Ok(())
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            // moves never fail: invalid moves are no-ops by contract
            Mutation::MoveEntity { .. } => Ok(()),

            Mutation::AddField { section_id, .. } => {
                if doc.page.find_section(section_id).is_none() {
                    return Err(MutationError::ScopeNotFound(section_id.clone()));
                }
                Ok(())
            }

            Mutation::AddColumn { table_id, .. } => {
                if doc.page.find_table(table_id).is_none() {
                    return Err(MutationError::ScopeNotFound(table_id.clone()));
                }
                Ok(())
            }

            Mutation::RemoveEntity {
                scope_id,
                entity_id,
            } => {
                let entity = doc
                    .store
                    .entity(scope_id, entity_id)
                    .ok_or_else(|| MutationError::EntityNotFound(entity_id.clone()))?;

                let is_main_field = doc
                    .page
                    .find_section(scope_id)
                    .and_then(|section| section.main_field.as_deref())
                    == Some(entity_id.as_str());

                if entity.is_title || entity.is_calculated || is_main_field {
                    return Err(MutationError::ProtectedEntity(entity_id.clone()));
                }
                Ok(())
            }

            Mutation::SetLabel {
                scope_id,
                entity_id,
                ..
            } => {
                doc.store
                    .entity(scope_id, entity_id)
                    .ok_or_else(|| MutationError::EntityNotFound(entity_id.clone()))?;
                Ok(())
            }

            Mutation::SetValue {
                scope_id,
                entity_id,
                ..
            } => {
                let entity = doc
                    .store
                    .entity(scope_id, entity_id)
                    .ok_or_else(|| MutationError::EntityNotFound(entity_id.clone()))?;
                // calculated values are owned by the totals step
                if entity.is_calculated {
                    return Err(MutationError::CalculatedEntity(entity_id.clone()));
                }
                Ok(())
            }
        }
    }
}
