//! # Order Model
//!
//! One ordered id-list per scope (a section's fields, a table's columns, a
//! group's members, the page's groups), held in a single explicit map that
//! is passed into composition rather than read from ambient state.
//!
//! ## Operation Semantics
//!
//! - **apply_move**: atomic from the caller's view. Either a new order is
//!   stored and returned, or the previous order is returned unchanged. An
//!   absent id or out-of-range index is a logged no-op, never an error.
//! - **insert_append** / **remove**: the only operations that change list
//!   membership; moves always transform the existing list in place
//!   (remove + reinsert).
//!
//! No operation ever produces a duplicate or missing id. The pure
//! free functions below carry the (current order, op) → new order contract;
//! `OrderModel` stores their results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Pure move: remove `entity_id` and reinsert it at `target_index`.
/// Returns `None` when the id is absent or the index is out of range.
pub fn moved(order: &[String], entity_id: &str, target_index: usize) -> Option<Vec<String>> {
    let from = order.iter().position(|id| id == entity_id)?;
    if target_index >= order.len() {
        return None;
    }
    let mut next = order.to_vec();
    let id = next.remove(from);
    next.insert(target_index, id);
    Some(next)
}

/// Pure append: unchanged when the id is already present.
pub fn appended(order: &[String], entity_id: &str) -> Vec<String> {
    let mut next = order.to_vec();
    if !order.iter().any(|id| id == entity_id) {
        next.push(entity_id.to_string());
    }
    next
}

/// Pure removal: filters the id out.
pub fn removed(order: &[String], entity_id: &str) -> Vec<String> {
    order.iter().filter(|id| *id != entity_id).cloned().collect()
}

/// Ordered id-lists keyed by scope id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderModel {
    scopes: HashMap<String, Vec<String>>,
}

impl OrderModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a scope's order wholesale. Initialization only — runtime
    /// changes go through apply_move/insert_append/remove.
    pub fn set_order(&mut self, scope_id: impl Into<String>, ids: Vec<String>) {
        self.scopes.insert(scope_id.into(), ids);
    }

    /// Current order for a scope, if one was ever recorded
    pub fn order(&self, scope_id: &str) -> Option<&[String]> {
        self.scopes.get(scope_id).map(Vec::as_slice)
    }

    /// Move an entity within its scope's order. Absent id, unknown scope,
    /// or out-of-range index leaves the order unchanged (logged no-op).
    pub fn apply_move(
        &mut self,
        scope_id: &str,
        entity_id: &str,
        target_index: usize,
    ) -> &[String] {
        let Some(order) = self.scopes.get_mut(scope_id) else {
            warn!(scope = scope_id, entity = entity_id, "Ignoring move in unknown scope");
            return &[];
        };
        match moved(order, entity_id, target_index) {
            Some(next) => *order = next,
            None => warn!(
                scope = scope_id,
                entity = entity_id,
                target_index,
                "Ignoring move of absent id or out-of-range index"
            ),
        }
        order
    }

    /// Append a newly created entity at the end of its scope's order
    pub fn insert_append(&mut self, scope_id: &str, entity_id: &str) {
        let order = self.scopes.entry(scope_id.to_string()).or_default();
        if order.iter().any(|id| id == entity_id) {
            warn!(scope = scope_id, entity = entity_id, "Ignoring append of id already in order");
            return;
        }
        *order = appended(order, entity_id);
    }

    /// Filter an id out of its scope's order
    pub fn remove(&mut self, scope_id: &str, entity_id: &str) {
        if let Some(order) = self.scopes.get_mut(scope_id) {
            *order = removed(order, entity_id);
        }
    }
}
