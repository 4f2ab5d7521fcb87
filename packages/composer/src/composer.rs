use crate::node::DocNode;
use crate::normalize::KeyNormalizer;
use crate::resolve::resolve;
use docsmith_model::{
    Entity, EntityStore, Group, MemberRef, OrderModel, Page, Section, Table, PAGE_SCOPE,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub type ComposeResult<T> = Result<T, ComposeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    /// An order list names the same id twice. Order operations never
    /// produce this, so it means externally corrupted state; it surfaces at
    /// the export boundary rather than being silently repaired.
    #[error("Order list for scope '{scope}' names '{id}' more than once")]
    DuplicateOrderEntry { scope: String, id: String },
}

/// Walks OrderModel scopes top-down and builds the ordered output node
/// tree, invoking the value resolver for fields and the key normalizer for
/// table rows. Read-only over every input; composition never mutates.
pub struct Composer {
    normalizer: KeyNormalizer,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            normalizer: KeyNormalizer::line_items(),
        }
    }

    pub fn with_normalizer(normalizer: KeyNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    /// Compose the full page. Dangling order references are filtered and
    /// logged, never fatal; a scope with no order and no entities still
    /// yields an empty, well-formed element.
    #[instrument(skip_all, fields(
        groups = page.groups.len(),
        sections = page.sections.len(),
        tables = page.tables.len()
    ))]
    pub fn compose(
        &self,
        page: &Page,
        store: &EntityStore,
        orders: &OrderModel,
        live: &HashMap<String, String>,
    ) -> ComposeResult<DocNode> {
        info!("Starting document composition");

        let natural: Vec<String> = page.groups.iter().map(|g| g.id.clone()).collect();
        let group_ids = ordered_ids(orders, PAGE_SCOPE, natural)?;

        let mut root = DocNode::element("document");
        for group_id in &group_ids {
            let Some(group) = page.find_group(group_id) else {
                warn!(scope = PAGE_SCOPE, id = %group_id, "Filtering dangling group reference");
                continue;
            };
            root = root.with_child(self.compose_group(group, page, store, orders, live)?);
        }

        info!(groups = root.children().len(), "Document composition complete");
        Ok(root)
    }

    fn compose_group(
        &self,
        group: &Group,
        page: &Page,
        store: &EntityStore,
        orders: &OrderModel,
        live: &HashMap<String, String>,
    ) -> ComposeResult<DocNode> {
        debug!(group = %group.id, "Composing group");

        let natural: Vec<String> = group.members.iter().map(|m| m.id().to_string()).collect();
        let member_ids = ordered_ids(orders, &group.id, natural)?;

        let mut node = DocNode::element("group")
            .with_attr("id", &group.id)
            .with_attr("label", &group.label);

        for member_id in &member_ids {
            let Some(member) = group.members.iter().find(|m| m.id() == member_id) else {
                warn!(scope = %group.id, id = %member_id, "Filtering dangling member reference");
                continue;
            };
            match member {
                MemberRef::Section(id) => match page.find_section(id) {
                    Some(section) => {
                        node = node.with_child(self.compose_section(section, store, orders, live)?)
                    }
                    None => {
                        warn!(scope = %group.id, id = %id, "Filtering member with no section record")
                    }
                },
                MemberRef::Table(id) => match page.find_table(id) {
                    Some(table) => {
                        node = node.with_child(self.compose_table(table, store, orders)?)
                    }
                    None => {
                        warn!(scope = %group.id, id = %id, "Filtering member with no table record")
                    }
                },
            }
        }

        Ok(node)
    }

    fn compose_section(
        &self,
        section: &Section,
        store: &EntityStore,
        orders: &OrderModel,
        live: &HashMap<String, String>,
    ) -> ComposeResult<DocNode> {
        let natural: Vec<String> = store
            .entities(&section.id)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        let field_ids = ordered_ids(orders, &section.id, natural)?;

        let mut node = DocNode::element("section")
            .with_attr("id", &section.id)
            .with_attr("label", &section.label);

        for field_id in &field_ids {
            let Some(entity) = store.entity(&section.id, field_id) else {
                warn!(scope = %section.id, id = %field_id, "Filtering dangling field reference");
                continue;
            };
            node = node.with_child(self.compose_field(entity, live));
        }

        Ok(node)
    }

    fn compose_field(&self, entity: &Entity, live: &HashMap<String, String>) -> DocNode {
        let mut field = DocNode::element("field")
            .with_attr("id", &entity.id)
            .with_attr("label", &entity.label);
        if entity.is_custom() {
            field = field.with_attr("custom", "true");
        }
        field.with_child(DocNode::value(&entity.id, resolve(entity, live)))
    }

    fn compose_table(
        &self,
        table: &Table,
        store: &EntityStore,
        orders: &OrderModel,
    ) -> ComposeResult<DocNode> {
        let natural: Vec<String> = store
            .entities(&table.id)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        let column_ids = ordered_ids(orders, &table.id, natural)?;

        // Header nodes mix predefined and custom columns in exactly the
        // order given; dangling column ids drop out of both headers and
        // cells so rows stay aligned with headers.
        let mut header = DocNode::element("columns");
        let mut columns: Vec<&Entity> = Vec::new();
        for column_id in &column_ids {
            let Some(entity) = store.entity(&table.id, column_id) else {
                warn!(scope = %table.id, id = %column_id, "Filtering dangling column reference");
                continue;
            };
            let mut column = DocNode::element("column")
                .with_attr("id", &entity.id)
                .with_attr("label", &entity.label);
            if entity.is_custom() {
                column = column.with_attr("custom", "true");
            }
            header = header.with_child(column);
            columns.push(entity);
        }

        let mut rows = DocNode::element("rows");
        for row in &table.rows {
            let normalized = self.normalizer.normalize_row(row);
            let mut row_node = DocNode::element("row");
            for entity in &columns {
                let content = normalized.get(&entity.id).unwrap_or("");
                row_node = row_node.with_child(
                    DocNode::element("cell")
                        .with_attr("column", &entity.id)
                        .with_child(DocNode::value(
                            self.normalizer.export_key(&entity.id),
                            content,
                        )),
                );
            }
            rows = rows.with_child(row_node);
        }

        Ok(DocNode::element("table")
            .with_attr("id", &table.id)
            .with_attr("label", &table.label)
            .with_child(header)
            .with_child(rows))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative id sequence for one scope: the explicit order when one is
/// recorded and non-empty, otherwise the natural (insertion) order.
fn ordered_ids(
    orders: &OrderModel,
    scope: &str,
    natural: Vec<String>,
) -> ComposeResult<Vec<String>> {
    match orders.order(scope) {
        Some(order) if !order.is_empty() => {
            let mut seen = HashSet::new();
            for id in order {
                if !seen.insert(id.as_str()) {
                    return Err(ComposeError::DuplicateOrderEntry {
                        scope: scope.to_string(),
                        id: id.clone(),
                    });
                }
            }
            Ok(order.to_vec())
        }
        _ => {
            debug!(scope, "No explicit order; falling back to natural order");
            Ok(natural)
        }
    }
}
