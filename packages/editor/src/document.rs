//! # Document Handle
//!
//! A Document owns the full editable state of one composition: the page
//! structure, the entity store, the order model, and the custom-id
//! allocator. All edits flow through `apply()`, which validates and bumps
//! the version; export reads the same state without mutating it.
//!
//! ## Lifecycle
//!
//! ```text
//! Seed → Edit → Recalculate → Export
//!   ↓      ↓         ↓           ↓
//! standard()  Mutations  totals  capture → compose → serialize
//! ```

use crate::mutations::{Mutation, MutationError};
use crate::payload::{parse_suggestion_payload, SuggestError};
use crate::suggestions::apply_suggestions;
use crate::totals;
use docsmith_composer::KeyNormalizer;
use docsmith_model::{
    CustomIdAllocator, Entity, EntityStore, Group, MemberRef, OrderModel, Page, Section, Table,
    PAGE_SCOPE,
};
use tracing::info;

/// Editable document state
#[derive(Debug)]
pub struct Document {
    pub page: Page,
    pub store: EntityStore,
    pub orders: OrderModel,
    /// Current version number (increments on each applied mutation)
    pub version: u64,
    ids: CustomIdAllocator,
    normalizer: KeyNormalizer,
}

impl Document {
    /// Empty document, no scopes seeded
    pub fn empty() -> Self {
        Self {
            page: Page::new(),
            store: EntityStore::new(),
            orders: OrderModel::new(),
            version: 0,
            ids: CustomIdAllocator::new(),
            normalizer: KeyNormalizer::line_items(),
        }
    }

    /// The predefined model the interactive surface starts from: company
    /// and client sections, a line-items table, calculated totals, and a
    /// free-text notes section with a protected main field.
    pub fn standard() -> Self {
        let mut doc = Self::empty();

        doc.seed_section(
            Section::new("company-info", "Company"),
            vec![
                Entity::predefined("document-title", "Title")
                    .with_value("INVOICE")
                    .title(),
                Entity::predefined("company-name", "Company Name")
                    .with_placeholder("Your Company"),
                Entity::predefined("company-phone", "Phone")
                    .with_placeholder("(555) 123-4567"),
                Entity::predefined("company-email", "Email")
                    .with_placeholder("name@company.com"),
                Entity::predefined("company-address", "Address")
                    .with_placeholder("123 Main St"),
            ],
        );

        doc.seed_section(
            Section::new("client-info", "Bill To"),
            vec![
                Entity::predefined("client-name", "Client Name").with_placeholder("Client Name"),
                Entity::predefined("client-address", "Client Address")
                    .with_placeholder("Client Address"),
            ],
        );

        doc.seed_table(
            Table::new("line-items", "Items"),
            vec![
                Entity::predefined("itemNumber", "Item #"),
                Entity::predefined("description", "Description"),
                Entity::predefined("qty", "Qty"),
                Entity::predefined("rate", "Rate"),
                Entity::predefined("amount", "Amount").calculated(),
            ],
        );

        doc.seed_section(
            Section::new("totals", "Totals"),
            vec![
                Entity::predefined("subtotal", "Subtotal").calculated(),
                Entity::predefined("tax-rate", "Tax Rate (%)").with_placeholder("0"),
                Entity::predefined("tax", "Tax").calculated(),
                Entity::predefined("total", "Total").calculated(),
            ],
        );

        doc.seed_section(
            Section::new("notes", "Notes").with_main_field("notes-text"),
            vec![Entity::predefined("notes-text", "Notes")
                .with_placeholder("Payment terms, thank-you note, ...")],
        );

        doc.page.groups.push(
            Group::new("header", "Header")
                .with_member(MemberRef::Section("company-info".to_string()))
                .with_member(MemberRef::Section("client-info".to_string())),
        );
        doc.page.groups.push(
            Group::new("body", "Body").with_member(MemberRef::Table("line-items".to_string())),
        );
        doc.page.groups.push(
            Group::new("footer", "Footer")
                .with_member(MemberRef::Section("totals".to_string()))
                .with_member(MemberRef::Section("notes".to_string())),
        );
        doc.orders.set_order(
            PAGE_SCOPE,
            vec![
                "header".to_string(),
                "body".to_string(),
                "footer".to_string(),
            ],
        );
        for group in &doc.page.groups {
            doc.orders.set_order(
                group.id.clone(),
                group.members.iter().map(|m| m.id().to_string()).collect(),
            );
        }

        doc
    }

    fn seed_section(&mut self, section: Section, fields: Vec<Entity>) {
        let scope = section.id.clone();
        self.page.sections.push(section);
        let ids = fields.iter().map(|e| e.id.clone()).collect();
        for field in fields {
            self.store.add(&scope, field);
        }
        self.orders.set_order(scope, ids);
    }

    fn seed_table(&mut self, table: Table, columns: Vec<Entity>) {
        let scope = table.id.clone();
        self.page.tables.push(table);
        let ids = columns.iter().map(|e| e.id.clone()).collect();
        for column in columns {
            self.store.add(&scope, column);
        }
        self.orders.set_order(scope, ids);
    }

    /// Apply a mutation with validation. The version bumps only when the
    /// mutation actually applied; a rejected mutation leaves every part of
    /// the document unchanged.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        mutation.validate(self)?;
        mutation.apply(self)?;
        self.version += 1;
        Ok(())
    }

    /// Allocate a fresh namespaced id for a user-added entity
    pub(crate) fn allocate_custom_id(&mut self) -> String {
        self.ids.next_id()
    }

    pub fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    /// Parse a provider payload and apply the suggestions atomically:
    /// a payload that cannot be parsed (even after salvage) changes
    /// nothing. Returns the number of matched fields.
    pub fn apply_suggestion_payload(&mut self, raw: &str) -> Result<usize, SuggestError> {
        let suggestions = parse_suggestion_payload(raw)?;

        let mut applied = 0;
        let section_ids: Vec<String> =
            self.page.sections.iter().map(|s| s.id.clone()).collect();
        for section_id in section_ids {
            applied += apply_suggestions(&suggestions, self.store.entities_mut(&section_id));
        }
        if applied > 0 {
            self.version += 1;
        }
        info!(applied, "Applied suggestion payload");
        Ok(applied)
    }

    /// Run the upstream arithmetic step: row amounts, subtotal, tax and
    /// total. Invoked after edits, never during export.
    pub fn recalculate(&mut self) {
        totals::recalculate(&mut self.page, &mut self.store, &self.normalizer);
    }
}
