use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved scope id for the page's group order
pub const PAGE_SCOPE: &str = "page";

/// Reference to a group member, carrying its structural kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum MemberRef {
    Section(String),
    Table(String),
}

impl MemberRef {
    pub fn id(&self) -> &str {
        match self {
            MemberRef::Section(id) | MemberRef::Table(id) => id,
        }
    }
}

/// A run of labeled fields; field entities live in the EntityStore under
/// the section id, field order in the OrderModel under the section id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    /// Designated main field of a free-text section, protected from removal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_field: Option<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            main_field: None,
        }
    }

    pub fn with_main_field(mut self, field_id: impl Into<String>) -> Self {
        self.main_field = Some(field_id.into());
        self
    }
}

/// One table row: a mapping from column key to cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

/// A table: column entities live in the EntityStore under the table id,
/// column order in the OrderModel under the table id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub label: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            rows: Vec::new(),
        }
    }
}

/// A named run of sections and tables; member order in the OrderModel under
/// the group id, with `members` insertion order as the natural fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub members: Vec<MemberRef>,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberRef) -> Self {
        self.members.push(member);
        self
    }
}

/// Root of the document model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub groups: Vec<Group>,
    pub sections: Vec<Section>,
    pub tables: Vec<Table>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn find_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn find_table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn find_table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }
}
