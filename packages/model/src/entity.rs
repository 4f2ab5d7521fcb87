use serde::{Deserialize, Serialize};

/// Whether an entity was seeded at initialization or created at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Predefined,
    Custom,
}

/// A single labeled field or table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable id, unique within the owning collection
    pub id: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    /// Value is written by the totals step, never edited directly
    pub is_calculated: bool,
    pub is_title: bool,
    pub provenance: Provenance,
}

impl Entity {
    pub fn predefined(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
            is_calculated: false,
            is_title: false,
            provenance: Provenance::Predefined,
        }
    }

    pub fn custom(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            provenance: Provenance::Custom,
            ..Self::predefined(id, label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn calculated(mut self) -> Self {
        self.is_calculated = true;
        self
    }

    pub fn title(mut self) -> Self {
        self.is_title = true;
        self
    }

    pub fn is_custom(&self) -> bool {
        self.provenance == Provenance::Custom
    }
}
