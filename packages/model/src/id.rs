use serde::{Deserialize, Serialize};

/// Namespace prefix for runtime-created entity ids. Predefined ids never
/// start with this, so collision is structurally impossible.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// Sequential id allocator for user-added entities.
///
/// The counter only moves forward, so an id is never reused within a
/// session even after the entity it named was removed. The id carries no
/// meaning beyond the namespace prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomIdAllocator {
    count: u32,
}

impl CustomIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume allocation from a known counter, e.g. after reimport
    pub fn from_count(count: u32) -> Self {
        Self { count }
    }

    /// Allocate the next id
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}{}", CUSTOM_ID_PREFIX, self.count)
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Whether an id belongs to the custom namespace
pub fn is_custom_id(id: &str) -> bool {
    id.starts_with(CUSTOM_ID_PREFIX)
}
