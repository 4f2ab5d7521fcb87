use docsmith_model::Page;
use std::collections::HashMap;

/// Collaborator interface of the interactive surface: the one place where
/// live, not-yet-committed edits enter the pipeline. Implementations return
/// entity id → current on-screen value for one scope.
pub trait CaptureSource {
    fn capture_current_values(&self, scope_id: &str) -> HashMap<String, String>;
}

/// Capture source with nothing in flight
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCapture;

impl CaptureSource for NullCapture {
    fn capture_current_values(&self, _scope_id: &str) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Fixed capture data, keyed by scope then entity. Test double and
/// reference implementation.
#[derive(Debug, Clone, Default)]
pub struct StaticCapture {
    scopes: HashMap<String, HashMap<String, String>>,
}

impl StaticCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        scope_id: impl Into<String>,
        entity_id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.scopes
            .entry(scope_id.into())
            .or_default()
            .insert(entity_id.into(), value.into());
    }
}

impl CaptureSource for StaticCapture {
    fn capture_current_values(&self, scope_id: &str) -> HashMap<String, String> {
        self.scopes.get(scope_id).cloned().unwrap_or_default()
    }
}

/// One-shot snapshot taken at the instant export is invoked: every section
/// scope is captured exactly once and merged into a flat entity → value map.
pub fn snapshot(page: &Page, source: &dyn CaptureSource) -> HashMap<String, String> {
    let mut merged = HashMap::new();
    for section in &page.sections {
        merged.extend(source.capture_current_values(&section.id));
    }
    merged
}
