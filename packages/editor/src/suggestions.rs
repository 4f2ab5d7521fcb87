use docsmith_model::Entity;
use std::collections::HashMap;
use tracing::debug;

/// Flat field id (or label) → suggested value map from the provider
pub type SuggestionMap = HashMap<String, String>;

/// Apply provider suggestions to one entity collection.
///
/// Matching per key: exact entity id first, then a case- and
/// punctuation-insensitive label comparison. Unmatched keys are dropped
/// silently. Returns the number of entities updated.
pub fn apply_suggestions(suggestions: &SuggestionMap, entities: &mut [Entity]) -> usize {
    let mut applied = 0;

    for (key, value) in suggestions {
        if let Some(entity) = entities.iter_mut().find(|e| e.id == *key) {
            entity.value = value.clone();
            applied += 1;
            continue;
        }

        let needle = normalize_label(key);
        if let Some(entity) = entities
            .iter_mut()
            .find(|e| normalize_label(&e.label) == needle)
        {
            entity.value = value.clone();
            applied += 1;
            continue;
        }

        debug!(key = %key, "Dropping unmatched suggestion key");
    }

    applied
}

/// Lowercased alphanumerics only: "Company Name:" == "company-name"
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
