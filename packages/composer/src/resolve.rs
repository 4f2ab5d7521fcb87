use docsmith_model::Entity;
use std::collections::HashMap;

/// Resolve one entity to a renderable string.
///
/// Precedence, strictly: (1) a non-empty live-capture value for this entity
/// id, (2) the stored value if non-empty, (3) the placeholder, (4) empty.
///
/// Calculated entities skip live capture entirely: their value is written
/// by the totals step before composition runs, and a live reading for a
/// non-editable field can only be stale render output. No arithmetic
/// happens here — this function only selects among available sources.
pub fn resolve(entity: &Entity, live: &HashMap<String, String>) -> String {
    if !entity.is_calculated {
        if let Some(captured) = live.get(&entity.id) {
            if !captured.is_empty() {
                return captured.clone();
            }
        }
    }

    if !entity.value.is_empty() {
        return entity.value.clone();
    }

    entity.placeholder.clone()
}
