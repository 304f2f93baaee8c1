use std::fmt::Display;

/// Returns the cache key for a single entity, e.g. `"product:prod-123"`.
pub fn entity_key(entity_type: &str, id: impl Display) -> String {
    format!("{}:{}", entity_type, id)
}
