mod resource_key;

pub use resource_key::{ResourceKey, KUBERNETES_NONE, SERVICE_KIND_NAME};

pub fn create_id(name: &str, namespace: &str) -> String {
    namespace.to_owned() + "." + name
}

/// Cuts `value` down to at most `max_chars` characters, never splitting a character.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => value[..end].to_owned(),
        None => value.to_owned(),
    }
}
