//! Lossy context hashing for the resolution cache
//!
//! The cache key concatenates the platform tag, the theme revision, and
//! `key:value` pairs for a small fixed allowlist of prop names. This is a
//! deliberate precision/performance trade-off: props outside the allowlist
//! (or with container values) do not participate, so two contexts that
//! differ only in such a prop share a cache entry. That is safe exactly as
//! long as no rule function reads such a prop; the engine does not broaden
//! the allowlist (cache hit rate) nor reject such rules (capability).

use std::fmt::Write;

use lacquer_theme::Value;

use crate::context::ResolveContext;

/// Prop names that participate in the cache key: the names conventionally
/// used to vary style, not an exhaustive prop scan.
pub const CACHE_KEY_PROPS: [&str; 7] = [
    "variant", "size", "type", "active", "disabled", "focused", "selected",
];

/// True when `key` participates in the cache key
pub fn is_cache_key_prop(key: &str) -> bool {
    CACHE_KEY_PROPS.contains(&key)
}

/// Deterministic cache key for a resolution context
pub fn hash_context(ctx: &ResolveContext<'_>) -> String {
    let mut key = String::with_capacity(48);
    let _ = write!(key, "{}#{}", ctx.platform.as_tag(), ctx.revision);
    for name in CACHE_KEY_PROPS {
        match ctx.prop(name) {
            Some(Value::Str(s)) => {
                let _ = write!(key, "|{name}:{s}");
            }
            Some(Value::Num(n)) => {
                let _ = write!(key, "|{name}:{n}");
            }
            Some(Value::Bool(b)) => {
                let _ = write!(key, "|{name}:{b}");
            }
            // Containers and nulls are ignored, like absent props.
            _ => {}
        }
    }
    key
}
