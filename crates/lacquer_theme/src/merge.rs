//! Deep-merge for theme values
//!
//! Recursive merge of one value over another, written to preserve
//! allocation identity: when nothing actually changes, the base value's own
//! `Arc` comes back, so reference-equality memoization downstream keeps
//! working across no-op updates.

use std::sync::Arc;

use crate::value::{Value, ValueMap};

/// Deep-merge `partial` over `base`.
///
/// For every key present in `partial`:
/// - identical values (see [`Value::identity_eq`]) are skipped,
/// - a `Null` on either side lets the present side win outright,
/// - two maps recurse,
/// - anything else (primitives, lists, type mismatch) is replaced wholesale
///   by `partial`'s value; lists are never element-merged.
///
/// Neither input is mutated. Output maps are allocated lazily: a subtree
/// with no net change keeps `base`'s allocation. Cyclic input is out of
/// contract (the value model offers no way to build one).
pub fn merge(base: &Value, partial: &Value) -> Value {
    if base.identity_eq(partial) {
        return base.clone();
    }
    match (base, partial) {
        (Value::Null, _) => partial.clone(),
        (_, Value::Null) => base.clone(),
        (Value::Map(base_map), Value::Map(partial_map)) => {
            merge_maps(base, base_map, partial_map)
        }
        _ => partial.clone(),
    }
}

fn merge_maps(base: &Value, base_map: &Arc<ValueMap>, partial_map: &Arc<ValueMap>) -> Value {
    // Allocated on the first real change; `None` means "still identical".
    let mut changed: Option<ValueMap> = None;

    for (key, incoming) in partial_map.iter() {
        match base_map.get(key) {
            Some(existing) => {
                if existing.identity_eq(incoming) {
                    continue;
                }
                let merged = merge(existing, incoming);
                if !merged.identity_eq(existing) {
                    changed
                        .get_or_insert_with(|| (**base_map).clone())
                        .insert(key.clone(), merged);
                }
            }
            None => {
                if !incoming.is_null() {
                    changed
                        .get_or_insert_with(|| (**base_map).clone())
                        .insert(key.clone(), incoming.clone());
                }
            }
        }
    }

    match changed {
        Some(map) => Value::Map(Arc::new(map)),
        None => base.clone(),
    }
}
