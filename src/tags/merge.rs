//! Tag merge policy

use super::TagSet;

/// Right-biased union of two tag sets.
///
/// Incoming tags replace same-named existing tags wholesale, in the existing
/// tag's position. Tags only in `incoming` follow, in their own order.
pub fn merge(existing: &TagSet, incoming: &TagSet) -> TagSet {
    let mut merged = existing.clone();
    for (name, value) in incoming {
        merged.insert(name.clone(), value.clone());
    }
    merged
}
