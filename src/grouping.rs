//! First-seen grouping shared by the audit rules and the analytics.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use crate::models::PayrollRecord;

/// Groups records by a typed composite key.
///
/// Groups come back in the order their key was first encountered, and each
/// group keeps the input order of its records. Accepts a slice or any
/// already-filtered iterator of record references.
pub(crate) fn group_by_first_seen<'a, I, K, F>(records: I, key: F) -> Vec<Vec<&'a PayrollRecord>>
where
    I: IntoIterator<Item = &'a PayrollRecord>,
    K: Eq + Hash,
    F: Fn(&'a PayrollRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&'a PayrollRecord>> = Vec::new();

    for record in records {
        match index.entry(key(record)) {
            Entry::Occupied(slot) => groups[*slot.get()].push(record),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups
}
