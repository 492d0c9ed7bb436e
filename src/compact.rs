//! Compaction pass over the assembled program tree.
//!
//! The tree is walked post-order and rebuilt bottom-up: every child is
//! compacted before its parent decides what to do with the key that holds it.
//! At each mapping level string values are ASCII-folded, then the key is
//! dropped if it is in the removal set, otherwise renamed if it is in the
//! rename map. Removal wins over rename. Sequence elements are compacted and
//! folded but never removed or renamed. Each key is decided exactly once.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde_json::{Map, Value};

use crate::utils::ascii_fold;

/// Which keys to drop and which to shorten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionRules {
    pub remove: BTreeSet<String>,
    pub rename: BTreeMap<String, String>,
}

impl Default for CompactionRules {
    fn default() -> Self {
        let remove = [
            "provenance",
            "paper_id_system",
            "session_id_system",
            "abstract",
            "country",
        ];
        let rename = [
            ("full_name", "name"),
            ("affiliations", "aff"),
            ("institution", "ins"),
            ("session_type", "type"),
            ("paper_id_internal", "pid"),
            ("authors", "aut"),
            ("location", "loc"),
            ("start_time", "start"),
            ("end_time", "end"),
        ];
        Self {
            remove: remove.iter().map(|k| k.to_string()).collect(),
            rename: rename
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl CompactionRules {
    /// Compact a whole tree. Scalars at the root pass through untouched.
    pub fn compact(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.compact_map(map)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| fold_string(self.compact(item)))
                    .collect(),
            ),
            other => other,
        }
    }

    fn compact_map(&self, map: Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        // Keys written by a rename; a plain key of the same name must not clobber them
        let mut renamed: HashSet<String> = HashSet::new();

        for (key, child) in map {
            let child = fold_string(self.compact(child));

            if self.remove.contains(&key) {
                continue;
            }

            match self.rename.get(&key) {
                Some(short) => {
                    out.insert(short.clone(), child);
                    renamed.insert(short.clone());
                }
                None if renamed.contains(&key) => {}
                None => {
                    out.insert(key, child);
                }
            }
        }

        out
    }

    /// True when no removal key and no pre-rename key occurs anywhere in `value`
    pub fn is_compacted(&self, value: &Value) -> bool {
        match value {
            Value::Object(map) => map.iter().all(|(key, child)| {
                !self.remove.contains(key)
                    && !self.rename.contains_key(key)
                    && self.is_compacted(child)
            }),
            Value::Array(items) => items.iter().all(|item| self.is_compacted(item)),
            _ => true,
        }
    }
}

fn fold_string(value: Value) -> Value {
    match value {
        Value::String(s) if !s.is_ascii() => Value::String(ascii_fold(&s)),
        other => other,
    }
}
