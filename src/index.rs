//! Name and key lookup tables for an export
//!
//! The index is built once per run, before any field is decoded, and is
//! read-only afterwards.

use std::collections::HashMap;
use tracing::debug;

use crate::snapshot::load_record;
use crate::tree::{record_id, Collection, ExportTree};

/// Display name of the relation holding an object's type
pub const OBJECT_TYPE_RELATION: &str = "Object type";

/// Lookup tables for display-name resolution and column renaming
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    /// Type record id -> display name
    pub types: HashMap<String, String>,
    /// Object record id -> display name
    pub objects: HashMap<String, String>,
    /// Relation display name (suffixed on collision) -> internal relation key
    pub relations: HashMap<String, String>,
    /// Internal relation key -> relation display name
    pub revrel: HashMap<String, String>,
}

impl ReferenceIndex {
    /// Scan the `types`, `relations` and `objects` collections of `tree`
    ///
    /// Record files that cannot be loaded contribute nothing.
    pub fn build(tree: &ExportTree) -> Self {
        let mut index = ReferenceIndex {
            types: names_by_id(tree, Collection::Types),
            ..Default::default()
        };

        // Collision suffixes depend on visiting order, which record_files keeps sorted
        for path in tree.record_files(Collection::Relations) {
            if let Some(record) = load_record(&path) {
                index.insert_relation(record.name(), record.key());
            }
        }

        index.objects = names_by_id(tree, Collection::Objects);

        debug!(
            "Indexed {} types, {} relations, {} objects",
            index.types.len(),
            index.relations.len(),
            index.objects.len()
        );
        index
    }

    /// Register a relation, disambiguating its display name if already taken
    ///
    /// Returns the display name the relation was stored under.
    pub fn insert_relation(&mut self, name: &str, key: &str) -> String {
        let mut display = name.to_string();
        let mut suffix = 1u32;
        while self.relations.contains_key(&display) {
            display = format!("{}{}", name, suffix);
            suffix += 1;
        }

        self.relations.insert(display.clone(), key.to_string());
        self.revrel.insert(key.to_string(), display.clone());
        display
    }

    /// Internal key of the "Object type" relation, if the export has one
    pub fn object_type_key(&self) -> Option<&str> {
        self.relations.get(OBJECT_TYPE_RELATION).map(String::as_str)
    }

    /// Column name for a field key, falling back to the key itself
    pub fn display_name<'a>(&'a self, field_key: &'a str) -> &'a str {
        self.revrel
            .get(field_key)
            .map(String::as_str)
            .unwrap_or(field_key)
    }
}

fn names_by_id(tree: &ExportTree, collection: Collection) -> HashMap<String, String> {
    tree.record_files(collection)
        .iter()
        .filter_map(|path| {
            let id = record_id(path)?;
            let record = load_record(path)?;
            Some((id.to_string(), record.name().to_string()))
        })
        .collect()
}
