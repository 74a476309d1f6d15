//! Reference resolution across record collections

use std::collections::HashMap;
use tracing::debug;

use crate::counters::UnresolvedCounters;
use crate::snapshot::load_record;
use crate::tree::{Collection, ExportTree};

/// Collections probed for a reference key, first hit wins
pub const RESOLUTION_ORDER: [Collection; 4] = [
    Collection::RelationOptions,
    Collection::Objects,
    Collection::Relations,
    Collection::Types,
];

/// Resolves reference keys to the display name of the referenced record
///
/// Lookups are memoized for the lifetime of the resolver. Unresolved keys are
/// still counted once per occurrence.
#[derive(Debug)]
pub struct Resolver<'a> {
    tree: &'a ExportTree,
    cache: HashMap<String, Option<String>>,
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a ExportTree) -> Self {
        Self {
            tree,
            cache: HashMap::new(),
        }
    }

    /// Display name for `reference_key`, or `""` when nothing matches
    pub fn resolve(&mut self, reference_key: &str, unresolved: &mut UnresolvedCounters) -> String {
        if reference_key.is_empty() {
            return String::new();
        }

        let tree = self.tree;
        let name = self
            .cache
            .entry(reference_key.to_string())
            .or_insert_with(|| lookup(tree, reference_key));

        match name {
            Some(name) => name.clone(),
            None => {
                unresolved.record_unknown_option(reference_key);
                String::new()
            }
        }
    }
}

fn lookup(tree: &ExportTree, reference_key: &str) -> Option<String> {
    if !is_plain_id(reference_key) {
        debug!("Refusing to probe reference key {:?}", reference_key);
        return None;
    }

    RESOLUTION_ORDER.iter().find_map(|&collection| {
        let record = load_record(tree.record_path(collection, reference_key))?;
        debug!(
            "Resolved {} in {}",
            reference_key,
            collection.dir_name()
        );
        Some(record.name().to_string())
    })
}

/// Whether a key names a file directly inside a collection directory
fn is_plain_id(key: &str) -> bool {
    key != "." && key != ".." && !key.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RecordBuilder;
    use std::fs;
    use std::path::Path;

    fn write_named(root: &Path, collection: Collection, id: &str, name: &str) {
        let dir = root.join(collection.dir_name());
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.pb", id)),
            RecordBuilder::new().name(name).encode(),
        )
        .unwrap();
    }

    #[test]
    fn test_empty_key_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut counters = UnresolvedCounters::new();

        assert_eq!(Resolver::new(&tree).resolve("", &mut counters), "");
        assert!(counters.is_empty());
    }

    #[test]
    fn test_resolves_from_any_single_collection() {
        for collection in Collection::ALL {
            let dir = tempfile::tempdir().unwrap();
            write_named(dir.path(), collection, "ref", collection.dir_name());
            let tree = ExportTree::new(dir.path()).unwrap();
            let mut counters = UnresolvedCounters::new();

            let name = Resolver::new(&tree).resolve("ref", &mut counters);
            assert_eq!(name, collection.dir_name());
            assert!(counters.is_empty());
        }
    }

    #[test]
    fn test_probe_order_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write_named(dir.path(), Collection::Types, "dup", "from types");
        write_named(dir.path(), Collection::Relations, "dup", "from relations");
        write_named(dir.path(), Collection::Objects, "dup", "from objects");
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut counters = UnresolvedCounters::new();
        let mut resolver = Resolver::new(&tree);

        assert_eq!(resolver.resolve("dup", &mut counters), "from objects");

        write_named(dir.path(), Collection::RelationOptions, "dup2", "from options");
        write_named(dir.path(), Collection::Types, "dup2", "from types");
        assert_eq!(resolver.resolve("dup2", &mut counters), "from options");
    }

    #[test]
    fn test_corrupt_record_falls_through_to_next_collection() {
        let dir = tempfile::tempdir().unwrap();
        let options = dir.path().join("relationsOptions");
        fs::create_dir_all(&options).unwrap();
        fs::write(options.join("k.pb"), [0x12, 0x40, 0x01]).unwrap();
        write_named(dir.path(), Collection::Types, "k", "Task");
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut counters = UnresolvedCounters::new();

        assert_eq!(Resolver::new(&tree).resolve("k", &mut counters), "Task");
    }

    #[test]
    fn test_unresolved_counted_per_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut counters = UnresolvedCounters::new();
        let mut resolver = Resolver::new(&tree);

        assert_eq!(resolver.resolve("ghost", &mut counters), "");
        assert_eq!(resolver.resolve("ghost", &mut counters), "");
        assert_eq!(resolver.resolve("other", &mut counters), "");
        assert_eq!(counters.unknown_options["ghost"], 2);
        assert_eq!(counters.unknown_options["other"], 1);
    }

    #[test]
    fn test_path_like_keys_are_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        write_named(dir.path(), Collection::Types, "t1", "Task");
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut counters = UnresolvedCounters::new();

        assert_eq!(Resolver::new(&tree).resolve("../types/t1", &mut counters), "");
        assert_eq!(counters.unknown_options["../types/t1"], 1);
    }
}
