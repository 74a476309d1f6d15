//! Layout of an extracted export

use anyhow::Result;
use globset::GlobMatcher;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::{create_glob_matcher, RECORD_PATTERN};

/// Record extension on disk
pub const RECORD_EXTENSION: &str = "pb";

/// A record collection of the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Types,
    Relations,
    RelationOptions,
    Objects,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Types,
        Collection::Relations,
        Collection::RelationOptions,
        Collection::Objects,
    ];

    /// Directory name below the export root
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Types => "types",
            Collection::Relations => "relations",
            Collection::RelationOptions => "relationsOptions",
            Collection::Objects => "objects",
        }
    }
}

/// Root directory of an extracted export
#[derive(Debug, Clone)]
pub struct ExportTree {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl ExportTree {
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            matcher: create_glob_matcher(RECORD_PATTERN)?,
        })
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.dir_name())
    }

    /// Path of the record `<id>.pb` inside `collection`
    pub fn record_path(&self, collection: Collection, id: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    /// All record files of a collection in file-name order
    ///
    /// Only files directly inside the collection directory are records, the
    /// same place `record_path` points at. The order is stable for a given
    /// tree. A missing collection directory yields no files.
    pub fn record_files(&self, collection: Collection) -> Vec<PathBuf> {
        WalkDir::new(self.collection_dir(collection))
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| self.matcher.is_match(path))
            .collect()
    }
}

/// On-disk identifier of a record file (its file stem)
pub fn record_id(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
