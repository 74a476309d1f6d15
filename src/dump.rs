//! Human-readable dumps of raw records for inspection

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::snapshot::load_record;
use crate::tree::{Collection, ExportTree};

/// Collections dumped in debug mode
pub const DUMP_COLLECTIONS: [Collection; 3] =
    [Collection::Types, Collection::Relations, Collection::Objects];

/// Write `<file name>.data` for every record file of `collection`
///
/// Records that fail to load are dumped as `None`.
///
/// # Returns
/// Number of dump files written
pub fn dump_collection(tree: &ExportTree, collection: Collection, data_dir: &Path) -> Result<usize> {
    let mut written = 0;
    for path in tree.record_files(collection) {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let text = match load_record(&path) {
            Some(record) => format!("{:#?}", record.snapshot()),
            None => "None".to_string(),
        };

        let mut dump_name = file_name.to_os_string();
        dump_name.push(".data");
        fs::write(data_dir.join(dump_name), text)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RecordBuilder;

    #[test]
    fn test_dump_collection() {
        let dir = tempfile::tempdir().unwrap();
        let types = dir.path().join("types");
        fs::create_dir_all(&types).unwrap();
        fs::write(types.join("t1.pb"), RecordBuilder::new().name("Task").encode()).unwrap();
        fs::write(types.join("bad.pb"), [0x12, 0x40, 0x01]).unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();

        let tree = ExportTree::new(dir.path()).unwrap();
        assert_eq!(dump_collection(&tree, Collection::Types, &data_dir).unwrap(), 2);

        let dumped = fs::read_to_string(data_dir.join("t1.pb.data")).unwrap();
        assert!(dumped.contains("Task"));
        assert_eq!(fs::read_to_string(data_dir.join("bad.pb.data")).unwrap(), "None");
    }
}
