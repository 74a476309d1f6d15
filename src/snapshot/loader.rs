//! Record loading from `.pb` files

use prost::Message;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::record::Record;
use super::types::SnapshotWithType;
use crate::error::{Error, Result};

/// Read and decode one record file
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<Record> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let snapshot = SnapshotWithType::decode(data.as_slice()).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Record::from_snapshot(snapshot))
}

/// Load a record, treating a missing and a corrupt file alike as absent
///
/// Decode failures are logged; read failures are expected during reference
/// probing and only show up at debug level.
pub fn load_record<P: AsRef<Path>>(path: P) -> Option<Record> {
    let path = path.as_ref();
    match read_record(path) {
        Ok(record) => Some(record),
        Err(Error::Io(e)) => {
            debug!("No record at {}: {}", path.display(), e);
            None
        }
        Err(e) => {
            warn!("Error parsing protobuf message: {}", e);
            None
        }
    }
}
