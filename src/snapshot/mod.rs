//! Anytype export records
//!
//! Every file of an extracted export is one protobuf-encoded
//! `SnapshotWithType` message. Types, relations, relation options and objects
//! all share this envelope; what distinguishes them is the directory they live
//! in and which detail fields they carry.
//!
//! ## Example
//!
//! ```rust,no_run
//! use any2csv::snapshot::load_record;
//!
//! if let Some(record) = load_record("export/objects/bafy.pb") {
//!     println!("{}", record.name());
//!     for key in record.field_keys() {
//!         println!("  {:?} -> {:?}", key, record.declared_format(key));
//!     }
//! }
//! ```

mod builder;
mod loader;
mod record;
mod types;

pub use builder::RecordBuilder;
pub use loader::{load_record, read_record};
pub use record::{DeclaredFormat, Record, NAME_FIELD};
pub(crate) use record::{bool_value, list_values, number_value, string_value};
pub use types::*;
