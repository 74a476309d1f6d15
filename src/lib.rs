//! # any2csv
//!
//! A Rust library for converting Anytype protobuf export archives into a
//! single pipe-delimited CSV table.
//!
//! ## Overview
//!
//! An export is a ZIP archive of protobuf records split into collections
//! (`types`, `relations`, `relationsOptions`, `objects`). Records reference
//! each other by key. This library provides:
//!
//! - Extracting export archives
//! - Loading records and indexing type, relation and object names
//! - Decoding fields by the format each record declares for them
//! - Resolving references to the display name of the referenced record
//! - Projecting object records into rows, with type and field allowlists
//! - Writing the table as `|`-delimited text
//!
//! ## Example - Whole archive
//!
//! ```rust,no_run
//! use any2csv::{convert_archive, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let options = ConvertOptions {
//!         types: Some(vec!["Task".to_string()]),
//!         ..Default::default()
//!     };
//!     let report = convert_archive(Path::new("Anytype.zip"), &options)?;
//!     println!("{} rows in {}", report.rows, report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Example - Step by step
//!
//! ```rust,no_run
//! use any2csv::{
//!     project, DateZone, ExportTree, FieldDecoder, ProjectionFilter, ReferenceIndex, Resolver,
//!     UnresolvedCounters,
//! };
//! use any2csv::snapshot::load_record;
//! use any2csv::tree::Collection;
//!
//! fn main() -> anyhow::Result<()> {
//!     let tree = ExportTree::new("Anytype")?;
//!     let index = ReferenceIndex::build(&tree);
//!
//!     let records: Vec<_> = tree
//!         .record_files(Collection::Objects)
//!         .iter()
//!         .filter_map(load_record)
//!         .collect();
//!
//!     let mut unresolved = UnresolvedCounters::new();
//!     let mut decoder = FieldDecoder::new(Resolver::new(&tree), DateZone::Local);
//!     let table = project(
//!         &records,
//!         &index,
//!         &mut decoder,
//!         &ProjectionFilter::default(),
//!         &mut unresolved,
//!     )?;
//!
//!     any2csv::sink::write_table(&table, "out.csv".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod convert;
pub mod counters;
pub mod decoder;
pub mod dump;
pub mod error;
pub mod index;
pub mod projector;
pub mod resolver;
pub mod sink;
pub mod snapshot;
pub mod tree;
pub mod utils;

pub use convert::{build_csv, convert_archive, ConversionReport, ConvertOptions};
pub use counters::UnresolvedCounters;
pub use decoder::{DateZone, DisplayValue, FieldDecoder};
pub use error::{Error, Result};
pub use index::ReferenceIndex;
pub use projector::{project, ProjectionFilter, Row, Table};
pub use resolver::Resolver;
pub use snapshot::Record;
pub use tree::ExportTree;
pub use utils::parse_list;
