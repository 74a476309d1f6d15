//! Projection of object records into table rows

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use crate::counters::UnresolvedCounters;
use crate::decoder::{DisplayValue, FieldDecoder};
use crate::error::{Error, Result};
use crate::index::ReferenceIndex;
use crate::snapshot::Record;

/// One output row: display column name -> decoded value
pub type Row = BTreeMap<String, DisplayValue>;

/// Optional allowlists applied while projecting
#[derive(Debug, Clone, Default)]
pub struct ProjectionFilter {
    /// Resolved object type names to keep
    pub types: Option<HashSet<String>>,
    /// Display column names to keep
    pub fields: Option<HashSet<String>>,
}

impl ProjectionFilter {
    pub fn new<T, F>(types: Option<T>, fields: Option<F>) -> Self
    where
        T: IntoIterator<Item = String>,
        F: IntoIterator<Item = String>,
    {
        Self {
            types: types.map(|t| t.into_iter().collect()),
            fields: fields.map(|f| f.into_iter().collect()),
        }
    }

    fn keeps_field(&self, column: &str) -> bool {
        self.fields
            .as_ref()
            .map_or(true, |fields| fields.contains(column))
    }
}

/// Rows produced by a projection, in input order
///
/// Rows may have different column sets; a column missing from a row is a
/// missing value, not an empty one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of all rows' columns, sorted
    pub fn columns(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect()
    }
}

/// Build a table from object records
///
/// Fails with [`Error::MissingObjectType`] when the index has no
/// "Object type" relation; no partial table is produced in that case.
pub fn project<'r, I>(
    records: I,
    index: &ReferenceIndex,
    decoder: &mut FieldDecoder<'_>,
    filter: &ProjectionFilter,
    unresolved: &mut UnresolvedCounters,
) -> Result<Table>
where
    I: IntoIterator<Item = &'r Record>,
{
    let object_type_key = index.object_type_key().ok_or(Error::MissingObjectType)?;

    let mut table = Table::new();
    for record in records {
        if let Some(types) = &filter.types {
            let object_type = decoder
                .decode(record, object_type_key, unresolved)
                .to_string();
            if !types.contains(&object_type) {
                debug!("Skipping object {:?} of type {:?}", record.name(), object_type);
                continue;
            }
        }

        let mut row = Row::new();
        for field_key in record.field_keys() {
            let column = index.display_name(field_key);
            if !filter.keeps_field(column) {
                continue;
            }
            let value = decoder.decode(record, field_key, unresolved);
            row.insert(column.to_string(), value);
        }
        table.push(row);
    }

    Ok(table)
}
