//! Read-only view over a decoded snapshot

use prost_types::value::Kind;
use prost_types::Value;
use std::collections::BTreeMap;

use super::types::{RelationFormat, SnapshotData, SnapshotWithType};

/// Detail field holding the display name of a record
pub const NAME_FIELD: &str = "name";

/// Format a record declares for one of its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredFormat {
    Known(RelationFormat),
    /// Format number outside the known set
    Unrecognized(i32),
}

impl From<i32> for DeclaredFormat {
    fn from(value: i32) -> Self {
        match RelationFormat::try_from(value) {
            Ok(format) => DeclaredFormat::Known(format),
            Err(_) => DeclaredFormat::Unrecognized(value),
        }
    }
}

/// One export record
///
/// Records are immutable after load. Missing message parts read as their
/// protobuf defaults, so a record without details simply has no fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    snapshot: SnapshotWithType,
}

impl Record {
    pub fn from_snapshot(snapshot: SnapshotWithType) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SnapshotWithType {
        &self.snapshot
    }

    fn data(&self) -> Option<&SnapshotData> {
        self.snapshot.snapshot.as_ref()?.data.as_ref()
    }

    /// Field mapping keyed by internal relation key
    pub fn fields(&self) -> Option<&BTreeMap<String, Value>> {
        self.data()?.details.as_ref().map(|details| &details.fields)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields()?.get(key)
    }

    /// Keys of all fields present on this record, in key order
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    /// Internal unique key (set on relation records)
    pub fn key(&self) -> &str {
        self.data().map(|data| data.key.as_str()).unwrap_or("")
    }

    /// Display name from the `name` detail field
    pub fn name(&self) -> &str {
        string_value(self.field(NAME_FIELD))
    }

    /// Look up the format this record declares for `key`
    ///
    /// The first matching relation link wins. `None` means the record does not
    /// type the field at all.
    pub fn declared_format(&self, key: &str) -> Option<DeclaredFormat> {
        self.data()?
            .relation_links
            .iter()
            .find(|link| link.key == key)
            .map(|link| DeclaredFormat::from(link.format))
    }
}

/// String content of a value, `""` for anything else
pub(crate) fn string_value(value: Option<&Value>) -> &str {
    match value.and_then(|v| v.kind.as_ref()) {
        Some(Kind::StringValue(s)) => s,
        _ => "",
    }
}

/// Numeric content of a value, `0.0` for anything else
pub(crate) fn number_value(value: Option<&Value>) -> f64 {
    match value.and_then(|v| v.kind.as_ref()) {
        Some(Kind::NumberValue(n)) => *n,
        _ => 0.0,
    }
}

pub(crate) fn bool_value(value: Option<&Value>) -> bool {
    matches!(
        value.and_then(|v| v.kind.as_ref()),
        Some(Kind::BoolValue(true))
    )
}

/// Entries of a list value, empty for anything else
pub(crate) fn list_values(value: Option<&Value>) -> &[Value] {
    match value.and_then(|v| v.kind.as_ref()) {
        Some(Kind::ListValue(list)) => &list.values,
        _ => &[],
    }
}
