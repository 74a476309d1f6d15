//! Programmatic construction of records

use prost::Message;
use prost_types::value::Kind;
use prost_types::{ListValue, Struct, Value};
use std::collections::BTreeMap;

use super::record::{Record, NAME_FIELD};
use super::types::{RelationFormat, RelationLink, Snapshot, SnapshotData, SnapshotWithType};

/// Builder for [`Record`] values and their encoded `.pb` bytes
///
/// ```rust
/// use any2csv::snapshot::{RecordBuilder, RelationFormat};
///
/// let record = RecordBuilder::new()
///     .name("Object type")
///     .key("k1")
///     .build();
/// assert_eq!(record.name(), "Object type");
///
/// let bytes = RecordBuilder::new()
///     .list("k1", ["type-a"])
///     .link("k1", RelationFormat::Object)
///     .encode();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    key: String,
    fields: BTreeMap<String, Value>,
    links: Vec<RelationLink>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the internal unique key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the `name` detail field
    pub fn name(self, name: impl Into<String>) -> Self {
        self.text(NAME_FIELD, name)
    }

    pub fn value(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn text(self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.value(field, kind(Kind::StringValue(text.into())))
    }

    pub fn number(self, field: impl Into<String>, number: f64) -> Self {
        self.value(field, kind(Kind::NumberValue(number)))
    }

    pub fn checkbox(self, field: impl Into<String>, checked: bool) -> Self {
        self.value(field, kind(Kind::BoolValue(checked)))
    }

    /// Set a list of string values (reference keys for tag/status/object)
    pub fn list<I, S>(self, field: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = items
            .into_iter()
            .map(|item| kind(Kind::StringValue(item.into())))
            .collect();
        self.value(field, kind(Kind::ListValue(ListValue { values })))
    }

    /// Declare the format of a field
    pub fn link(self, field: impl Into<String>, format: RelationFormat) -> Self {
        self.link_raw(field, format as i32)
    }

    /// Declare a field with a raw format number, known or not
    pub fn link_raw(mut self, field: impl Into<String>, format: i32) -> Self {
        self.links.push(RelationLink {
            key: field.into(),
            format,
        });
        self
    }

    pub fn build(self) -> Record {
        Record::from_snapshot(SnapshotWithType {
            sb_type: 0,
            snapshot: Some(Snapshot {
                data: Some(SnapshotData {
                    details: Some(Struct {
                        fields: self.fields,
                    }),
                    object_types: Vec::new(),
                    relation_links: self.links,
                    key: self.key,
                }),
            }),
        })
    }

    /// Protobuf wire bytes, as stored in an export
    pub fn encode(self) -> Vec<u8> {
        self.build().snapshot().encode_to_vec()
    }
}

fn kind(kind: Kind) -> Value {
    Value { kind: Some(kind) }
}
