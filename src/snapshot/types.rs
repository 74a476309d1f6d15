//! Protobuf message definitions for export snapshots
//!
//! Only the parts of the schema that the converter reads are declared here.
//! Fields that are not listed (blocks, file keys, collections, ...) are skipped
//! by the decoder.

/// Top-level envelope of every `.pb` file in an export
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotWithType {
    /// Smart block type of the snapshot
    #[prost(int32, tag = "1")]
    pub sb_type: i32,
    #[prost(message, optional, tag = "2")]
    pub snapshot: ::core::option::Option<Snapshot>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Snapshot {
    #[prost(message, optional, tag = "2")]
    pub data: ::core::option::Option<SnapshotData>,
}

/// Payload of a snapshot
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SnapshotData {
    /// Field values keyed by internal relation key
    #[prost(message, optional, tag = "2")]
    pub details: ::core::option::Option<::prost_types::Struct>,
    #[prost(string, repeated, tag = "5")]
    pub object_types: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Declared format of each relation used by this record
    #[prost(message, repeated, tag = "7")]
    pub relation_links: ::prost::alloc::vec::Vec<RelationLink>,
    /// Unique key (internal relation key for relation records)
    #[prost(string, tag = "9")]
    pub key: ::prost::alloc::string::String,
}

/// Binds a relation key to its declared format for one record
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RelationLink {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(enumeration = "RelationFormat", tag = "2")]
    pub format: i32,
}

/// Declared format of a relation value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RelationFormat {
    Longtext = 0,
    Shorttext = 1,
    Number = 2,
    Status = 3,
    Date = 4,
    File = 5,
    Checkbox = 6,
    Url = 7,
    Email = 8,
    Phone = 9,
    Emoji = 10,
    Tag = 11,
    Object = 100,
    Relations = 101,
}
