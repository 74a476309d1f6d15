//! Field decoding by declared format
//!
//! Every record carries its own relation links, so the format of a field is
//! always looked up on the record being decoded, never in a shared schema.
//!
//! | Format | Result |
//! |---|---|
//! | text-like, file, url, email, phone, emoji, relations | raw string |
//! | number | raw number |
//! | date | Unix timestamp converted to a calendar date/time |
//! | checkbox | raw boolean |
//! | status, tag | each list entry resolved, non-empty names joined with `", "` |
//! | object | like status/tag for a list, else the string resolved as one reference |

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use prost_types::Value;
use std::fmt;
use tracing::warn;

use crate::counters::UnresolvedCounters;
use crate::resolver::Resolver;
use crate::snapshot::{
    bool_value, list_values, number_value, string_value, DeclaredFormat, Record, RelationFormat,
};

/// Separator between resolved names of a multi-valued field
pub const LIST_SEPARATOR: &str = ", ";

/// Time zone used to turn timestamps into calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateZone {
    /// The process time zone (honors `TZ`)
    #[default]
    Local,
    Utc,
}

impl DateZone {
    /// Wall-clock time of a Unix timestamp in this zone
    pub fn to_datetime(self, timestamp: f64) -> Option<NaiveDateTime> {
        if !timestamp.is_finite() {
            return None;
        }
        let secs = timestamp.floor();
        let nanos = ((timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
        let utc = DateTime::<Utc>::from_timestamp(secs as i64, nanos)?;
        Some(match self {
            DateZone::Local => utc.with_timezone(&Local).naive_local(),
            DateZone::Utc => utc.naive_utc(),
        })
    }
}

/// A decoded, display-ready field value
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Checkbox(bool),
}

impl DisplayValue {
    pub fn empty() -> Self {
        DisplayValue::Text(String::new())
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Number(number) => write!(f, "{}", number),
            DisplayValue::Date(date) if date.nanosecond() == 0 => {
                write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S"))
            }
            DisplayValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S%.6f")),
            DisplayValue::Checkbox(true) => f.write_str("True"),
            DisplayValue::Checkbox(false) => f.write_str("False"),
        }
    }
}

/// Turns raw record fields into display values
#[derive(Debug)]
pub struct FieldDecoder<'a> {
    resolver: Resolver<'a>,
    zone: DateZone,
}

impl<'a> FieldDecoder<'a> {
    pub fn new(resolver: Resolver<'a>, zone: DateZone) -> Self {
        Self { resolver, zone }
    }

    /// Decode the field `field_key` of `record`
    ///
    /// A field the record declares no format for decodes to empty text without
    /// being counted. An unrecognized format is counted in `unknown_types`.
    pub fn decode(
        &mut self,
        record: &Record,
        field_key: &str,
        unresolved: &mut UnresolvedCounters,
    ) -> DisplayValue {
        let raw = record.field(field_key);

        let format = match record.declared_format(field_key) {
            Some(DeclaredFormat::Known(format)) => format,
            Some(DeclaredFormat::Unrecognized(_)) => {
                unresolved.record_unknown_type(field_key);
                return DisplayValue::empty();
            }
            None => return DisplayValue::empty(),
        };

        match format {
            RelationFormat::Longtext
            | RelationFormat::Shorttext
            | RelationFormat::File
            | RelationFormat::Url
            | RelationFormat::Email
            | RelationFormat::Phone
            | RelationFormat::Emoji
            | RelationFormat::Relations => DisplayValue::Text(string_value(raw).to_string()),
            RelationFormat::Number => DisplayValue::Number(number_value(raw)),
            RelationFormat::Checkbox => DisplayValue::Checkbox(bool_value(raw)),
            RelationFormat::Date => {
                let timestamp = number_value(raw);
                match self.zone.to_datetime(timestamp) {
                    Some(date) => DisplayValue::Date(date),
                    None => {
                        warn!("Timestamp {} of {} is out of range", timestamp, field_key);
                        DisplayValue::empty()
                    }
                }
            }
            RelationFormat::Status | RelationFormat::Tag => {
                DisplayValue::Text(self.resolve_list(list_values(raw), unresolved))
            }
            RelationFormat::Object => {
                let items = list_values(raw);
                if items.is_empty() {
                    DisplayValue::Text(self.resolver.resolve(string_value(raw), unresolved))
                } else {
                    DisplayValue::Text(self.resolve_list(items, unresolved))
                }
            }
        }
    }

    fn resolve_list(&mut self, items: &[Value], unresolved: &mut UnresolvedCounters) -> String {
        let mut names = Vec::with_capacity(items.len());
        for item in items {
            let name = self.resolver.resolve(string_value(Some(item)), unresolved);
            if !name.is_empty() {
                names.push(name);
            }
        }
        names.join(LIST_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RecordBuilder;
    use crate::tree::{Collection, ExportTree};
    use chrono::NaiveDate;
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

    fn decode(root: &Path, record: &Record, key: &str) -> (DisplayValue, UnresolvedCounters) {
        let tree = ExportTree::new(root).unwrap();
        let mut decoder = FieldDecoder::new(Resolver::new(&tree), DateZone::Utc);
        let mut counters = UnresolvedCounters::new();
        let value = decoder.decode(record, key, &mut counters);
        (value, counters)
    }

    #[test]
    fn test_undeclared_field_is_empty_and_uncounted() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new().text("k1", "hello").build();

        let (value, counters) = decode(dir.path(), &record, "k1");
        assert_eq!(value, DisplayValue::empty());
        assert!(counters.is_empty());
    }

    #[test]
    fn test_unrecognized_format_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new()
            .text("k1", "hello")
            .link_raw("k1", 42)
            .build();

        let (value, counters) = decode(dir.path(), &record, "k1");
        assert_eq!(value, DisplayValue::empty());
        assert_eq!(counters.unknown_types["k1"], 1);
    }

    #[test]
    fn test_pass_through_formats() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new()
            .text("title", "Groceries")
            .link("title", RelationFormat::Shorttext)
            .text("site", "https://example.org")
            .link("site", RelationFormat::Url)
            .number("cost", 12.5)
            .link("cost", RelationFormat::Number)
            .checkbox("done", true)
            .link("done", RelationFormat::Checkbox)
            .text("scan", "files/receipt.pdf")
            .link("scan", RelationFormat::File)
            .text("mail", "ann@example.org")
            .link("mail", RelationFormat::Email)
            .text("tel", "+32 2 123 45 67")
            .link("tel", RelationFormat::Phone)
            .text("icon", "🛒")
            .link("icon", RelationFormat::Emoji)
            .text("rel", "rel-key")
            .link("rel", RelationFormat::Relations)
            .build();

        assert_eq!(
            decode(dir.path(), &record, "title").0,
            DisplayValue::Text("Groceries".into())
        );
        assert_eq!(
            decode(dir.path(), &record, "site").0,
            DisplayValue::Text("https://example.org".into())
        );
        assert_eq!(decode(dir.path(), &record, "cost").0, DisplayValue::Number(12.5));
        assert_eq!(decode(dir.path(), &record, "done").0, DisplayValue::Checkbox(true));

        for (key, expected) in [
            ("scan", "files/receipt.pdf"),
            ("mail", "ann@example.org"),
            ("tel", "+32 2 123 45 67"),
            ("icon", "🛒"),
            ("rel", "rel-key"),
        ] {
            let (value, counters) = decode(dir.path(), &record, key);
            assert_eq!(value, DisplayValue::Text(expected.into()), "field {}", key);
            assert!(counters.is_empty());
        }
    }

    #[test]
    fn test_date_in_utc() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new()
            .number("due", 1_700_000_000.0)
            .link("due", RelationFormat::Date)
            .build();

        let expected = NaiveDate::from_ymd_opt(2023, 11, 14)
            .unwrap()
            .and_hms_opt(22, 13, 20)
            .unwrap();
        let (value, _) = decode(dir.path(), &record, "due");
        assert_eq!(value, DisplayValue::Date(expected));
        assert_eq!(value.to_string(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_date_in_local_zone() {
        use chrono::TimeZone;

        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap()
            .naive_local();
        assert_eq!(DateZone::default(), DateZone::Local);
        assert_eq!(DateZone::Local.to_datetime(1_700_000_000.0), Some(expected));

        let dir = tempfile::tempdir().unwrap();
        let tree = ExportTree::new(dir.path()).unwrap();
        let mut decoder = FieldDecoder::new(Resolver::new(&tree), DateZone::default());
        let mut counters = UnresolvedCounters::new();
        let record = RecordBuilder::new()
            .number("due", 1_700_000_000.0)
            .link("due", RelationFormat::Date)
            .build();
        assert_eq!(
            decoder.decode(&record, "due", &mut counters),
            DisplayValue::Date(expected)
        );
    }

    #[test]
    fn test_date_out_of_range_is_empty() {
        assert!(DateZone::Utc.to_datetime(1e300).is_none());
        assert!(DateZone::Utc.to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_tag_list_skips_unresolved_entries() {
        let dir = tempfile::tempdir().unwrap();
        write_named(dir.path(), Collection::RelationOptions, "x", "Red");
        let record = RecordBuilder::new()
            .list("tags", ["x", "y"])
            .link("tags", RelationFormat::Tag)
            .build();

        let (value, counters) = decode(dir.path(), &record, "tags");
        assert_eq!(value, DisplayValue::Text("Red".into()));
        assert_eq!(counters.unknown_options["y"], 1);
    }

    #[test]
    fn test_status_list_joins_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_named(dir.path(), Collection::RelationOptions, "a", "Alpha");
        write_named(dir.path(), Collection::RelationOptions, "b", "Beta");
        let record = RecordBuilder::new()
            .list("st", ["b", "", "a"])
            .link("st", RelationFormat::Status)
            .build();

        let (value, counters) = decode(dir.path(), &record, "st");
        assert_eq!(value, DisplayValue::Text("Beta, Alpha".into()));
        assert!(counters.is_empty());
    }

    #[test]
    fn test_empty_list_is_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new()
            .list("tags", Vec::<String>::new())
            .link("tags", RelationFormat::Tag)
            .build();

        assert_eq!(decode(dir.path(), &record, "tags").0, DisplayValue::empty());
    }

    #[test]
    fn test_object_single_and_multi_valued() {
        let dir = tempfile::tempdir().unwrap();
        write_named(dir.path(), Collection::Types, "t1", "Task");
        write_named(dir.path(), Collection::Objects, "o1", "Alice");
        write_named(dir.path(), Collection::Objects, "o2", "Bob");
        let record = RecordBuilder::new()
            .text("type", "t1")
            .link("type", RelationFormat::Object)
            .list("people", ["o1", "o2"])
            .link("people", RelationFormat::Object)
            .build();

        assert_eq!(
            decode(dir.path(), &record, "type").0,
            DisplayValue::Text("Task".into())
        );
        assert_eq!(
            decode(dir.path(), &record, "people").0,
            DisplayValue::Text("Alice, Bob".into())
        );
    }

    #[test]
    fn test_single_object_reference_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let record = RecordBuilder::new()
            .text("owner", "obj-gone")
            .link("owner", RelationFormat::Object)
            .build();

        let (value, counters) = decode(dir.path(), &record, "owner");
        assert_eq!(value, DisplayValue::empty());
        assert_eq!(counters.unknown_options["obj-gone"], 1);
        assert_eq!(counters.unknown_options.len(), 1);
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(DisplayValue::Number(3.0).to_string(), "3");
        assert_eq!(DisplayValue::Number(2.5).to_string(), "2.5");
        assert_eq!(DisplayValue::Checkbox(false).to_string(), "False");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 250_000)
            .unwrap();
        assert_eq!(
            DisplayValue::Date(date).to_string(),
            "2024-01-02 03:04:05.250000"
        );
    }
}
