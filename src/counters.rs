//! Tallies of values the converter could not interpret

use std::collections::BTreeMap;
use std::fmt;

/// Per-run counts of unknown field formats and unresolved references
///
/// Created empty for each conversion and passed explicitly into decoding, so
/// independent runs never share state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedCounters {
    /// Field key -> occurrences of an unrecognized declared format
    pub unknown_types: BTreeMap<String, usize>,
    /// Reference key -> occurrences of a failed lookup
    pub unknown_options: BTreeMap<String, usize>,
}

impl UnresolvedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unknown_type(&mut self, field_key: &str) {
        *self.unknown_types.entry(field_key.to_string()).or_insert(0) += 1;
    }

    pub fn record_unknown_option(&mut self, reference_key: &str) {
        *self
            .unknown_options
            .entry(reference_key.to_string())
            .or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.unknown_types.is_empty() && self.unknown_options.is_empty()
    }
}

impl fmt::Display for UnresolvedCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unknown types:")?;
        for (key, count) in &self.unknown_types {
            writeln!(f, "{} {}", key, count)?;
        }
        writeln!(f, "Unknown options:")?;
        for (key, count) in &self.unknown_options {
            writeln!(f, "{} {}", key, count)?;
        }
        Ok(())
    }
}
