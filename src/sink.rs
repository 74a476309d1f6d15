//! Pipe-delimited table output

use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::projector::Table;

/// Field delimiter of the output file
pub const DELIMITER: u8 = b'|';

/// Write `table` to a new file at `path`
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_table_to(table, file)
}

/// Write `table` as delimited text
///
/// The header is an empty index cell followed by the sorted column union.
/// Each row starts with its zero-based position; columns a row lacks are
/// left empty.
pub fn write_table_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut out = WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);
    let columns = table.columns();

    let mut header = vec![""];
    header.extend(columns.iter().copied());
    out.write_record(&header)?;

    for (position, row) in table.rows().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(position.to_string());
        for column in &columns {
            record.push(row.get(*column).map(ToString::to_string).unwrap_or_default());
        }
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}
