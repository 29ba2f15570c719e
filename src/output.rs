use std::io::{self, Write};
use std::path::Path;

use csv::WriterBuilder;
use tempfile::NamedTempFile;

use crate::error::BuildError;
use crate::table::Table;

/// Writes the table as CSV, header first. Rows are allowed to differ in width.
pub fn write_csv<W: Write>(output: W, table: &Table) -> io::Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(output);

    for record in table.records() {
        writer.write_record(record)?;
    }

    writer.flush()
}

/// Writes the whole table to `path` or nothing at all: the CSV goes to a temporary
/// file next to `path` which then replaces it.
pub fn write_table(path: &Path, table: &Table) -> Result<(), BuildError> {
    let write_error = |source: io::Error| BuildError::OutputWrite { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    write_csv(staged.as_file_mut(), table).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(path).map_err(|err| write_error(err.error))?;

    Ok(())
}
