//! Turns a JSON document into a CSV table, driven by a two-row CSV template.
//!
//! The template's first row holds the column headers, its second row the dotted
//! key path read from each entry. Every entry of the tabulated JSON object
//! becomes one row, `Name` first.

pub mod cli;
pub mod error;
pub mod logger;
pub mod output;
pub mod path;
pub mod table;
pub mod template;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

pub use cli::CLI;
pub use error::BuildError;
pub use logger::{ConsoleLogger, Level, Logger, MemoryLogger};
pub use path::KeyPath;
pub use table::{NullEntries, Table};
pub use template::{Template, TemplateLocator};

/// Runs the whole pipeline: template, JSON, optional key, rows, CSV.
/// Nothing is written unless every step before the write succeeds.
pub fn run(args: &CLI, logger: &dyn Logger) -> Result<Table, BuildError> {
    let locator = TemplateLocator::new(&args.templates_dir, &args.template);
    let template = Template::load(&locator, logger)?;

    let document = read_json(&args.source)?;
    logger.debug(&format!("Loaded {}", args.source.display()));

    let source = select(&document, args.key.as_deref())?;

    let null_entries = if args.skip_null_entries { NullEntries::Skip } else { NullEntries::Keep };
    let table = Table::build(source, &template, args.key.as_deref(), null_entries, logger)?;

    output::write_table(&args.output, &table)?;
    logger.info(&format!("Wrote {} rows to {}", table.rows.len(), args.output.display()));

    Ok(table)
}

pub fn read_json(source: &Path) -> Result<Value, BuildError> {
    let file = File::open(source).map_err(|err| BuildError::JsonRead { path: source.to_path_buf(), source: err })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|err| BuildError::JsonParse { path: source.to_path_buf(), source: err })
}

/// The value the table is built from: the document itself, or the value at `key`.
pub fn select<'a>(document: &'a Value, key: Option<&str>) -> Result<&'a Value, BuildError> {
    let Some(key) = key else {
        return Ok(document);
    };

    match KeyPath::parse(key).resolve(document) {
        None | Some(Value::Null) => Err(BuildError::KeyNotFound { key: key.to_string() }),
        Some(value) => Ok(value),
    }
}
