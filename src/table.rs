//! Builds the output table: one row per entry of the tabulated JSON value.

use itertools::Itertools;
use serde_json::{Number, Value};

use crate::error::BuildError;
use crate::logger::Logger;
use crate::path::KeyPath;
use crate::template::Template;

/// Label of the entry-name column.
pub const NAME_COLUMN: &str = "Name";

/// Cell text for a key path that resolves to nothing.
pub const UNDEFINED: &str = "undefined";

pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullEntries {
    /// A null entry still produces a row, every cell `undefined`.
    #[default]
    Keep,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Row,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn build(
        source: &Value,
        template: &Template,
        prefix: Option<&str>,
        null_entries: NullEntries,
        logger: &dyn Logger,
    ) -> Result<Self, BuildError> {
        let header = std::iter::once(NAME_COLUMN.to_string())
            .chain(template.headers.iter().cloned())
            .collect_vec();

        let mut rows = Vec::new();
        for (name, value) in entries(source)? {
            let qualified = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.clone(),
            };

            match value {
                Value::Object(_) | Value::Array(_) => {}
                Value::Null if null_entries == NullEntries::Keep => {}
                Value::Null => {
                    logger.warn(&format!("{qualified} is null. Skipping..."));
                    continue;
                }
                _ => {
                    logger.warn(&format!("{qualified} is not an object. Skipping..."));
                    continue;
                }
            }

            rows.push(build_row(name, value, &template.key_paths));
        }

        logger.debug(&format!("Built {} rows", rows.len()));
        Ok(Self { header, rows })
    }

    /// Header first, then data rows in entry order.
    pub fn records(&self) -> impl Iterator<Item = &Row> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

fn entries(source: &Value) -> Result<Vec<(String, &Value)>, BuildError> {
    match source {
        Value::Object(map) => Ok(map.iter().map(|(name, value)| (name.clone(), value)).collect()),
        Value::Array(items) => Ok(items.iter().enumerate().map(|(idx, value)| (idx.to_string(), value)).collect()),
        other => Err(BuildError::NotTabular { kind: kind_of(other) }),
    }
}

fn build_row(name: String, entry: &Value, key_paths: &[KeyPath]) -> Row {
    std::iter::once(name)
        .chain(key_paths.iter().map(|path| match path.resolve(entry) {
            Some(value) => stringify(value),
            None => UNDEFINED.to_string(),
        }))
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cell text for a resolved value.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Number(number) => format_number(number),
        Value::String(value) => value.clone(),
        Value::Array(items) => items.iter().map(array_element).join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn array_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => stringify(other),
    }
}

fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            // -0 prints as 0
            format!("{:.0}", float + 0.0)
        }
        _ => number.to_string(),
    }
}
