//! Two-row CSV templates: display headers, then the key path feeding each column.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use itertools::Itertools;

use crate::error::BuildError;
use crate::logger::Logger;
use crate::path::KeyPath;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub headers: Vec<String>,
    pub key_paths: Vec<KeyPath>,
}

impl Template {
    /// Reads the header row and the key path row. Extra rows are reported and ignored.
    pub fn from_reader<R: Read>(source: R, path: &Path, logger: &dyn Logger) -> Result<Self, BuildError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(2);
        for record in reader.records() {
            let record = record.map_err(|source| BuildError::TemplateRead { path: path.to_path_buf(), source })?;

            if rows.len() == 2 {
                logger.warn("Template file should have only two rows");
                break;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        let mut rows = rows.into_iter();
        let headers = rows.next().unwrap_or_default();
        let keys = rows.next().unwrap_or_default();

        if headers.len() != keys.len() {
            return Err(BuildError::TemplateMisaligned { headers: headers.len(), keys: keys.len() });
        }

        Ok(Self {
            headers,
            key_paths: keys.iter().map(|key| KeyPath::parse(key)).collect(),
        })
    }

    /// Opens the first readable candidate from `locator` and parses it.
    /// The file is closed before this returns, whatever the outcome.
    pub fn load(locator: &TemplateLocator, logger: &dyn Logger) -> Result<Self, BuildError> {
        let (path, file) = locator.open()?;
        logger.debug(&format!("Using template {}", path.display()));

        logger.info("Reading template file...");
        let template = Self::from_reader(file, &path, logger)?;
        logger.info("Template file read successfully");
        logger.debug(&format!(
            "Template columns: {}",
            template.key_paths.iter().map(KeyPath::as_str).join(", ")
        ));

        Ok(template)
    }
}

/// Ordered template lookup: the templates directory first, then the name as a literal path.
#[derive(Debug, Clone)]
pub struct TemplateLocator {
    candidates: Vec<PathBuf>,
}

impl TemplateLocator {
    pub fn new(templates_dir: &Path, name: &str) -> Self {
        let candidates = vec![templates_dir.join(format!("{name}.csv")), PathBuf::from(name)];
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first candidate that opens, stopping there.
    pub fn open(&self) -> Result<(PathBuf, File), BuildError> {
        let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no template candidates");

        for candidate in &self.candidates {
            match File::open(candidate) {
                Ok(file) if file.metadata().map(|meta| meta.is_file()).unwrap_or(false) => {
                    return Ok((candidate.clone(), file));
                }
                Ok(_) => {
                    last_error = io::Error::new(io::ErrorKind::InvalidInput, "not a regular file");
                }
                Err(err) => last_error = err,
            }
        }

        Err(BuildError::TemplateOpen { candidates: self.candidates.clone(), source: last_error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, MemoryLogger};
    use std::fs;

    fn parse(content: &str, logger: &MemoryLogger) -> Result<Template, BuildError> {
        Template::from_reader(content.as_bytes(), Path::new("test.csv"), logger)
    }

    #[test]
    fn reads_headers_and_key_paths() {
        let logger = MemoryLogger::new();
        let template = parse("Status,Region\nstate,location.zone\n", &logger).unwrap();

        assert_eq!(template.headers, vec!["Status", "Region"]);
        assert_eq!(template.key_paths, vec![KeyPath::parse("state"), KeyPath::parse("location.zone")]);
        assert!(logger.messages(Level::Warn).is_empty());
    }

    #[test]
    fn extra_rows_are_ignored_with_a_warning() {
        let logger = MemoryLogger::new();
        let template = parse("A,B\na,b\nx,y\nz,w\n", &logger).unwrap();

        assert_eq!(template.headers, vec!["A", "B"]);
        assert_eq!(template.key_paths, vec![KeyPath::parse("a"), KeyPath::parse("b")]);
        assert_eq!(logger.messages(Level::Warn), vec!["Template file should have only two rows"]);
    }

    #[test]
    fn quoted_cells_are_unescaped() {
        let logger = MemoryLogger::new();
        let template = parse("\"Zone, region\",\"Say \"\"hi\"\"\"\nlocation.zone,greeting\n", &logger).unwrap();

        assert_eq!(template.headers, vec!["Zone, region", "Say \"hi\""]);
    }

    #[test]
    fn misaligned_rows_are_rejected() {
        let logger = MemoryLogger::new();
        let err = parse("A,B,C\na,b\n", &logger).unwrap_err();

        assert!(matches!(err, BuildError::TemplateMisaligned { headers: 3, keys: 2 }));
    }

    #[test]
    fn empty_template_has_no_columns() {
        let logger = MemoryLogger::new();
        let template = parse("", &logger).unwrap();

        assert_eq!(template, Template::default());
    }

    #[test]
    fn locator_prefers_the_templates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();
        fs::write(templates.join("vm.csv"), "Status\nstate\n").unwrap();

        let locator = TemplateLocator::new(&templates, "vm");
        let (path, _) = locator.open().unwrap();

        assert_eq!(path, templates.join("vm.csv"));
    }

    #[test]
    fn locator_falls_back_to_a_literal_path() {
        let dir = tempfile::tempdir().unwrap();
        let literal = dir.path().join("custom.csv");
        fs::write(&literal, "Status\nstate\n").unwrap();

        let name = literal.to_str().unwrap();
        let locator = TemplateLocator::new(&dir.path().join("templates"), name);
        let (path, _) = locator.open().unwrap();

        assert_eq!(path, literal);
    }

    #[test]
    fn locator_reports_every_candidate_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let locator = TemplateLocator::new(dir.path(), "missing");

        match locator.open() {
            Err(BuildError::TemplateOpen { candidates, .. }) => {
                assert_eq!(candidates, vec![dir.path().join("missing.csv"), PathBuf::from("missing")]);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn load_logs_progress() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vm.csv"), "Status\nstate\n").unwrap();

        let logger = MemoryLogger::new();
        let template = Template::load(&TemplateLocator::new(dir.path(), "vm"), &logger).unwrap();

        assert_eq!(template.headers, vec!["Status"]);
        assert_eq!(
            logger.messages(Level::Info),
            vec!["Reading template file...", "Template file read successfully"]
        );
    }
}
