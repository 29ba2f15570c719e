use std::io;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

/// Fatal failures of a table build. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Error opening template file, tried {}", display_paths(.candidates))]
    TemplateOpen {
        candidates: Vec<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("Error reading template file {}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Template header row has {headers} cells but key row has {keys}")]
    TemplateMisaligned { headers: usize, keys: usize },

    #[error("Error reading json file {}", .path.display())]
    JsonRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing json file {}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error reading json file. Key {key} not found")]
    KeyNotFound { key: String },

    #[error("Cannot build a table from a json {kind}, expected an object")]
    NotTabular { kind: &'static str },

    #[error("Error writing csv file {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|path| path.display().to_string()).join(", ")
}

impl BuildError {
    /// The error message followed by every underlying cause.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }
        messages
    }
}
