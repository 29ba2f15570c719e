use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[allow(clippy::upper_case_acronyms)]
pub struct CLI {
    /// Source JSON path
    pub source: PathBuf,

    /// Output CSV path
    pub output: PathBuf,

    /// CSV template name (looked up in the templates directory) or path
    #[arg(short, long)]
    pub template: String,

    /// Optional, JSON key whose value is tabulated, use dot notation for deep properties
    #[arg(short, long)]
    pub key: Option<String>,

    /// Directory searched for `<template>.csv` before the template is tried as a path
    #[arg(long, env = "BUILD_TABLE_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Skip entries whose value is null instead of emitting an all-undefined row
    #[arg(long)]
    pub skip_null_entries: bool,

    /// Print debug messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored messages
    #[arg(long)]
    pub no_color: bool,
}
