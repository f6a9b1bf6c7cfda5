// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
    #[error("line {line}: expected 3 columns, found {found}")]
    MissingColumn { line: usize, found: usize },
    #[error("line {line}, column {column}: invalid number {value:?}")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("{} contains no data rows", .path.display())]
    Empty { path: PathBuf },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("viewer failed: {0}")]
    Viewer(String),
}
