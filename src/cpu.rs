// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;

use std::path::PathBuf;

const CPUINFO: &str = "/proc/cpuinfo";

/// Model name of the first processor listed in `/proc/cpuinfo`.
pub fn model_name() -> Result<String, Error> {
    let content = std::fs::read_to_string(CPUINFO).map_err(|source| Error::Io {
        path: PathBuf::from(CPUINFO),
        source,
    })?;
    parse_model_name(&content)
        .ok_or_else(|| Error::Config(format!("no model name in {}", CPUINFO)))
}

pub fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "model name")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Subtitle text for a model name.
pub fn describe(model: &str) -> String {
    format!("CPU Model Name: {}", model)
}
