// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Loading of benchmark output: one `size,random,sequential` row per array
//! size, with an optional header line.

use crate::Error;

use csv::{ReaderBuilder, StringRecord, Trim};
use logger::debug;

use std::fs::File;
use std::io::Read;
use std::path::Path;

const COLUMNS: usize = 3;

/// One measurement row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// array size in bytes
    pub size: f64,
    /// random access latency in nanoseconds
    pub random: f64,
    /// sequential access latency in nanoseconds
    pub sequential: f64,
}

/// Measurement rows in file order.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Read a dataset from a CSV file. A file without any data rows is an
    /// error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

        let dataset = Self::parse(file).map_err(|e| match e {
            Error::Malformed(source) => Error::Csv {
                path: path.to_owned(),
                source,
            },
            e => e,
        })?;

        if dataset.is_empty() {
            return Err(Error::Empty {
                path: path.to_owned(),
            });
        }

        debug!("loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV rows. The first record is treated as a header and skipped
    /// when any of its leading fields is not a number. Blank lines are
    /// ignored, as are columns after the third.
    pub fn parse<R: Read>(reader: R) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut first = true;

        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }

            if first {
                first = false;
                if is_header(&record) {
                    debug!("skipping header: {:?}", record);
                    continue;
                }
            }

            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            samples.push(parse_row(&record, line)?);
        }

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(size, random latency)` points in row order
    pub fn random(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.size, s.random)).collect()
    }

    /// `(size, sequential latency)` points in row order
    pub fn sequential(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.size, s.sequential)).collect()
    }
}

fn field(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}')
}

fn is_header(record: &StringRecord) -> bool {
    record
        .iter()
        .take(COLUMNS)
        .any(|raw| field(raw).parse::<f64>().is_err())
}

fn parse_row(record: &StringRecord, line: usize) -> Result<Sample, Error> {
    if record.len() < COLUMNS {
        return Err(Error::MissingColumn {
            line,
            found: record.len(),
        });
    }

    // log axes can only place finite values
    let mut values = [0.0; COLUMNS];
    for (column, (value, raw)) in values.iter_mut().zip(record.iter()).enumerate() {
        *value = field(raw)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidNumber {
                line,
                column: column + 1,
                value: raw.to_string(),
            })?;
    }

    Ok(Sample {
        size: values[0],
        random: values[1],
        sequential: values[2],
    })
}
