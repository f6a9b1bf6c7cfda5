// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cache capacity reference lines.

use latencygraph::{hexcolour, RGBColor};

pub const L1_BYTES: u64 = 32 * KIB;
pub const L2_BYTES: u64 = 256 * KIB;
pub const L3_BYTES: u64 = 9 * MIB;

const PAGE_SIZE: u64 = 4096;
const PTE_SIZE: u64 = 8;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

/// The memory size beyond which the page table entries mapping an array of
/// that size no longer fit in half of the last level cache.
pub fn page_table_eviction_threshold(l3_bytes: u64) -> f64 {
    0.5 * (PAGE_SIZE / PTE_SIZE) as f64 * l3_bytes as f64
}

/// Format a byte count using the largest binary unit which divides it
/// exactly, eg: `9437184` is `9 MiB` and `2415919104` is `2304 MiB`.
pub fn human_bytes(bytes: u64) -> String {
    let mut value = bytes;
    let mut unit = 0;
    while value != 0 && value % 1024 == 0 && unit + 1 < UNITS.len() {
        value /= 1024;
        unit += 1;
    }
    format!("{} {}", value, UNITS[unit])
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    name: String,
    bytes: f64,
    colour: RGBColor,
}

impl Marker {
    pub fn new(name: impl AsRef<str>, bytes: f64, colour: RGBColor) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            bytes,
            colour,
        }
    }

    /// L1, L2, L3 and the page table eviction threshold.
    pub fn defaults() -> Vec<Marker> {
        vec![
            Marker::new("L1", L1_BYTES as f64, hexcolour!(0xFF0000)),
            Marker::new("L2", L2_BYTES as f64, hexcolour!(0x008000)),
            Marker::new("L3", L3_BYTES as f64, hexcolour!(0xA52A2A)),
            Marker::new(
                "Page Table Eviction Threshold",
                page_table_eviction_threshold(L3_BYTES),
                hexcolour!(0x800080),
            ),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> f64 {
        self.bytes
    }

    pub fn colour(&self) -> RGBColor {
        self.colour
    }

    /// Legend text, the name followed by the capacity.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, human_bytes(self.bytes as u64))
    }
}
