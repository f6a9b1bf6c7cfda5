// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plots memory access latency against array size on log-log axes, with
//! vertical lines marking cache capacities.

mod config;
mod cpu;
mod dataset;
mod error;
mod markers;
mod viewer;

pub use crate::config::{Chart, Config, General, MarkerConfig, NAME, VERSION};
pub use crate::dataset::{Dataset, Sample};
pub use crate::error::Error;
pub use crate::markers::{human_bytes, page_table_eviction_threshold, Marker};
pub use crate::viewer::Viewer;

pub use latencygraph::LatencyChart;

use logger::{debug, info, warn};

use std::fs;

pub const RANDOM_LABEL: &str = "Random access";
pub const SEQUENTIAL_LABEL: &str = "Sequential access";

/// Assemble the chart for `dataset`: both latency series in row order and
/// one vertical line per marker.
pub fn build_chart(config: &Config, dataset: &Dataset) -> Result<LatencyChart, Error> {
    let mut chart = LatencyChart::new();
    chart
        .title(config.chart().title())
        .title(subtitle(config))
        .x_desc(config.chart().x_desc())
        .y_desc(config.chart().y_desc())
        .size((config.chart().width(), config.chart().height()))
        .series(RANDOM_LABEL, dataset.random())
        .series(SEQUENTIAL_LABEL, dataset.sequential());

    for marker in config.markers()? {
        chart.vline(marker.label(), marker.bytes(), marker.colour());
    }

    Ok(chart)
}

fn subtitle(config: &Config) -> String {
    if config.chart().detect_cpu() {
        match cpu::model_name() {
            Ok(model) => return cpu::describe(&model),
            Err(e) => warn!("unable to detect cpu model: {}", e),
        }
    }
    config.chart().subtitle().to_string()
}

/// Load the input, render the chart and, when enabled, display it.
pub fn run(config: &Config) -> Result<(), Error> {
    let dataset = Dataset::load(config.general().input())?;
    info!(
        "loaded {} rows from {}",
        dataset.len(),
        config.general().input()
    );

    let chart = build_chart(config, &dataset)?;

    let output = config.output();
    chart
        .render(&output)
        .map_err(|e| Error::Render(e.to_string()))?;
    info!("chart written to {}", output.display());

    if config.general().show() {
        let viewer = Viewer::new(config.general().viewer())?;
        viewer.show(&output)?;
        if viewer.blocks() && config.output_is_temporary() {
            match fs::remove_file(&output) {
                Ok(()) => debug!("removed {}", output.display()),
                Err(e) => warn!("failed to remove {}: {}", output.display(), e),
            }
        }
    }

    Ok(())
}
