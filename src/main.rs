// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use latency_plot::{Config, Error, NAME, VERSION};
use logger::{fatal, info, Logger};

pub fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(Error::Args(e)) => e.exit(),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("latency_plot")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("{} {} initializing...", NAME, VERSION);

    config.print();

    if let Err(e) = latency_plot::run(&config) {
        fatal!("{}", e);
    }
}
