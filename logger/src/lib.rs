// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small backend for the `log` facade which writes timestamped lines to
//! stdout. Install it with the [`Logger`] builder:
//!
//! ```no_run
//! use logger::info;
//!
//! logger::Logger::new()
//!     .label("demo")
//!     .level(logger::Level::Info)
//!     .init()
//!     .expect("Failed to initialize logger");
//! info!("ready");
//! ```

pub use log::{debug, error, info, trace, warn, Level, LevelFilter, SetLoggerError};

use log::{Log, Metadata, Record};

/// Log at error level and then terminate the process with a failure status.
#[macro_export]
macro_rules! fatal {
    () => {{
        $crate::error!("fatal error");
        std::process::exit(1)
    }};
    ($($arg:tt)+) => {{
        $crate::error!($($arg)+);
        std::process::exit(1)
    }};
}

pub struct Logger {
    label: Option<&'static str>,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Logger {
        Logger {
            label: None,
            level: Level::Info,
        }
    }

    /// Label printed for records at info and above. Debug and trace records
    /// print their module target instead.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))
            .map(|()| log::set_max_level(level.to_level_filter()))
    }

    fn format(&self, record: &Record) -> String {
        let target = if record.level() >= Level::Debug {
            record.target()
        } else {
            match self.label {
                Some(label) => label,
                None => record.target(),
            }
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}
