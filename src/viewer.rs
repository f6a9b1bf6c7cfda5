// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Displays a rendered chart by handing it to an external program and
//! waiting for that program to exit. `xdg-open` hands the file to the
//! desktop's handler and returns at once, so the platform default on Linux
//! does not block.

use crate::Error;

use logger::{debug, info};

use std::path::Path;
use std::process::Command;

pub struct Viewer {
    program: String,
    args: Vec<String>,
    blocking: bool,
}

impl Viewer {
    /// Use `command` when given, which may carry its own arguments separated
    /// by whitespace, otherwise the platform's default opener.
    pub fn new(command: Option<&str>) -> Result<Self, Error> {
        let (mut words, blocking): (Vec<String>, bool) = match command {
            Some(command) => (command.split_whitespace().map(String::from).collect(), true),
            None => (
                default_command().iter().map(|s| s.to_string()).collect(),
                DEFAULT_BLOCKS,
            ),
        };
        if words.is_empty() {
            return Err(Error::Viewer("empty viewer command".to_string()));
        }
        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
            blocking,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the viewer stays running until the user closes the chart.
    /// Configured commands are assumed to.
    pub fn blocks(&self) -> bool {
        self.blocking
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        command
    }

    /// Open `path` and wait for the viewer to exit.
    pub fn show(&self, path: &Path) -> Result<(), Error> {
        info!("displaying {} with {}", path.display(), self.program);
        if !self.blocking {
            info!(
                "{} returns without waiting for the chart to be closed",
                self.program
            );
        }
        let status = self
            .command(path)
            .status()
            .map_err(|e| Error::Viewer(format!("{}: {}", self.program, e)))?;
        debug!("viewer exited: {}", status);
        if status.success() {
            Ok(())
        } else {
            Err(Error::Viewer(format!("{} exited with {}", self.program, status)))
        }
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
const DEFAULT_BLOCKS: bool = true;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_BLOCKS: bool = false;

#[cfg(target_os = "macos")]
fn default_command() -> &'static [&'static str] {
    &["open", "-W"]
}

#[cfg(target_os = "windows")]
fn default_command() -> &'static [&'static str] {
    &["cmd", "/C", "start", "/WAIT", ""]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_command() -> &'static [&'static str] {
    &["xdg-open"]
}
