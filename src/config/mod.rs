// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod chart;
mod general;

pub use self::chart::Chart;
pub use self::general::General;

use crate::markers::Marker;
use crate::Error;

use clap::{App, Arg, ArgMatches};
use logger::{info, Level};
use serde_derive::*;

use std::ffi::OsString;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    chart: Chart,
    #[serde(default)]
    marker: Vec<MarkerConfig>,
}

/// A `[[marker]]` table. When any are present they replace the built-in
/// cache markers.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    name: String,
    bytes: u64,
    colour: String,
}

impl MarkerConfig {
    fn marker(&self) -> Result<Marker, Error> {
        if self.bytes == 0 {
            return Err(Error::Config(format!(
                "marker {:?} must have a positive size",
                self.name
            )));
        }
        let colour = latencygraph::parse_colour(&self.colour).ok_or_else(|| {
            Error::Config(format!(
                "marker {:?} has invalid colour {:?}, expected #RRGGBB",
                self.name, self.colour
            ))
        })?;
        Ok(Marker::new(&self.name, self.bytes as f64, colour))
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(NAME)
        .version(VERSION)
        .about("Plot memory access latency against array size")
        .arg(
            Arg::with_name("INPUT")
                .value_name("FILE")
                .help("CSV of size,random,sequential rows")
                .conflicts_with("input")
                .index(1),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .value_name("FILE")
                .help("CSV of size,random,sequential rows")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("FILE")
                .help("Render the chart to this PNG or SVG file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("viewer")
                .long("viewer")
                .value_name("COMMAND")
                .help("Program used to display the chart")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-show")
                .long("no-show")
                .help("Render the chart without displaying it"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("Pixels")
                .help("Chart width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("Pixels")
                .help("Chart height")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("subtitle")
                .long("subtitle")
                .value_name("TEXT")
                .help("Hardware description shown under the title")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("detect-cpu")
                .long("detect-cpu")
                .help("Describe the local CPU in the subtitle"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config, Error> {
        Self::from_args(std::env::args_os())
    }

    /// parse the given arguments, the first of which is the program name
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(input) = matches
            .value_of("INPUT")
            .or_else(|| matches.value_of("input"))
        {
            config.general.set_input(input.to_string());
        }

        if let Some(output) = matches.value_of("output") {
            config.general.set_output(Some(output.to_string()));
        }

        if let Some(viewer) = matches.value_of("viewer") {
            config.general.set_viewer(Some(viewer.to_string()));
        }

        if matches.is_present("no-show") {
            config.general.set_show(false);
        }

        if let Some(width) = parse_numeric_arg(&matches, "width")? {
            config.chart.set_width(width);
        }

        if let Some(height) = parse_numeric_arg(&matches, "height")? {
            config.chart.set_height(height);
        }

        if let Some(subtitle) = matches.value_of("subtitle") {
            config.chart.set_subtitle(subtitle.to_string());
        }

        if matches.is_present("detect-cpu") {
            config.chart.set_detect_cpu(true);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        config.validate()?;

        Ok(config)
    }

    pub fn load_from_file(file: &str) -> Result<Config, Error> {
        let content = std::fs::read_to_string(file).map_err(|source| Error::Io {
            path: PathBuf::from(file),
            source,
        })?;
        Config::parse(&content)
    }

    /// parse a TOML document
    pub fn parse(content: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.chart.width() == 0 || self.chart.height() == 0 {
            return Err(Error::Config("chart dimensions must be non-zero".to_string()));
        }
        self.markers()?;
        Ok(())
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// the configured reference markers, or the built-in cache markers
    pub fn markers(&self) -> Result<Vec<Marker>, Error> {
        if self.marker.is_empty() {
            return Ok(Marker::defaults());
        }
        self.marker.iter().map(MarkerConfig::marker).collect()
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    /// path the chart is rendered to, a temporary file when unset
    pub fn output(&self) -> PathBuf {
        match self.general.output() {
            Some(output) => PathBuf::from(output),
            None => std::env::temp_dir().join(format!("{}-{}.png", NAME, std::process::id())),
        }
    }

    /// true when no output path was configured and the chart goes to a
    /// temporary file
    pub fn output_is_temporary(&self) -> bool {
        self.general.output().is_none()
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Input: {}", self.general.input());
        info!(
            "Config: Output: {} Show: {} Viewer: {}",
            self.output().display(),
            self.general.show(),
            self.general.viewer().unwrap_or("default"),
        );
        info!(
            "Config: Chart: {}x{} Detect CPU: {}",
            self.chart.width(),
            self.chart.height(),
            self.chart.detect_cpu(),
        );
        if let Ok(markers) = self.markers() {
            for marker in markers {
                info!("Config: Marker: {} at {} bytes", marker.label(), marker.bytes());
            }
        }
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg(matches: &ArgMatches, key: &str) -> Result<Option<u32>, Error> {
    matches
        .value_of(key)
        .map(|v| {
            v.parse()
                .map_err(|_| Error::Config(format!("could not parse {}: {:?}", key, v)))
        })
        .transpose()
}
