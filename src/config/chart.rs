// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

pub const TITLE: &str = "Latency as a function of array size";
pub const SUBTITLE: &str = "CPU Model Name: Intel (R) Core(TM) i5-8500 CPU @ 3.00GHz";
pub const X_DESC: &str = "Bytes allocated (log scale)";
pub const Y_DESC: &str = "Latency (ns log scale)";

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chart {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_subtitle")]
    subtitle: String,
    #[serde(default)]
    detect_cpu: bool,
    #[serde(default = "default_x_desc")]
    x_desc: String,
    #[serde(default = "default_y_desc")]
    y_desc: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Chart {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn set_subtitle(&mut self, subtitle: String) {
        self.subtitle = subtitle;
    }

    pub fn detect_cpu(&self) -> bool {
        self.detect_cpu
    }

    pub fn set_detect_cpu(&mut self, enabled: bool) {
        self.detect_cpu = enabled;
    }

    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, pixels: u32) {
        self.width = pixels;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, pixels: u32) {
        self.height = pixels;
    }
}

impl Default for Chart {
    fn default() -> Chart {
        Chart {
            title: default_title(),
            subtitle: default_subtitle(),
            detect_cpu: false,
            x_desc: default_x_desc(),
            y_desc: default_y_desc(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_title() -> String {
    TITLE.to_string()
}

fn default_subtitle() -> String {
    SUBTITLE.to_string()
}

fn default_x_desc() -> String {
    X_DESC.to_string()
}

fn default_y_desc() -> String {
    Y_DESC.to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}
