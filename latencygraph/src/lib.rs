// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Log-log latency charts. A [`LatencyChart`] collects line series and
//! labelled vertical reference lines, then renders them with plotters.

use plotters::coord::Shift;
use plotters::prelude::*;

pub use plotters::style::RGBColor;

use log::warn;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

#[macro_export]
macro_rules! hexcolour {
    ($colour:literal) => {
        $crate::RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            (($colour & 0x0000FF) >> 0) as u8,
        )
    };
}

/// Colours assigned to series in the order they are added.
pub const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
];

// multiplicative padding applied to both ends of a log axis
const LOWER_PAD: f64 = 0.8;
const UPPER_PAD: f64 = 1.25;

/// Parse a `#RRGGBB` (or `RRGGBB`) colour.
pub fn parse_colour(colour: &str) -> Option<RGBColor> {
    let hex = colour.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(RGBColor(
        ((value & 0xFF0000) >> 16) as u8,
        ((value & 0x00FF00) >> 8) as u8,
        (value & 0x0000FF) as u8,
    ))
}

#[derive(Clone, Debug)]
pub struct Series {
    label: String,
    points: Vec<(f64, f64)>,
    colour: RGBColor,
}

impl Series {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn colour(&self) -> RGBColor {
        self.colour
    }

    /// points which can be placed on log-log axes
    fn drawable(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().filter(|&(x, y)| x > 0.0 && y > 0.0)
    }
}

/// A vertical reference line spanning the full height of the plot.
#[derive(Clone, Debug)]
pub struct VLine {
    label: String,
    x: f64,
    colour: RGBColor,
}

impl VLine {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn colour(&self) -> RGBColor {
        self.colour
    }
}

pub struct LatencyChart {
    title: Vec<String>,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),

    series: Vec<Series>,
    vlines: Vec<VLine>,
}

impl Default for LatencyChart {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencyChart {
    pub fn new() -> Self {
        Self {
            title: Vec::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            size: (1280, 960),

            series: Vec::new(),
            vlines: Vec::new(),
        }
    }

    /// Append one line to the title. Lines are drawn top to bottom.
    pub fn title(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.title.push(line.as_ref().to_owned());
        self
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    /// Add a line series. Points are kept in the order given.
    pub fn series(
        &mut self,
        label: impl AsRef<str>,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> &mut Self {
        let colour = COLOURS[self.series.len() % COLOURS.len()];
        self.series.push(Series {
            label: label.as_ref().to_owned(),
            points: points.into_iter().collect(),
            colour,
        });
        self
    }

    pub fn vline(&mut self, label: impl AsRef<str>, x: f64, colour: RGBColor) -> &mut Self {
        self.vlines.push(VLine {
            label: label.as_ref().to_owned(),
            x,
            colour,
        });
        self
    }

    pub fn titles(&self) -> &[String] {
        &self.title
    }

    pub fn get_x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn get_y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.size
    }

    pub fn all_series(&self) -> &[Series] {
        &self.series
    }

    pub fn vlines(&self) -> &[VLine] {
        &self.vlines
    }

    /// Legend entries in drawing order: series first, then vertical lines.
    pub fn legend(&self) -> Vec<&str> {
        self.series
            .iter()
            .map(|s| s.label())
            .chain(self.vlines.iter().map(|v| v.label()))
            .collect()
    }

    /// Horizontal extent covering every drawable point and every vertical
    /// line, so that reference lines are visible even outside the data.
    pub fn x_range(&self) -> Option<Range<f64>> {
        let points = self.series.iter().flat_map(|s| s.drawable().map(|(x, _)| x));
        let lines = self.vlines.iter().map(|v| v.x).filter(|x| *x > 0.0);
        padded(points.chain(lines))
    }

    pub fn y_range(&self) -> Option<Range<f64>> {
        padded(self.series.iter().flat_map(|s| s.drawable().map(|(_, y)| y)))
    }

    /// Number of points which are dropped when drawing because a log axis
    /// cannot place them.
    pub fn skipped(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.points.len() - s.drawable().count())
            .sum()
    }

    /// Render to `filename`. A `.svg` extension selects the SVG backend,
    /// anything else is written as a bitmap in the format the extension
    /// names.
    pub fn render(&self, filename: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let filename = filename.as_ref();
        let (x_range, y_range) = match (self.x_range(), self.y_range()) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err("chart has no positive values to place on log axes".into()),
        };

        let skipped = self.skipped();
        if skipped > 0 {
            warn!("{} non-positive points cannot be drawn on log axes", skipped);
        }

        let svg = filename
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        if svg {
            let root = SVGBackend::new(filename, self.size).into_drawing_area();
            self.draw(&root, x_range, y_range)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(filename, self.size).into_drawing_area();
            self.draw(&root, x_range, y_range)?;
            root.present()?;
        }

        Ok(())
    }

    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<(), Box<dyn Error>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let mut area = root.margin(10, 10, 10, 10);
        for line in &self.title {
            area = area.titled(line, ("sans-serif", 28.0))?;
        }

        let y_bottom = y_range.start;
        let y_top = y_range.end;

        let mut chart = ChartBuilder::on(&area)
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

        chart
            .configure_mesh()
            .x_desc(&self.x_desc)
            .y_desc(&self.y_desc)
            .x_label_formatter(&|x| format!("{:.0e}", x))
            .x_label_style(("sans-serif", 18.0))
            .y_label_style(("sans-serif", 18.0))
            .draw()?;

        for series in &self.series {
            let colour = series.colour;
            chart
                .draw_series(LineSeries::new(series.drawable(), colour.stroke_width(2)))?
                .label(&series.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });
        }

        for vline in &self.vlines {
            let colour = vline.colour;
            let line = vec![(vline.x, y_bottom), (vline.x, y_top)];
            chart
                .draw_series(LineSeries::new(line, colour.stroke_width(1)))?
                .label(&vline.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(1))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        Ok(())
    }
}

fn padded(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if min.is_finite() && max.is_finite() {
        Some(min * LOWER_PAD..max * UPPER_PAD)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> LatencyChart {
        let mut chart = LatencyChart::new();
        chart
            .title("first")
            .title("second")
            .series("a", vec![(10.0, 1.0), (100.0, 5.0), (1000.0, 50.0)])
            .series("b", vec![(10.0, 0.5), (100.0, 2.0), (1000.0, 8.0)])
            .vline("line", 5000.0, hexcolour!(0xFF0000));
        chart
    }

    #[test]
    fn legend_order() {
        assert_eq!(chart().legend(), vec!["a", "b", "line"]);
    }

    #[test]
    fn series_colours_follow_palette() {
        let chart = chart();
        assert_eq!(chart.all_series()[0].colour(), COLOURS[0]);
        assert_eq!(chart.all_series()[1].colour(), COLOURS[1]);
    }

    #[test]
    fn points_kept_in_order() {
        let chart = chart();
        assert_eq!(
            chart.all_series()[0].points(),
            &[(10.0, 1.0), (100.0, 5.0), (1000.0, 50.0)]
        );
        assert_eq!(chart.titles(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn x_range_includes_vlines() {
        let range = chart().x_range().unwrap();
        assert!(range.start < 10.0);
        assert!(range.end > 5000.0);
    }

    #[test]
    fn y_range_ignores_non_positive() {
        let mut chart = chart();
        chart.series("c", vec![(10.0, -3.0), (20.0, 0.0)]);
        let range = chart.y_range().unwrap();
        assert!(range.start > 0.0 && range.start < 0.5);
        assert!(range.end > 50.0);
        assert_eq!(chart.skipped(), 2);
        // the model keeps them
        assert_eq!(chart.all_series()[2].points().len(), 2);
    }

    #[test]
    fn empty_chart_has_no_ranges() {
        let chart = LatencyChart::new();
        assert!(chart.x_range().is_none());
        assert!(chart.y_range().is_none());
        assert!(chart.render("never-written.png").is_err());
        assert!(!Path::new("never-written.png").exists());
    }

    #[test]
    fn colours() {
        assert_eq!(parse_colour("#A52A2A"), Some(RGBColor(0xA5, 0x2A, 0x2A)));
        assert_eq!(parse_colour("800080"), Some(RGBColor(0x80, 0x00, 0x80)));
        assert_eq!(parse_colour("#12345"), None);
        assert_eq!(parse_colour("#GG0000"), None);
        assert_eq!(hexcolour!(0x008000), RGBColor(0, 0x80, 0));
    }
}
