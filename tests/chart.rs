// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use latency_plot::*;

use std::fs;
use std::path::PathBuf;

fn write_input(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("latency-plot-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config_for(path: &PathBuf) -> Config {
    Config::from_args(vec![
        "latency-plot".to_string(),
        path.display().to_string(),
        "--no-show".to_string(),
    ])
    .unwrap()
}

#[test]
fn three_rows() {
    let path = write_input("three_rows.csv", "4096,10,5\n1048576,50,20\n16777216,200,80\n");
    let config = config_for(&path);
    let dataset = Dataset::load(config.general().input()).unwrap();
    let chart = build_chart(&config, &dataset).unwrap();

    let series = chart.all_series();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label(), RANDOM_LABEL);
    assert_eq!(
        series[0].points(),
        &[(4096.0, 10.0), (1048576.0, 50.0), (16777216.0, 200.0)]
    );
    assert_eq!(series[1].label(), SEQUENTIAL_LABEL);
    assert_eq!(
        series[1].points(),
        &[(4096.0, 5.0), (1048576.0, 20.0), (16777216.0, 80.0)]
    );

    let markers: Vec<f64> = chart.vlines().iter().map(|v| v.x()).collect();
    assert_eq!(markers, vec![32768.0, 262144.0, 9437184.0, 2415919104.0]);

    let x = chart.x_range().unwrap();
    assert!(x.start <= 4096.0 && x.end >= 16777216.0);
    for marker in &markers {
        assert!(x.contains(marker));
    }

    let y = chart.y_range().unwrap();
    assert!(y.start <= 5.0 && y.end >= 200.0);
}

#[test]
fn legend_entries() {
    let path = write_input("legend.csv", "size,random,sequential\n100,2,1\n");
    let config = config_for(&path);
    let dataset = Dataset::load(config.general().input()).unwrap();
    let chart = build_chart(&config, &dataset).unwrap();

    assert_eq!(
        chart.legend(),
        vec![
            "Random access",
            "Sequential access",
            "L1 (32 KiB)",
            "L2 (256 KiB)",
            "L3 (9 MiB)",
            "Page Table Eviction Threshold (2304 MiB)",
        ]
    );
}

#[test]
fn titles_and_axes() {
    let path = write_input("titles.csv", "100,2,1\n");
    let config = config_for(&path);
    let dataset = Dataset::load(config.general().input()).unwrap();
    let chart = build_chart(&config, &dataset).unwrap();

    assert_eq!(
        chart.titles(),
        &[
            "Latency as a function of array size".to_string(),
            "CPU Model Name: Intel (R) Core(TM) i5-8500 CPU @ 3.00GHz".to_string(),
        ]
    );
    assert_eq!(chart.get_x_desc(), "Bytes allocated (log scale)");
    assert_eq!(chart.get_y_desc(), "Latency (ns log scale)");
    assert_eq!(chart.get_size(), (1280, 960));
}

#[test]
fn many_rows_unmodified() {
    let mut content = String::new();
    let mut size = 100u64;
    let mut expected = Vec::new();
    while size <= 1 << 30 {
        let random = (size as f64).log2() * 1.5;
        content.push_str(&format!("{},{},{}\n", size, random, random / 3.0));
        expected.push((size as f64, random));
        size = (size as f64 * 1.5).ceil() as u64;
    }
    let path = write_input("many.csv", &content);
    let config = config_for(&path);
    let dataset = Dataset::load(config.general().input()).unwrap();
    let chart = build_chart(&config, &dataset).unwrap();

    assert_eq!(chart.all_series()[0].points(), expected.as_slice());
    assert_eq!(chart.all_series()[1].points().len(), expected.len());
}

#[test]
fn empty_input() {
    let path = write_input("empty.csv", "size,random,sequential\n");
    match Dataset::load(&path) {
        Err(Error::Empty { path: p }) => assert_eq!(p, path),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn run_reports_missing_input() {
    let config = Config::from_args(vec![
        "latency-plot",
        "/nonexistent/latency-plot/output.csv",
        "--no-show",
    ])
    .unwrap();
    assert!(matches!(latency_plot::run(&config), Err(Error::Io { .. })));
}

const THREE_ROWS: &str = "4096,10,5\n1048576,50,20\n16777216,200,80\n";

fn render_config(input: &PathBuf, output: &PathBuf) -> Config {
    Config::from_args(vec![
        "latency-plot".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
        "--no-show".to_string(),
    ])
    .unwrap()
}

#[test]
fn renders_svg() {
    let input = write_input("svg.csv", THREE_ROWS);
    let output = input.with_file_name("chart.svg");
    let config = render_config(&input, &output);
    latency_plot::run(&config).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    for text in &[
        "Random access",
        "Sequential access",
        "L1 (32 KiB)",
        "L2 (256 KiB)",
        "L3 (9 MiB)",
        "Page Table Eviction Threshold (2304 MiB)",
        "Latency as a function of array size",
        "CPU Model Name: Intel (R) Core(TM) i5-8500 CPU @ 3.00GHz",
        "Bytes allocated (log scale)",
        "Latency (ns log scale)",
    ] {
        assert!(svg.contains(text), "missing {:?}", text);
    }

    // each line is drawn once on the plot and once as its legend sample
    let svg = svg.to_lowercase();
    for colour in &[
        "#1f77b4", "#ff7f0e", "#ff0000", "#008000", "#a52a2a", "#800080",
    ] {
        let strokes = svg.matches(&format!("stroke=\"{}\"", colour)).count();
        assert!(strokes >= 2, "{} drawn {} times", colour, strokes);
    }
}

#[test]
fn renders_png() {
    let input = write_input("png.csv", THREE_ROWS);
    let output = input.with_file_name("chart.png");
    let config = render_config(&input, &output);
    latency_plot::run(&config).unwrap();

    let png = fs::read(&output).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn quoted_input() {
    let path = write_input(
        "quoted.csv",
        "size,random,sequential\n\"4096\",\"10\",\"5\"\n",
    );
    let dataset = Dataset::load(&path).unwrap();
    assert_eq!(
        dataset.samples(),
        &[Sample {
            size: 4096.0,
            random: 10.0,
            sequential: 5.0,
        }]
    );
}

#[cfg(unix)]
#[test]
fn temporary_output_removed_after_viewer() {
    let input = write_input("viewer.csv", THREE_ROWS);
    let config = Config::from_args(vec![
        "latency-plot".to_string(),
        input.display().to_string(),
        "--viewer".to_string(),
        "true".to_string(),
    ])
    .unwrap();
    assert!(config.output_is_temporary());

    latency_plot::run(&config).unwrap();
    assert!(!config.output().exists());
}

#[cfg(unix)]
#[test]
fn explicit_output_kept_after_viewer() {
    let input = write_input("kept.csv", THREE_ROWS);
    let output = input.with_file_name("kept.svg");
    let config = Config::from_args(vec![
        "latency-plot".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
        "--viewer".to_string(),
        "true".to_string(),
    ])
    .unwrap();
    assert!(!config.output_is_temporary());

    latency_plot::run(&config).unwrap();
    assert!(output.exists());
}
