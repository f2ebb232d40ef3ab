use std::fs;

use statmech_sampling::{run_suite, SuiteConfig};
use tempfile::tempdir;

fn small_config(dir: &std::path::Path) -> SuiteConfig {
    SuiteConfig {
        output_dir: dir.join("output"),
        bins: 20,
        uniform_sizes: vec![100, 5_000],
        lambdas: vec![0.0, 0.5, 2.0],
        biased_size: 10_000,
        master_seed: 3,
    }
}

#[test]
fn suite_writes_one_csv_per_sequence() {
    let dir = tempdir().unwrap();
    let config = small_config(dir.path());
    let outputs = run_suite(&config).unwrap();
    assert_eq!(outputs.len(), 5);

    let names: Vec<_> = outputs
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "sequence100.csv",
            "sequence5000.csv",
            "sequence_biased0.csv",
            "sequence_biased5.csv",
            "sequence_biased20.csv",
        ]
    );

    for output in &outputs {
        assert_eq!(output.histogram.total(), output.samples as u64);
        let contents = fs::read_to_string(&output.path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("lower_edge,count"));
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 20);
        let first_edge: f64 = rows[0].split(',').next().unwrap().parse().unwrap();
        assert_eq!(first_edge, 0.0);
        let total: u64 = rows
            .iter()
            .map(|row| row.split(',').nth(1).unwrap().parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, output.samples as u64);
    }
}

#[test]
fn suite_is_reproducible() {
    let dir = tempdir().unwrap();
    let config = small_config(dir.path());
    let first = run_suite(&config).unwrap();
    let second = run_suite(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn yaml_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sampling.yaml");
    fs::write(&path, "bins: 10\nuniform_sizes: [50]\nlambdas: []\n").unwrap();
    let config = SuiteConfig::from_yaml_path(&path).unwrap();
    assert_eq!(config.bins, 10);
    assert_eq!(config.biased_size, 1_000_000);
    assert!(config.lambdas.is_empty());
}

#[test]
fn repeated_sizes_share_one_file() {
    let dir = tempdir().unwrap();
    let config = SuiteConfig {
        uniform_sizes: vec![200, 200],
        lambdas: vec![],
        ..small_config(dir.path())
    };
    let outputs = run_suite(&config).unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].path, outputs[1].path);
    let files = fs::read_dir(&config.output_dir).unwrap().count();
    assert_eq!(files, 1);
}
