mod common;

use common::generation_config;
use csv_pipeline::process::create_csv_records;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_scenario_a_line_count_and_order() {
    let dir = TempDir::new().unwrap();
    let config = generation_config(&dir, 25, true);

    let summary = create_csv_records(&config).unwrap();
    assert_eq!(summary.records_written, 25);
    assert_eq!(summary.chunks, 3);

    let path = summary.path.unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0], "ID,Name,Email,Age");

    for (i, line) in lines[1..].iter().enumerate() {
        let id = i + 1;
        let expected = format!(
            "{id},Name{id},user{id}@example.com,{}",
            20 + id % 30
        );
        assert_eq!(*line, expected);
    }
}

#[test]
fn test_parallel_matches_sequential_bytes() {
    let seq_dir = TempDir::new().unwrap();
    let par_dir = TempDir::new().unwrap();

    for n in [1, 9, 10, 11, 137] {
        let seq = create_csv_records(&generation_config(&seq_dir, n, false)).unwrap();
        let mut par_config = generation_config(&par_dir, n, true);
        par_config.chunk_size = 7;
        par_config.worker_count = 3;
        let par = create_csv_records(&par_config).unwrap();

        let seq_bytes = fs::read(seq.path.unwrap()).unwrap();
        let par_bytes = fs::read(par.path.unwrap()).unwrap();
        assert_eq!(seq_bytes, par_bytes, "n = {n}");
    }
}

#[test]
fn test_zero_records_writes_header_only() {
    let dir = TempDir::new().unwrap();
    for parallel in [false, true] {
        let summary = create_csv_records(&generation_config(&dir, 0, parallel)).unwrap();
        assert_eq!(summary.records_written, 0);
        let content = fs::read_to_string(summary.path.unwrap()).unwrap();
        assert_eq!(content, "ID,Name,Email,Age\n");
    }
}

#[test]
fn test_output_directory_is_recreated() {
    let dir = TempDir::new().unwrap();
    let config = generation_config(&dir, 3, false);

    fs::create_dir_all(&config.output_dir).unwrap();
    let stale = std::path::Path::new(&config.output_dir).join("stale.txt");
    fs::write(&stale, "old").unwrap();

    create_csv_records(&config).unwrap();
    assert!(!stale.exists());
    assert!(config.output_path().is_file());
}
