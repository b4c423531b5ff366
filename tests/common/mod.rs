//! 集成测试公共模块

use csv_pipeline::config::{GenerationConfig, PoolConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 输出到临时目录下 `out/` 的生成配置
pub fn generation_config(
    dir: &TempDir,
    record_count: usize,
    parallel: bool,
) -> GenerationConfig {
    GenerationConfig {
        record_count,
        parallel,
        chunk_size: 10,
        worker_count: 4,
        output_dir: dir.path().join("out").to_string_lossy().into_owned(),
        file_name: "data.csv".to_string(),
        ..GenerationConfig::default()
    }
}

/// 小队列的工作池配置
#[allow(dead_code)]
pub fn pool_config(workers: usize, queue_capacity: usize) -> PoolConfig {
    PoolConfig { workers, queue_capacity, ..PoolConfig::default() }
}

/// 写入测试用 CSV 文件
#[allow(dead_code)]
pub fn create_test_csv(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

/// 第 5 行 Age 为 `abc` 的样例文件
#[allow(dead_code)]
pub const CSV_WITH_BAD_AGE: &str = "ID,Name,Email,Age\n\
1,Name1,user1@example.com,21\n\
2,Name2,user2@example.com,22\n\
3,Name3,user3@example.com,23\n\
4,Name4,user4@example.com,24\n\
5,Name5,user5@example.com,abc\n\
6,Name6,user6@example.com,26\n\
7,Name7,user7@example.com,27\n";
