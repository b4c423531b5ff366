//! 配置管理模块
//!
//! 提供统一的配置文件读取和管理功能。所有并发度都是显式配置值，
//! 默认值在构造配置时一次性从宿主机确定，运行期间不再读取环境。

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 主配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub log: LogSettings,
    /// 记录生成配置
    #[serde(default)]
    pub generation: GenerationConfig,
    /// 工作池配置
    #[serde(default)]
    pub pool: PoolConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// 是否启用控制台输出
    pub enable_stdout: bool,
    /// 日志输出目录
    pub log_dir: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 记录生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// 生成的记录总数
    pub record_count: usize,
    /// 是否使用并行生成
    pub parallel: bool,
    /// 每个分块包含的记录数
    pub chunk_size: usize,
    /// 生成工作线程数
    pub worker_count: usize,
    /// 输出目录（每次生成前会被清空重建）
    pub output_dir: String,
    /// 输出文件名
    pub file_name: String,
    /// 顺序生成时每隔多少条记录刷新一次
    pub flush_every_records: usize,
    /// 并行生成时每隔多少个分块刷新一次
    pub flush_every_chunks: usize,
}

/// 消费工作池配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// 工作线程数
    pub workers: usize,
    /// 有界队列容量
    pub queue_capacity: usize,
    /// 每个作业的模拟处理耗时（毫秒）
    pub job_delay_ms: u64,
    /// 被丢弃行的 JSONL 报告路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejects_out_path: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enable_stdout: true,
            log_dir: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            record_count: 100_000,
            parallel: false,
            chunk_size: 10_000,
            worker_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            output_dir: "testdata".to_string(),
            file_name: "data.csv".to_string(),
            flush_every_records: 10_000,
            flush_every_chunks: 10,
        }
    }
}

impl GenerationConfig {
    /// 输出文件的完整路径
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(&self.file_name)
    }

    /// 生成阶段输入/输出队列的容量
    pub fn channel_capacity(&self) -> usize {
        self.worker_count.saturating_mul(2).max(1)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            queue_capacity: 100,
            job_delay_ms: 0,
            rejects_out_path: None,
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// 从字符串加载配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 文件存在时加载，否则使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        match self.log.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(PipelineError::config_error(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        let generation = &self.generation;
        if generation.chunk_size == 0 {
            return Err(PipelineError::config_error("分块大小不能为0"));
        }
        if generation.worker_count == 0 {
            return Err(PipelineError::config_error("生成线程数不能为0"));
        }
        if generation.flush_every_records == 0
            || generation.flush_every_chunks == 0
        {
            return Err(PipelineError::config_error("刷新间隔不能为0"));
        }
        if generation.file_name.trim().is_empty() {
            return Err(PipelineError::config_error("输出文件名不能为空"));
        }

        if self.pool.workers == 0 {
            return Err(PipelineError::config_error("工作池线程数不能为0"));
        }
        if self.pool.queue_capacity == 0 {
            return Err(PipelineError::config_error("队列容量不能为0"));
        }

        Ok(())
    }
}
