//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。
//! 致命错误（IO、配置、重组失败等）统一为 [`PipelineError`]；
//! 单行解析失败属于软错误，使用 [`RecordError`]，只会导致该行被丢弃。

use std::num::ParseIntError;

/// 流水线操作的结果类型
pub type Result<T> = std::result::Result<T, PipelineError>;

/// 流水线致命错误类型
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// TOML 反序列化错误
    #[error("配置解析错误: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("配置序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// CSV 读取错误
    #[error("CSV读取错误: {0}")]
    Csv(#[from] csv::Error),

    /// 分块重组错误
    #[error("重组错误: {0}")]
    Reassembly(String),

    /// 工作线程异常退出或通道断开
    #[error("工作线程错误: {0}")]
    Worker(String),

    /// 日志错误（仅在启用 logging feature 时可用）
    #[cfg(feature = "logging")]
    #[error("日志错误: {0}")]
    Log(#[from] crate::logging::LogError),

    /// 其他错误
    #[error("未知错误: {0}")]
    Other(String),
}

impl PipelineError {
    /// 创建一个配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("配置错误: {}", message);
        Self::Config(message)
    }

    /// 创建一个重组错误
    pub fn reassembly_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("重组错误: {}", message);
        Self::Reassembly(message)
    }

    /// 创建一个工作线程错误
    pub fn worker_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("工作线程错误: {}", message);
        Self::Worker(message)
    }

    /// 创建一个其他类型错误
    pub fn other<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("未知错误: {}", message);
        Self::Other(message)
    }

    /// 检查是否为 IO 错误（包括 CSV 读取时的底层 IO 错误）
    pub fn is_io_error(&self) -> bool {
        match self {
            PipelineError::Io(_) => true,
            PipelineError::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }

    /// 检查是否为 CSV 读取错误
    pub fn is_csv_error(&self) -> bool {
        matches!(self, PipelineError::Csv(_))
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Config(_)
                | PipelineError::TomlDe(_)
                | PipelineError::TomlSer(_)
        )
    }

    /// 检查是否为重组错误
    pub fn is_reassembly_error(&self) -> bool {
        matches!(self, PipelineError::Reassembly(_))
    }

    /// 检查是否为工作线程错误
    pub fn is_worker_error(&self) -> bool {
        matches!(self, PipelineError::Worker(_))
    }
}

/// 单行记录解析错误（软错误，只丢弃该行）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Age 字段不是合法整数
    #[error("年龄字段无效 (ID={id}): {value:?}: {source}")]
    InvalidAge {
        id: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// 字段数量不符
    #[error("字段数量不符: 期望 {expected} 个, 实际 {found} 个")]
    FieldCount { expected: usize, found: usize },
}

/// 单个作业处理失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct JobError(pub String);

impl JobError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_err = PipelineError::config_error("chunk_size 为 0");
        assert!(config_err.is_config_error());
        assert!(!config_err.is_io_error());

        let worker_err = PipelineError::worker_error("thread panicked");
        assert!(worker_err.is_worker_error());

        let reassembly_err = PipelineError::reassembly_error("slot 3 missing");
        assert!(reassembly_err.is_reassembly_error());
    }

    #[test]
    fn test_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PipelineError = io_err.into();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_csv_error_from() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc\n".as_bytes());
        let err: PipelineError = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap_err()
            .into();
        assert!(err.is_csv_error());
        assert!(!err.is_io_error());
        assert!(err.to_string().contains("CSV"));
    }

    #[test]
    fn test_record_error_display() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = RecordError::InvalidAge {
            id: "5".to_string(),
            value: "abc".to_string(),
            source,
        };
        let display = err.to_string();
        assert!(display.contains("ID=5"));
        assert!(display.contains("abc"));

        let err = RecordError::FieldCount { expected: 4, found: 3 };
        assert!(err.to_string().contains('3'));
    }
}
