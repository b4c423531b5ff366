//! CSV 记录生成与并发处理
//!
//! - [`generator`]：分块并行生成，按分块序号重组后顺序写出
//! - [`pool`]：有界队列加固定数量工作线程的消费工作池
//! - [`process`]：生成与处理阶段的入口

pub mod app;
pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;
#[cfg(feature = "logging")]
pub mod logging;
pub mod pool;
pub mod process;
pub mod reader;
pub mod record;
pub mod reject_writer;

pub use config::Config;
pub use error::{JobError, PipelineError, RecordError, Result};
