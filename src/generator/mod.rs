//! 记录生成模块
//!
//! 提供分块规划、多线程生成、有序重组和顺序写出

pub mod collector;
pub mod pipeline;
pub mod planner;
pub mod types;
pub mod workers;
pub mod writer;

// 重新导出主要类型和接口
pub use collector::ReassemblyCollector;
pub use pipeline::{generate_parallel, generate_sequential};
pub use planner::{ChunkPlan, ChunkPlanner};
pub use types::{ChunkResult, GenerationSummary, WorkChunk};
pub use writer::{FlushPolicy, SequentialWriter, WriterStats};
