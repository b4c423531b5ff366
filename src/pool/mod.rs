//! 消费工作池模块
//!
//! 投递线程把解析好的作业送入有界队列，固定数量的工作线程消费队列，
//! 完成屏障在全部工作线程退出后释放。

pub mod barrier;
pub mod handler;
pub mod manager;
pub mod types;
pub mod worker;

// 重新导出主要类型和接口
pub use barrier::{BarrierGuard, CompletionBarrier};
pub use handler::{JobHandler, SimulatedWork};
pub use manager::{JobSubmitter, RunningPool, WorkerPool};
pub use types::{DispatchStats, JobFailure, PoolSummary, WorkerReport};
