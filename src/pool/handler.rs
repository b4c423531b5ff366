//! 作业处理接口

use crate::error::JobError;
use crate::record::Job;
use std::time::Duration;

/// 每个作业上执行的业务操作
///
/// 实现必须是线程安全的：同一个实例会被所有工作线程共享。
/// 返回的错误由工作线程收集进 [`PoolSummary`](super::PoolSummary)，不会中断工作池。
pub trait JobHandler: Send + Sync {
    fn handle(&self, worker_id: usize, job: &Job) -> Result<(), JobError>;
}

impl<F> JobHandler for F
where
    F: Fn(usize, &Job) -> Result<(), JobError> + Send + Sync,
{
    fn handle(&self, worker_id: usize, job: &Job) -> Result<(), JobError> {
        self(worker_id, job)
    }
}

/// 默认处理器：记录日志并模拟固定耗时
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedWork {
    delay: Duration,
}

impl SimulatedWork {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 不做任何事的处理器
    pub fn noop() -> Self {
        Self::default()
    }
}

impl JobHandler for SimulatedWork {
    fn handle(&self, worker_id: usize, job: &Job) -> Result<(), JobError> {
        #[cfg(feature = "logging")]
        tracing::trace!("工作线程 {} 处理作业 ID: {}", worker_id, job.id);
        #[cfg(not(feature = "logging"))]
        let _ = (worker_id, job);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}
