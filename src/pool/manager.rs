//! 消费工作池
//!
//! 每次调用构造独立的 [`WorkerPool`]，队列与完成屏障都归该实例所有，
//! 不存在进程级共享状态。
//!
//! 投递方必须与等待方并发运行：如果在投递开始之前就同步等待工作线程结束，
//! 队列既为空又未关闭，工作线程永远不会退出。[`WorkerPool::run`]
//! 先启动投递线程再等待屏障，从结构上避免这一点。

use super::barrier::CompletionBarrier;
use super::handler::JobHandler;
use super::types::{DispatchStats, PoolSummary, WorkerReport};
use super::worker::consumer_worker;
use crate::config::PoolConfig;
use crate::error::{PipelineError, Result};
use crate::record::Job;
use crossbeam_channel::{Sender, bounded};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// 工作池参数
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
    queue_capacity: usize,
}

impl WorkerPool {
    /// 工作线程数和队列容量都必须大于 0
    pub fn new(workers: usize, queue_capacity: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PipelineError::config_error("工作池线程数不能为0"));
        }
        if queue_capacity == 0 {
            return Err(PipelineError::config_error("队列容量不能为0"));
        }
        Ok(Self { workers, queue_capacity })
    }

    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        Self::new(config.workers, config.queue_capacity)
    }

    /// 启动工作线程，返回可投递作业的运行中工作池
    pub fn start<H: JobHandler + ?Sized + 'static>(
        &self,
        handler: Arc<H>,
    ) -> Result<RunningPool> {
        let (job_tx, job_rx) = bounded::<Job>(self.queue_capacity);
        let (barrier, guards) = CompletionBarrier::with_guards(self.workers);

        #[cfg(feature = "logging")]
        tracing::info!(
            "启动工作池: {} 个工作线程，队列容量 {}",
            self.workers,
            self.queue_capacity
        );

        let mut handles = Vec::with_capacity(self.workers);
        for (worker_id, guard) in guards.into_iter().enumerate() {
            let job_rx = job_rx.clone();
            let handler = Arc::clone(&handler);
            let handle = thread::Builder::new()
                .name(format!("pool-worker-{worker_id}"))
                .spawn(move || consumer_worker(worker_id, job_rx, handler, guard))?;
            handles.push(handle);
        }

        Ok(RunningPool {
            sender: Some(job_tx),
            handles,
            barrier,
            started: Instant::now(),
        })
    }

    /// 启动工作池和投递线程，等待全部完成
    ///
    /// `dispatcher` 在独立线程上运行，通过 [`JobSubmitter`] 投递作业；
    /// 它返回时投递端随之关闭。投递失败（例如读取文件的 IO 错误）
    /// 会在工作线程退出后作为本次调用的错误返回。
    pub fn run<H, D>(&self, handler: Arc<H>, dispatcher: D) -> Result<PoolSummary>
    where
        H: JobHandler + ?Sized + 'static,
        D: FnOnce(&JobSubmitter) -> Result<DispatchStats> + Send + 'static,
    {
        let mut pool = self.start(handler)?;
        let submitter = pool.submitter()?;

        let dispatch = thread::Builder::new()
            .name("pool-dispatcher".to_string())
            .spawn(move || dispatcher(&submitter))?;

        // 投递线程已在运行，此时才放弃自己的发送端并等待
        pool.close();
        let summary = pool.wait();

        let dispatched = dispatch
            .join()
            .map_err(|_| PipelineError::worker_error("投递线程异常退出"))?;

        let mut summary = summary?;
        summary.dispatch = dispatched?;

        #[cfg(feature = "logging")]
        tracing::info!(
            "工作池完成: 读取 {} 行，投递 {} 个作业，丢弃 {} 行，处理 {} 个，失败 {} 个，耗时: {:?}",
            summary.dispatch.rows_read,
            summary.dispatch.dispatched,
            summary.dispatch.dropped,
            summary.processed,
            summary.failed(),
            summary.duration
        );

        Ok(summary)
    }
}

/// 作业投递端，可克隆后交给投递线程
#[derive(Debug, Clone)]
pub struct JobSubmitter {
    tx: Sender<Job>,
}

impl JobSubmitter {
    /// 投递一个作业；队列已满时阻塞
    pub fn submit(&self, job: Job) -> Result<()> {
        self.tx.send(job).map_err(|_| {
            PipelineError::worker_error("所有工作线程已退出，作业无法投递")
        })
    }
}

/// 运行中的工作池
pub struct RunningPool {
    sender: Option<Sender<Job>>,
    handles: Vec<JoinHandle<WorkerReport>>,
    barrier: Arc<CompletionBarrier>,
    started: Instant,
}

impl RunningPool {
    /// 获取一个投递端；工作池关闭后返回错误
    pub fn submitter(&self) -> Result<JobSubmitter> {
        self.sender
            .as_ref()
            .map(|tx| JobSubmitter { tx: tx.clone() })
            .ok_or_else(|| PipelineError::other("工作池已关闭"))
    }

    /// 直接投递一个作业
    pub fn submit(&self, job: Job) -> Result<()> {
        self.submitter()?.submit(job)
    }

    /// 放弃工作池自身持有的发送端
    ///
    /// 所有 [`JobSubmitter`] 也被丢弃后队列关闭，工作线程处理完剩余作业后退出。
    pub fn close(&mut self) {
        self.sender.take();
    }

    /// 关闭自身发送端，等待完成屏障释放并汇总结果
    ///
    /// 仍有投递端存活时会一直阻塞，直到持有者把它们全部丢弃；
    /// 持有者必须与本调用并发运行。
    pub fn wait(mut self) -> Result<PoolSummary> {
        self.close();
        #[cfg(feature = "logging")]
        tracing::debug!("等待 {} 个工作线程退出", self.barrier.outstanding());
        self.barrier.wait();

        let mut reports = Vec::with_capacity(self.handles.len());
        let mut panicked = 0;
        for (i, handle) in self.handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(e) => {
                    panicked += 1;
                    #[cfg(feature = "logging")]
                    tracing::error!("工作线程 {} panic: {:?}", i, e);
                    #[cfg(not(feature = "logging"))]
                    let _ = (i, e);
                }
            }
        }

        if panicked > 0 {
            return Err(PipelineError::worker_error(format!(
                "{panicked} 个工作线程异常退出"
            )));
        }

        Ok(PoolSummary::from_reports(reports, self.started.elapsed()))
    }
}
