use super::barrier::BarrierGuard;
use super::handler::JobHandler;
use super::types::{JobFailure, WorkerReport};
use crate::record::Job;
use crossbeam_channel::Receiver;
use std::sync::Arc;

/// 消费工作线程主循环
///
/// 队列为空且已关闭时退出。处理失败只记录到报告中，不影响后续作业。
/// `_guard` 在函数返回或 panic 展开时释放，通知完成屏障。
pub fn consumer_worker<H: JobHandler + ?Sized>(
    worker_id: usize,
    job_rx: Receiver<Job>,
    handler: Arc<H>,
    _guard: BarrierGuard,
) -> WorkerReport {
    #[cfg(feature = "logging")]
    tracing::debug!("工作线程 {} 启动", worker_id);

    let mut report = WorkerReport::new(worker_id);

    for job in job_rx.iter() {
        if let Err(e) = handler.handle(worker_id, &job) {
            #[cfg(feature = "logging")]
            tracing::error!("工作线程 {} 处理作业 {} 失败: {}", worker_id, job.id, e);

            report.failures.push(JobFailure {
                job_id: job.id,
                worker_id,
                message: e.to_string(),
            });
        }
        report.processed += 1;
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        "工作线程 {} 退出，处理了 {} 个作业，失败 {} 个",
        worker_id,
        report.processed,
        report.failures.len()
    );

    report
}
