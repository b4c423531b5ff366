//! 工作池相关的数据类型定义

use std::time::Duration;

/// 单个作业的处理失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    /// 作业 ID
    pub job_id: String,
    /// 处理该作业的工作线程
    pub worker_id: usize,
    /// 错误信息
    pub message: String,
}

/// 单个工作线程的处理报告
#[derive(Debug, Clone, Default)]
pub struct WorkerReport {
    pub worker_id: usize,
    /// 处理的作业数（含失败）
    pub processed: usize,
    /// 失败的作业
    pub failures: Vec<JobFailure>,
}

impl WorkerReport {
    pub fn new(worker_id: usize) -> Self {
        Self { worker_id, ..Default::default() }
    }
}

/// 投递统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// 读取的数据行数（不含表头）
    pub rows_read: usize,
    /// 成功解析并投递的作业数
    pub dispatched: usize,
    /// 因解析失败被丢弃的行数
    pub dropped: usize,
}

/// 一次处理阶段的汇总
#[derive(Debug, Clone, Default)]
pub struct PoolSummary {
    /// 工作线程数
    pub workers: usize,
    /// 处理的作业数（含失败）
    pub processed: usize,
    /// 全部失败的作业
    pub failures: Vec<JobFailure>,
    /// 每个工作线程处理的作业数，按线程 ID 排列
    pub per_worker: Vec<usize>,
    /// 投递统计
    pub dispatch: DispatchStats,
    /// 总耗时
    pub duration: Duration,
}

impl PoolSummary {
    /// 由各工作线程的报告汇总
    pub fn from_reports(mut reports: Vec<WorkerReport>, duration: Duration) -> Self {
        reports.sort_by_key(|r| r.worker_id);
        let mut summary = Self {
            workers: reports.len(),
            duration,
            ..Default::default()
        };
        for report in reports {
            summary.processed += report.processed;
            summary.per_worker.push(report.processed);
            summary.failures.extend(report.failures);
        }
        summary
    }

    /// 成功处理的作业数
    pub fn succeeded(&self) -> usize {
        self.processed - self.failures.len()
    }

    /// 失败的作业数
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
