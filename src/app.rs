//! 完整运行流程：生成文件、顺序处理、工作池处理

use crate::config::Config;
use crate::error::Result;
use crate::generator::GenerationSummary;
use crate::pool::{PoolSummary, SimulatedWork};
use crate::process::{
    create_csv_records, process_csv_sequentially, process_csv_with_worker_pool,
};
use crate::reject_writer::RejectWriter;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 三个阶段的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub generation: GenerationSummary,
    pub sequential: PoolSummary,
    pub pooled: PoolSummary,
    pub total: Duration,
}

/// 依次执行生成、顺序处理和工作池处理，每个阶段单独计时
pub fn run(config: &Config) -> Result<RunReport> {
    let start = Instant::now();

    let generation = create_csv_records(&config.generation)?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "生成 {} 条记录耗时: {:.2?}",
        generation.records_written,
        generation.duration
    );

    let path = config.generation.output_path();
    let handler = Arc::new(SimulatedWork::new(Duration::from_millis(
        config.pool.job_delay_ms,
    )));
    let rejects = config
        .pool
        .rejects_out_path
        .as_ref()
        .map(RejectWriter::new)
        .transpose()?
        .map(Arc::new);

    let sequential =
        process_csv_sequentially(&path, &*handler, rejects.as_deref())?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "顺序处理 {} 个作业耗时: {:.2?}",
        sequential.processed,
        sequential.duration
    );

    let pooled =
        process_csv_with_worker_pool(&path, &config.pool, handler, rejects)?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "工作池处理 {} 个作业耗时: {:.2?}",
        pooled.processed,
        pooled.duration
    );

    let total = start.elapsed();
    #[cfg(feature = "logging")]
    tracing::info!("全部阶段完成，总耗时: {:.2?}", total);

    Ok(RunReport { generation, sequential, pooled, total })
}
