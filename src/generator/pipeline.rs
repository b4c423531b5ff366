//! 顺序生成与并行生成
//!
//! 并行路径：分块规划 → 生成工作池 → 有序重组 → 顺序写出。
//! 两条路径对同一配置产生逐字节相同的输出。

use super::collector::ReassemblyCollector;
use super::planner::ChunkPlanner;
use super::types::{ChunkResult, GenerationSummary, WorkChunk};
use super::workers::{close_when_done, feed_chunks, generation_worker};
use super::writer::{FlushPolicy, SequentialWriter};
use crate::config::GenerationConfig;
use crate::error::{PipelineError, Result};
use crate::exporter::SyncExporter;
use crate::record::RecordSynthesizer;
use crossbeam_channel::bounded;
use std::thread;
use std::time::Instant;

/// 在当前线程上顺序生成 `[1, record_count]` 并写出
pub fn generate_sequential<E: SyncExporter>(
    config: &GenerationConfig,
    exporter: E,
) -> Result<GenerationSummary> {
    let start_time = Instant::now();

    #[cfg(feature = "logging")]
    tracing::info!("开始顺序生成 {} 条记录", config.record_count);

    let mut synth = RecordSynthesizer::new();
    let mut writer = SequentialWriter::new(
        exporter,
        FlushPolicy::EveryRecords(config.flush_every_records),
    );

    for i in 1..=config.record_count {
        let record = synth.synthesize(i);
        if let Err(e) = writer.write_record(&record) {
            #[cfg(feature = "logging")]
            tracing::error!("写出第 {} 条记录失败: {}", i, e);
            return Err(e);
        }
    }

    let (stats, _) = writer.finish()?;
    let duration = start_time.elapsed();

    #[cfg(feature = "logging")]
    tracing::info!(
        "顺序生成完成: {} 条记录，刷新 {} 次，耗时: {:?}",
        stats.records_written,
        stats.flushes,
        duration
    );

    Ok(GenerationSummary {
        records_written: stats.records_written,
        chunks: 0,
        flushes: stats.flushes,
        duration,
        path: None,
    })
}

/// 分块并行生成并按原始顺序写出
///
/// 全部分块收齐后才开始写出；写出失败立即返回。
pub fn generate_parallel<E: SyncExporter>(
    config: &GenerationConfig,
    exporter: E,
) -> Result<GenerationSummary> {
    let start_time = Instant::now();

    if config.worker_count == 0 {
        return Err(PipelineError::config_error("生成线程数不能为0"));
    }

    let planner = ChunkPlanner::new(config.record_count, config.chunk_size)?;
    let total_chunks = planner.total_chunks();
    let capacity = config.channel_capacity();

    #[cfg(feature = "logging")]
    tracing::info!(
        "开始并行生成 {} 条记录: {} 个分块，{} 个生成线程，队列容量 {}",
        config.record_count,
        total_chunks,
        config.worker_count,
        capacity
    );

    let (chunk_tx, chunk_rx) = bounded::<WorkChunk>(capacity);
    let (result_tx, result_rx) = bounded::<ChunkResult>(capacity);

    let mut handles = Vec::with_capacity(config.worker_count);
    for thread_id in 0..config.worker_count {
        let chunk_rx = chunk_rx.clone();
        let result_tx = result_tx.clone();
        let handle = thread::Builder::new()
            .name(format!("gen-worker-{thread_id}"))
            .spawn(move || generation_worker(thread_id, chunk_rx, result_tx))?;
        handles.push(handle);
    }
    drop(chunk_rx);

    let feeder = thread::Builder::new()
        .name("gen-feeder".to_string())
        .spawn(move || feed_chunks(planner, chunk_tx))?;

    let closer = thread::Builder::new()
        .name("gen-closer".to_string())
        .spawn(move || close_when_done(handles, result_tx))?;

    let mut collector = ReassemblyCollector::new(total_chunks);
    let collected = collector.collect(&result_rx);
    // 收集提前失败时让阻塞在发送上的生成线程尽快退出
    drop(result_rx);

    let fed = feeder
        .join()
        .map_err(|_| PipelineError::worker_error("投递线程异常退出"))?;
    let closed = closer
        .join()
        .map_err(|_| PipelineError::worker_error("关闭线程异常退出"))?;

    collected?;
    let processed = closed?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        "生成阶段结束: 投递 {} 个分块，处理 {} 个分块，收到 {} 个分块",
        fed,
        processed,
        collector.received()
    );
    #[cfg(not(feature = "logging"))]
    let _ = (fed, processed);

    let chunks = collector.into_ordered()?;

    let mut writer = SequentialWriter::new(
        exporter,
        FlushPolicy::EveryChunks(config.flush_every_chunks),
    );
    for (chunk_id, records) in chunks.iter().enumerate() {
        if let Err(e) = writer.write_chunk(chunk_id, records) {
            #[cfg(feature = "logging")]
            tracing::error!("写出分块 {} 失败: {}", chunk_id, e);
            return Err(e);
        }
    }

    let (stats, _) = writer.finish()?;
    let duration = start_time.elapsed();

    #[cfg(feature = "logging")]
    tracing::info!(
        "并行生成完成: {} 条记录，{} 个分块，刷新 {} 次，耗时: {:?}",
        stats.records_written,
        stats.chunks_written,
        stats.flushes,
        duration
    );

    Ok(GenerationSummary {
        records_written: stats.records_written,
        chunks: stats.chunks_written,
        flushes: stats.flushes,
        duration,
        path: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::CsvExporter;
    use crate::record::Record;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(record_count: usize, chunk_size: usize, workers: usize) -> GenerationConfig {
        GenerationConfig {
            record_count,
            chunk_size,
            worker_count: workers,
            ..GenerationConfig::default()
        }
    }

    fn render_parallel(config: &GenerationConfig) -> Vec<u8> {
        let mut exporter = CsvExporter::from_writer(Vec::new());
        generate_parallel(config, &mut exporter).unwrap();
        exporter.into_inner().unwrap()
    }

    fn render_sequential(config: &GenerationConfig) -> Vec<u8> {
        let mut exporter = CsvExporter::from_writer(Vec::new());
        generate_sequential(config, &mut exporter).unwrap();
        exporter.into_inner().unwrap()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for (n, chunk, workers) in
            [(0, 10, 2), (1, 10, 3), (25, 10, 4), (1000, 7, 1), (1000, 7, 8)]
        {
            let cfg = config(n, chunk, workers);
            assert_eq!(
                render_parallel(&cfg),
                render_sequential(&cfg),
                "n={n} chunk={chunk} workers={workers}"
            );
        }
    }

    #[test]
    fn test_zero_records_writes_header_only() {
        let out = render_parallel(&config(0, 10, 2));
        assert_eq!(String::from_utf8(out).unwrap(), "ID,Name,Email,Age\n");
    }

    #[test]
    fn test_parallel_summary() {
        let mut exporter = CsvExporter::from_writer(Vec::new());
        let summary = generate_parallel(&config(25, 10, 3), &mut exporter).unwrap();
        assert_eq!(summary.records_written, 25);
        assert_eq!(summary.chunks, 3);
        // 分块 0 之后一次，最终一次
        assert_eq!(summary.flushes, 2);
    }

    struct FailAt {
        fail_at: usize,
        attempts: Arc<AtomicUsize>,
    }

    impl SyncExporter for FailAt {
        fn name(&self) -> &str {
            "FAIL_AT"
        }

        fn export_record(&mut self, _record: &Record) -> Result<()> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt == self.fail_at {
                return Err(PipelineError::Io(std::io::Error::other(
                    "forced write failure",
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_stops_sequential() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let exporter = FailAt { fail_at: 10_000, attempts: attempts.clone() };
        let err = generate_sequential(&config(20_000, 10_000, 1), exporter)
            .unwrap_err();
        assert!(err.is_io_error());
        assert_eq!(attempts.load(Ordering::SeqCst), 10_000);
    }

    #[test]
    fn test_write_failure_stops_parallel() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let exporter = FailAt { fail_at: 10_000, attempts: attempts.clone() };
        let err =
            generate_parallel(&config(25_000, 1_000, 4), exporter).unwrap_err();
        assert!(err.is_io_error());
        assert_eq!(attempts.load(Ordering::SeqCst), 10_000);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let exporter = CsvExporter::from_writer(Vec::new());
        let err = generate_parallel(&config(10, 5, 0), exporter).unwrap_err();
        assert!(err.is_config_error());
    }
}
