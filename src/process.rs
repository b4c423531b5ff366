//! 生成与处理阶段的入口
//!
//! - [`create_csv_records`]：清空输出目录并生成 CSV 文件
//! - [`process_csv_sequentially`]：在当前线程上逐行解析并处理
//! - [`process_csv_with_worker_pool`]：投递线程解析文件，工作池并发处理
//!
//! 解析失败的行被丢弃并计数，配置了拒绝行报告时同时写入报告。

use crate::config::{GenerationConfig, PoolConfig};
use crate::error::Result;
use crate::exporter::CsvExporter;
use crate::generator::{GenerationSummary, generate_parallel, generate_sequential};
use crate::pool::{
    DispatchStats, JobFailure, JobHandler, PoolSummary, WorkerPool, WorkerReport,
};
use crate::reader::CsvRecordReader;
use crate::record::{HEADER, Job, parse_fields};
use crate::reject_writer::RejectWriter;
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// 生成 CSV 文件
///
/// 输出目录存在时先整体删除再重建，然后按配置走顺序或并行路径。
pub fn create_csv_records(config: &GenerationConfig) -> Result<GenerationSummary> {
    let dir = Path::new(&config.output_dir);
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            #[cfg(feature = "logging")]
            tracing::debug!("已删除旧输出目录: {}", dir.display());
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(dir)?;

    let path = config.output_path();
    let exporter = CsvExporter::new(&path)?;

    #[cfg(feature = "logging")]
    tracing::info!(
        "生成 {} 条记录到 {} ({})",
        config.record_count,
        path.display(),
        if config.parallel { "并行" } else { "顺序" }
    );

    let mut summary = if config.parallel {
        generate_parallel(config, exporter)?
    } else {
        generate_sequential(config, exporter)?
    };
    summary.path = Some(path);
    Ok(summary)
}

/// 读取全部数据行，解析成功的作业交给 `sink`
///
/// 表头单独读取，与预期不符时只告警。解析失败的行只计数、记日志并写入拒绝行报告；
/// 读取错误和 `sink` 的错误会中止读取并返回。
pub fn dispatch_rows<R, F>(
    mut rows: CsvRecordReader<R>,
    source: &Path,
    rejects: Option<&RejectWriter>,
    mut sink: F,
) -> Result<DispatchStats>
where
    R: Read,
    F: FnMut(Job) -> Result<()>,
{
    let mut stats = DispatchStats::default();

    let header = rows.headers()?;
    if !header.is_empty() && header != HEADER {
        #[cfg(feature = "logging")]
        tracing::warn!("{} 的表头与预期不符: {:?}", source.display(), header);
    }

    for row in rows {
        let row = row?;
        stats.rows_read += 1;

        match parse_fields(&row.fields) {
            Ok(job) => {
                sink(job)?;
                stats.dispatched += 1;
            }
            Err(e) => {
                stats.dropped += 1;
                #[cfg(feature = "logging")]
                tracing::error!("第 {} 行解析失败，已丢弃: {}", row.line, e);
                if let Some(rejects) = rejects {
                    rejects.write_reject(source, row.line, &row.raw, &e);
                }
            }
        }
    }

    Ok(stats)
}

/// 在当前线程上逐行解析并处理，处理器的工作线程 ID 固定为 0
pub fn process_csv_sequentially<P, H>(
    path: P,
    handler: &H,
    rejects: Option<&RejectWriter>,
) -> Result<PoolSummary>
where
    P: AsRef<Path>,
    H: JobHandler + ?Sized,
{
    let path = path.as_ref();
    let start_time = Instant::now();
    let reader = CsvRecordReader::open(path)?;

    let mut report = WorkerReport::new(0);
    let dispatch = dispatch_rows(reader, path, rejects, |job| {
        if let Err(e) = handler.handle(0, &job) {
            #[cfg(feature = "logging")]
            tracing::error!("处理作业 {} 失败: {}", job.id, e);
            report.failures.push(JobFailure {
                job_id: job.id,
                worker_id: 0,
                message: e.to_string(),
            });
        }
        report.processed += 1;
        Ok(())
    })?;

    let mut summary = PoolSummary::from_reports(vec![report], start_time.elapsed());
    summary.dispatch = dispatch;

    #[cfg(feature = "logging")]
    tracing::info!(
        "顺序处理完成: 读取 {} 行，处理 {} 个，丢弃 {} 行，失败 {} 个，耗时: {:?}",
        summary.dispatch.rows_read,
        summary.processed,
        summary.dispatch.dropped,
        summary.failed(),
        summary.duration
    );

    Ok(summary)
}

/// 投递线程逐行解析文件并送入工作池，等待全部作业处理完成
///
/// 文件在调用线程上打开，打开失败直接返回错误而不启动工作池。
pub fn process_csv_with_worker_pool<P, H>(
    path: P,
    config: &PoolConfig,
    handler: Arc<H>,
    rejects: Option<Arc<RejectWriter>>,
) -> Result<PoolSummary>
where
    P: AsRef<Path>,
    H: JobHandler + ?Sized + 'static,
{
    let path = path.as_ref().to_path_buf();
    let pool = WorkerPool::from_config(config)?;
    let reader = CsvRecordReader::open(&path)?;

    pool.run(handler, move |submitter| {
        dispatch_rows(reader, &path, rejects.as_deref(), |job| {
            submitter.submit(job)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use std::io::Cursor;

    fn reader(text: &str) -> CsvRecordReader<Cursor<Vec<u8>>> {
        CsvRecordReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_dispatch_skips_header_and_drops_bad_rows() {
        let text = "ID,Name,Email,Age\n\
                    1,Name1,user1@example.com,21\n\
                    2,Name2,user2@example.com,abc\n\
                    3,Name3\n\
                    4,Name4,user4@example.com,24\n";
        let mut jobs = Vec::new();
        let stats = dispatch_rows(reader(text), Path::new("mem.csv"), None, |job| {
            jobs.push(job);
            Ok(())
        })
        .unwrap();

        assert_eq!(stats, DispatchStats { rows_read: 4, dispatched: 2, dropped: 2 });
        let ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_dispatch_skips_mismatched_header() {
        let text = "id,name\n1,Name1,user1@example.com,21\n";
        let stats = dispatch_rows(reader(text), Path::new("x.csv"), None, |_| Ok(()))
            .unwrap();
        assert_eq!(stats, DispatchStats { rows_read: 1, dispatched: 1, dropped: 0 });
    }

    #[test]
    fn test_dispatch_empty_input() {
        let stats =
            dispatch_rows(reader(""), Path::new("empty.csv"), None, |_| Ok(()))
                .unwrap();
        assert_eq!(stats, DispatchStats::default());
    }

    #[test]
    fn test_dispatch_stops_on_sink_error() {
        let text = "ID,Name,Email,Age\n1,a,b,21\n2,a,b,22\n";
        let mut seen = 0;
        let result = dispatch_rows(reader(text), Path::new("x.csv"), None, |_| {
            seen += 1;
            Err(crate::error::PipelineError::worker_error("closed"))
        });
        assert!(result.unwrap_err().is_worker_error());
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_dispatch_drops_padded_age() {
        let text = "ID,Name,Email,Age\n1,a,b, 21\n2,a,b,22 \n3,a,b,23\n";
        let mut ids = Vec::new();
        let stats = dispatch_rows(reader(text), Path::new("x.csv"), None, |job| {
            ids.push(job.id);
            Ok(())
        })
        .unwrap();
        assert_eq!(stats.dropped, 2);
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_dispatch_writes_rejects_with_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("rejects.jsonl");
        let rejects = RejectWriter::new(&report).unwrap();
        let text = "ID,Name,Email,Age\r\n1,\"a\r\nb\",c,x\r\n2,a,b,22\r\n";
        let stats =
            dispatch_rows(reader(text), Path::new("x.csv"), Some(&rejects), |_| Ok(()))
                .unwrap();
        assert_eq!(stats.dropped, 1);

        let content = fs::read_to_string(&report).unwrap();
        let entry: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(entry["line"], 2);
        assert_eq!(entry["raw"], "1,\"a\r\nb\",c,x");
    }

    #[test]
    fn test_sequential_collects_handler_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            "ID,Name,Email,Age\n1,Name1,user1@example.com,21\n2,Name2,user2@example.com,22\n",
        )
        .unwrap();

        let handler = |worker: usize, job: &Job| -> std::result::Result<(), JobError> {
            assert_eq!(worker, 0);
            if job.id == "2" { Err(JobError::new("nope")) } else { Ok(()) }
        };
        let summary = process_csv_sequentially(&path, &handler, None).unwrap();
        assert_eq!(summary.workers, 1);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failures[0].job_id, "2");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = process_csv_with_worker_pool(
            &missing,
            &PoolConfig::default(),
            Arc::new(crate::pool::SimulatedWork::noop()),
            None,
        )
        .unwrap_err();
        assert!(err.is_io_error());
    }
}
