//! 顺序写出
//!
//! 把有序记录流写入导出器，按批次周期性刷新。
//! 任何写入或刷新失败都立即返回，不再尝试后续记录。

use crate::error::Result;
use crate::exporter::SyncExporter;
use crate::record::Record;

/// 周期刷新策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// 每写出 N 条记录刷新一次
    EveryRecords(usize),
    /// 分块 ID 是 N 的倍数时，在该分块写完后刷新
    EveryChunks(usize),
}

/// 写出统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub records_written: usize,
    pub chunks_written: usize,
    pub flushes: usize,
}

/// 顺序写出器
pub struct SequentialWriter<E: SyncExporter> {
    exporter: E,
    policy: FlushPolicy,
    stats: WriterStats,
}

impl<E: SyncExporter> SequentialWriter<E> {
    pub fn new(exporter: E, policy: FlushPolicy) -> Self {
        Self { exporter, policy, stats: WriterStats::default() }
    }

    /// 写出一条记录
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.exporter.export_record(record)?;
        self.stats.records_written += 1;

        if let FlushPolicy::EveryRecords(every) = self.policy {
            if every > 0 && self.stats.records_written % every == 0 {
                self.flush()?;
            }
        }
        Ok(())
    }

    /// 写出一个完整分块
    pub fn write_chunk(&mut self, chunk_id: usize, records: &[Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        self.stats.chunks_written += 1;

        if let FlushPolicy::EveryChunks(every) = self.policy {
            if every > 0 && chunk_id % every == 0 {
                self.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        #[cfg(feature = "logging")]
        tracing::trace!(
            "{} 刷新: 已写出 {} 条记录",
            self.exporter.name(),
            self.stats.records_written
        );
        self.exporter.flush()?;
        self.stats.flushes += 1;
        Ok(())
    }

    /// 最终刷新并返回统计
    pub fn finish(mut self) -> Result<(WriterStats, E)> {
        self.exporter.finalize()?;
        self.stats.flushes += 1;
        Ok((self.stats, self.exporter))
    }
}
