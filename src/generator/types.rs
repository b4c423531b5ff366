//! 生成阶段相关的数据类型定义

use crate::record::Record;
use std::path::PathBuf;
use std::time::Duration;

/// 工作分块：闭区间 `[start, end]` 及其序号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkChunk {
    /// 起始序号（含）
    pub start: usize,
    /// 结束序号（含）
    pub end: usize,
    /// 分块 ID，按规划顺序从 0 连续递增
    pub id: usize,
}

impl WorkChunk {
    /// 分块包含的记录数
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// 分块生成结果
#[derive(Debug, Clone)]
pub struct ChunkResult {
    /// 对应的分块 ID
    pub chunk_id: usize,
    /// 该分块按序号排列的记录
    pub records: Vec<Record>,
}

/// 一次生成调用的汇总
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// 写出的数据行数（不含表头）
    pub records_written: usize,
    /// 处理的分块数（顺序生成为 0）
    pub chunks: usize,
    /// 刷新次数（含最终刷新）
    pub flushes: usize,
    /// 总耗时
    pub duration: Duration,
    /// 输出文件路径（直接写入内存时为空）
    pub path: Option<PathBuf>,
}
