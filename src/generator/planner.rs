//! 分块规划
//!
//! 把 `[1, n]` 切分为固定大小、连续且互不重叠的分块，
//! 分块 ID 按规划顺序从 0 开始递增，供重组阶段直接作为槽位下标。

use super::types::WorkChunk;
use crate::error::{PipelineError, Result};

/// 分块规划器
#[derive(Debug, Clone, Copy)]
pub struct ChunkPlanner {
    total: usize,
    chunk_size: usize,
}

impl ChunkPlanner {
    /// `chunk_size` 必须大于 0
    pub fn new(total: usize, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PipelineError::config_error("分块大小不能为0"));
        }
        Ok(Self { total, chunk_size })
    }

    /// 分块总数 `ceil(total / chunk_size)`
    pub fn total_chunks(&self) -> usize {
        self.total.div_ceil(self.chunk_size)
    }

    /// 第 `id` 个分块
    pub fn chunk(&self, id: usize) -> Option<WorkChunk> {
        if id >= self.total_chunks() {
            return None;
        }
        let start = 1 + id * self.chunk_size;
        let end = (start + self.chunk_size - 1).min(self.total);
        Some(WorkChunk { start, end, id })
    }

    /// 按规划顺序遍历全部分块
    pub fn iter(&self) -> ChunkPlan {
        ChunkPlan { planner: *self, next_id: 0 }
    }
}

impl IntoIterator for ChunkPlanner {
    type Item = WorkChunk;
    type IntoIter = ChunkPlan;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 分块迭代器
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    planner: ChunkPlanner,
    next_id: usize,
}

impl Iterator for ChunkPlan {
    type Item = WorkChunk;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.planner.chunk(self.next_id)?;
        self.next_id += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.planner.total_chunks().saturating_sub(self.next_id);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkPlan {}
