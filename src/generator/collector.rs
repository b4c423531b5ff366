//! 有序重组
//!
//! 分块 ID 是事先已知的稠密整数 `0..total_chunks`，
//! 因此无需排序：每个结果直接放入对应槽位，通道关闭后按槽位顺序输出。
//! 槽位只由收集线程读写，不需要加锁。

use super::types::ChunkResult;
use crate::error::{PipelineError, Result};
use crate::record::Record;
use crossbeam_channel::Receiver;

/// 重组收集器
#[derive(Debug)]
pub struct ReassemblyCollector {
    slots: Vec<Option<Vec<Record>>>,
    received: usize,
}

impl ReassemblyCollector {
    /// 预分配 `total_chunks` 个空槽位
    pub fn new(total_chunks: usize) -> Self {
        Self { slots: vec![None; total_chunks], received: 0 }
    }

    /// 放入一个分块结果
    pub fn insert(&mut self, result: ChunkResult) -> Result<()> {
        let total = self.slots.len();
        let Some(slot) = self.slots.get_mut(result.chunk_id) else {
            return Err(PipelineError::reassembly_error(format!(
                "分块 ID {} 超出范围 (共 {} 个分块)",
                result.chunk_id, total
            )));
        };
        if slot.is_some() {
            return Err(PipelineError::reassembly_error(format!(
                "分块 {} 重复到达",
                result.chunk_id
            )));
        }

        #[cfg(feature = "logging")]
        tracing::trace!(
            "收到分块 {}，记录数: {}",
            result.chunk_id,
            result.records.len()
        );

        *slot = Some(result.records);
        self.received += 1;
        Ok(())
    }

    /// 持续接收直到通道关闭，返回本次接收的分块数
    pub fn collect(&mut self, results: &Receiver<ChunkResult>) -> Result<usize> {
        let mut count = 0;
        for result in results.iter() {
            self.insert(result)?;
            count += 1;
        }
        Ok(count)
    }

    /// 已收到的分块数
    pub fn received(&self) -> usize {
        self.received
    }

    /// 是否所有槽位都已填满
    pub fn is_complete(&self) -> bool {
        self.received == self.slots.len()
    }

    /// 按分块 ID 顺序取出各分块的记录
    ///
    /// 存在空槽位（例如某个工作线程异常退出）时返回错误。
    pub fn into_ordered(self) -> Result<Vec<Vec<Record>>> {
        if !self.is_complete() {
            let missing = self.slots.iter().position(Option::is_none).unwrap_or(0);
            return Err(PipelineError::reassembly_error(format!(
                "分块 {} 缺失，已收到 {}/{}",
                missing,
                self.received,
                self.slots.len()
            )));
        }
        Ok(self.slots.into_iter().flatten().collect())
    }
}
