//! 生成工作线程相关功能
//!
//! 完成顺序分两级，不能合并或颠倒：
//! 1. 投递线程把所有分块送入有界输入队列后关闭输入队列；
//! 2. 关闭线程等待全部生成线程退出后，才释放最后一个结果发送端，
//!    结果队列随之关闭，收集端的遍历才会结束。

use super::planner::ChunkPlanner;
use super::types::{ChunkResult, WorkChunk};
use crate::error::{PipelineError, Result};
use crate::record::RecordSynthesizer;
use crossbeam_channel::{Receiver, Sender};
use std::thread::JoinHandle;

/// 生成工作线程
///
/// 只使用本地的 [`RecordSynthesizer`]，线程之间没有共享可变状态。
/// 返回处理的分块数。
pub fn generation_worker(
    thread_id: usize,
    chunk_rx: Receiver<WorkChunk>,
    result_tx: Sender<ChunkResult>,
) -> usize {
    #[cfg(feature = "logging")]
    tracing::debug!("生成线程 {} 启动", thread_id);

    let mut synth = RecordSynthesizer::new();
    let mut processed = 0;

    for chunk in chunk_rx.iter() {
        let records = synth.synthesize_range(chunk.start, chunk.end);

        #[cfg(feature = "logging")]
        tracing::trace!(
            "生成线程 {} 完成分块 {} [{}, {}]",
            thread_id,
            chunk.id,
            chunk.start,
            chunk.end
        );

        if result_tx.send(ChunkResult { chunk_id: chunk.id, records }).is_err()
        {
            // 收集端已经放弃，继续生成没有意义
            #[cfg(feature = "logging")]
            tracing::warn!("生成线程 {} 结果通道已关闭，提前退出", thread_id);
            break;
        }
        processed += 1;
    }

    #[cfg(feature = "logging")]
    tracing::debug!("生成线程 {} 退出，处理了 {} 个分块", thread_id, processed);

    #[cfg(not(feature = "logging"))]
    let _ = thread_id;

    processed
}

/// 投递线程：按规划顺序发送全部分块，返回发送的分块数
///
/// 函数返回时 `chunk_tx` 被丢弃，即关闭输入队列。
pub fn feed_chunks(planner: ChunkPlanner, chunk_tx: Sender<WorkChunk>) -> usize {
    let mut sent = 0;
    for chunk in planner {
        if chunk_tx.send(chunk).is_err() {
            #[cfg(feature = "logging")]
            tracing::warn!("所有生成线程已退出，停止投递分块 {}", chunk.id);
            break;
        }
        sent += 1;
    }

    #[cfg(feature = "logging")]
    tracing::debug!("投递线程完成，共投递 {} 个分块", sent);

    sent
}

/// 关闭线程：等待全部生成线程退出后再释放结果发送端
pub fn close_when_done(
    handles: Vec<JoinHandle<usize>>,
    result_tx: Sender<ChunkResult>,
) -> Result<usize> {
    let mut panicked = 0;
    let mut processed = 0;

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(count) => processed += count,
            Err(e) => {
                panicked += 1;
                #[cfg(feature = "logging")]
                tracing::error!("生成线程 {} panic: {:?}", i, e);
                #[cfg(not(feature = "logging"))]
                let _ = (i, e);
            }
        }
    }

    drop(result_tx);

    if panicked > 0 {
        return Err(PipelineError::worker_error(format!(
            "{panicked} 个生成线程异常退出"
        )));
    }
    Ok(processed)
}
