//! 完成屏障
//!
//! 记录仍在运行的工作线程数。每个工作线程持有一个 [`BarrierGuard`]，
//! 线程退出（包括 panic 展开）时计数减一；计数归零时唤醒等待方。

use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// 工作线程完成屏障
#[derive(Debug)]
pub struct CompletionBarrier {
    outstanding: Mutex<usize>,
    all_done: Condvar,
}

impl CompletionBarrier {
    /// 创建计数为 `participants` 的屏障，并为每个参与者生成一个守卫
    pub fn with_guards(participants: usize) -> (Arc<Self>, Vec<BarrierGuard>) {
        let barrier = Arc::new(Self {
            outstanding: Mutex::new(participants),
            all_done: Condvar::new(),
        });
        let guards = (0..participants)
            .map(|_| BarrierGuard { barrier: Arc::clone(&barrier) })
            .collect();
        (barrier, guards)
    }

    /// 仍在运行的参与者数
    pub fn outstanding(&self) -> usize {
        *self.outstanding.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 阻塞直到所有参与者退出
    pub fn wait(&self) {
        let mut outstanding =
            self.outstanding.lock().unwrap_or_else(PoisonError::into_inner);
        while *outstanding > 0 {
            outstanding = self
                .all_done
                .wait(outstanding)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn arrive(&self) {
        let mut outstanding =
            self.outstanding.lock().unwrap_or_else(PoisonError::into_inner);
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.all_done.notify_all();
        }
    }
}

/// 参与者守卫，丢弃时向屏障报告退出
#[derive(Debug)]
pub struct BarrierGuard {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_releases_after_all_guards_drop() {
        let (barrier, guards) = CompletionBarrier::with_guards(3);
        assert_eq!(barrier.outstanding(), 3);

        let handles: Vec<_> = guards
            .into_iter()
            .enumerate()
            .map(|(i, guard)| {
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(5 * i as u64));
                    drop(guard);
                })
            })
            .collect();

        barrier.wait();
        assert_eq!(barrier.outstanding(), 0);
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_guard_released_on_panic() {
        let (barrier, mut guards) = CompletionBarrier::with_guards(1);
        let guard = guards.pop().unwrap();
        let handle = thread::spawn(move || {
            let _guard = guard;
            panic!("worker failure");
        });
        assert!(handle.join().is_err());
        barrier.wait();
        assert_eq!(barrier.outstanding(), 0);
    }

    #[test]
    fn test_zero_participants_does_not_block() {
        let (barrier, guards) = CompletionBarrier::with_guards(0);
        assert!(guards.is_empty());
        barrier.wait();
    }
}
