//! 记录合成
//!
//! 记录完全由序号 `i` 决定，不依赖任何共享状态，
//! 因此任意数量的生成线程都能得到与顺序生成完全一致的输出。

use super::types::Record;
use std::fmt::Write;

/// 年龄循环周期
pub const AGE_PERIOD: usize = 30;

/// 最小年龄
pub const AGE_BASE: usize = 20;

/// 记录合成器
///
/// 每个生成线程持有一个实例：年龄字符串预先计算，
/// 序号格式化复用本地缓冲区。
#[derive(Debug, Clone)]
pub struct RecordSynthesizer {
    ages: Vec<String>,
    scratch: String,
}

impl RecordSynthesizer {
    pub fn new() -> Self {
        let ages =
            (0..AGE_PERIOD).map(|offset| (AGE_BASE + offset).to_string()).collect();
        Self { ages, scratch: String::with_capacity(20) }
    }

    /// 合成第 `i` 条记录
    pub fn synthesize(&mut self, i: usize) -> Record {
        self.scratch.clear();
        // 写入 String 不会失败
        let _ = write!(self.scratch, "{i}");
        let id = self.scratch.as_str();

        let mut name = String::with_capacity(4 + id.len());
        name.push_str("Name");
        name.push_str(id);

        let mut email = String::with_capacity(16 + id.len());
        email.push_str("user");
        email.push_str(id);
        email.push_str("@example.com");

        Record {
            id: id.to_string(),
            name,
            email,
            age: self.ages[i % AGE_PERIOD].clone(),
        }
    }

    /// 合成闭区间 `[start, end]` 内的全部记录
    pub fn synthesize_range(&mut self, start: usize, end: usize) -> Vec<Record> {
        if start > end {
            return Vec::new();
        }
        let mut records = Vec::with_capacity(end - start + 1);
        for i in start..=end {
            records.push(self.synthesize(i));
        }
        records
    }
}

impl Default for RecordSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
