//! 被丢弃行的 JSONL 报告
//!
//! 每行一个 JSON 对象，字段为 `path`、`line`、`error`、`raw`：
//!
//! ```json
//! {"path":"testdata/data.csv","line":6,"error":"年龄字段无效 (ID=5): \"abc\": invalid digit found in string","raw":"5,Name5,user5@example.com,abc"}
//! ```
//!
//! 写入失败只记录日志，不中断处理流程。

use crate::error::RecordError;
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 线程安全的拒绝行写入器，以追加方式打开报告文件
pub struct RejectWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl RejectWriter {
    /// 打开报告文件，必要时创建父目录
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self { writer: Mutex::new(BufWriter::new(file)), path })
    }

    /// 写入一条被丢弃的行并立即刷新
    pub fn write_reject<P: AsRef<Path>>(
        &self,
        source: P,
        line: usize,
        raw: &str,
        error: &RecordError,
    ) {
        let entry = json!({
            "path": source.as_ref().to_string_lossy(),
            "line": line,
            "error": error.to_string(),
            "raw": raw,
        });

        let Ok(mut writer) = self.writer.lock() else {
            #[cfg(feature = "logging")]
            tracing::error!("获取拒绝行写入器锁失败");
            return;
        };

        if writeln!(writer, "{entry}").and_then(|_| writer.flush()).is_err() {
            #[cfg(feature = "logging")]
            tracing::error!("写入拒绝行报告失败: {}", self.path.display());
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RejectWriter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
