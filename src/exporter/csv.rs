//! CSV 导出器实现

use super::SyncExporter;
use crate::error::Result;
use crate::record::{HEADER, Record};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 导出器
///
/// 表头在第一次写入（或 finalize）时写出，因此零条记录的输出只包含表头。
pub struct CsvExporter<W: Write + Send = File> {
    writer: BufWriter<W>,
    header_written: bool,
}

impl CsvExporter<File> {
    /// 创建写入文件的 CSV 导出器
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write + Send> CsvExporter<W> {
    /// 包装任意输出
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            header_written: false,
        }
    }

    /// 刷新并取回底层输出
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }

    /// 写入 CSV 头部
    fn write_header(&mut self) -> Result<()> {
        self.write_row(&HEADER)?;
        self.header_written = true;
        Ok(())
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(escape_csv_field(field).as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// 转义 CSV 字段
pub fn escape_csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
    {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

impl<W: Write + Send> SyncExporter for CsvExporter<W> {
    fn name(&self) -> &str {
        "CSV"
    }

    fn export_record(&mut self, record: &Record) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        self.write_row(&record.fields())?;

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        // 没有任何记录时仍需要写入头部
        if !self.header_written {
            self.write_header()?;
        }

        self.flush()?;

        #[cfg(feature = "logging")]
        tracing::debug!("CSV导出完成");

        Ok(())
    }
}
