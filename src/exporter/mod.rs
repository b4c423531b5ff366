//! 数据导出模块
//!
//! 提供统一的同步导出接口和 CSV 实现

pub mod csv;

pub use csv::CsvExporter;

use crate::error::Result;
use crate::record::Record;

/// 同步数据导出器的统一接口
pub trait SyncExporter: Send {
    /// 导出器名称
    fn name(&self) -> &str;

    /// 导出单个记录
    fn export_record(&mut self, record: &Record) -> Result<()>;

    /// 把缓冲数据刷新到底层输出
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// 完成导出，最后一次刷新
    fn finalize(&mut self) -> Result<()> {
        self.flush()
    }
}

impl<E: SyncExporter + ?Sized> SyncExporter for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn export_record(&mut self, record: &Record) -> Result<()> {
        (**self).export_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn finalize(&mut self) -> Result<()> {
        (**self).finalize()
    }
}
