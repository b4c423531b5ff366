//! CSV 流式读取
//!
//! 基于 `csv` crate：表头单独读取，数据行逐条产出。字段内的逗号、`""`
//! 以及跨物理行的换行都原样保留。字段数不固定，交给上层按行判定。

use crate::error::Result;
use crate::exporter::csv::escape_csv_field;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 一条逻辑 CSV 记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// 记录起始的物理行号（从 1 开始）
    pub line: usize,
    /// 解码后的字段
    pub fields: Vec<String>,
    /// 按 CSV 规则重新编码的整行文本
    pub raw: String,
}

impl CsvRow {
    fn from_record(record: &StringRecord) -> Self {
        let line = record.position().map_or(0, |pos| pos.line() as usize);
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        let raw = fields
            .iter()
            .map(|f| escape_csv_field(f))
            .collect::<Vec<_>>()
            .join(",");
        Self { line, fields, raw }
    }
}

/// CSV 记录读取器，迭代产出表头之后的数据行
pub struct CsvRecordReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl CsvRecordReader<BufReader<File>> {
    /// 打开文件
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> CsvRecordReader<R> {
    pub fn new(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Self { reader, record: StringRecord::new() }
    }

    /// 表头字段；输入为空时返回空列表
    pub fn headers(&mut self) -> Result<Vec<String>> {
        Ok(self.reader.headers()?.iter().map(str::to_string).collect())
    }
}

impl<R: Read> Iterator for CsvRecordReader<R> {
    type Item = Result<CsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(CsvRow::from_record(&self.record))),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
