//! 记录与作业的数据模型
//!
//! - [`Record`]：生成阶段写出的四元组文本记录
//! - [`Job`]：处理阶段从文件解析出的作业
//! - [`RecordSynthesizer`]：按序号合成记录的纯函数实现

pub mod parse;
pub mod synth;
pub mod types;

pub use parse::parse_fields;
pub use synth::RecordSynthesizer;
pub use types::{FIELD_COUNT, HEADER, Job, Record};
