use serde::Serialize;

/// CSV 表头
pub const HEADER: [&str; 4] = ["ID", "Name", "Email", "Age"];

/// 每条记录的字段数
pub const FIELD_COUNT: usize = HEADER.len();

/// 单条合成记录，四个字段在边界上都是文本
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// 序号的十进制形式
    pub id: String,
    /// `"Name" + ID`
    pub name: String,
    /// `"user" + ID + "@example.com"`
    pub email: String,
    /// 年龄（文本）
    pub age: String,
}

impl Record {
    /// 按表头顺序返回字段
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [&self.id, &self.name, &self.email, &self.age]
    }
}

/// 从持久化记录解析出的作业
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
}
