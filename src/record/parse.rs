use super::types::{FIELD_COUNT, Job};
use crate::error::RecordError;

/// 将一行 CSV 字段解析为作业
///
/// Age 必须是不带空白的十进制整数，前后有空格同样视为无效。
/// 字段数不为 4 或 Age 不是整数时返回 [`RecordError`]，调用方应丢弃该行。
pub fn parse_fields(fields: &[String]) -> Result<Job, RecordError> {
    let [id, name, email, age] = fields else {
        return Err(RecordError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let age = age.parse::<i64>().map_err(|source| {
        RecordError::InvalidAge { id: id.clone(), value: age.clone(), source }
    })?;

    Ok(Job { id: id.clone(), name: name.clone(), email: email.clone(), age })
}
