use crate::error::FileError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载原始记录列表
///
/// 支持两种格式：顶层数组，或 `{"data": [...]}` 包装。
/// 单条记录不在这里校验，交给 [`crate::workflow::RecordFlow`] 逐条处理。
pub async fn load_records(path: &Path) -> Result<Vec<Value>, FileError> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            FileError::InputNotFound {
                path: path_str.clone(),
            }
        } else {
            FileError::InputRead {
                path: path_str.clone(),
                source: e,
            }
        }
    })?;

    let parsed: Value =
        serde_json::from_str(&content).map_err(|e| FileError::InputMalformed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

    match unwrap_envelope(parsed) {
        Value::Array(records) => {
            tracing::debug!("从 {} 读取到 {} 条记录", path_str, records.len());
            Ok(records)
        }
        other => Err(FileError::InputMalformed {
            path: path_str,
            reason: format!(
                "期望记录数组, 实际为 {}",
                crate::models::restaurant::json_type_name(&other)
            ),
        }),
    }
}

/// 去掉可选的 `data` 包装
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if obj.contains_key("data") => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
