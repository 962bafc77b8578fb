//! 结果写入服务 - 业务能力层
//!
//! 只负责把结果记录写成文件，不关心记录从哪来

use crate::error::FileError;
use crate::models::ResultRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 结果写入服务
pub struct ResultWriter {
    output_path: PathBuf,
}

impl ResultWriter {
    /// 使用指定路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    /// 写入结果，覆盖已有内容
    ///
    /// 输出为 4 空格缩进的 JSON 数组
    pub async fn write(&self, records: &[ResultRecord]) -> Result<(), FileError> {
        let path_str = self.output_path.display().to_string();

        let content = to_pretty_json(records).map_err(|e| FileError::OutputWriteFailure {
            path: path_str.clone(),
            source: Box::new(e),
        })?;

        debug!("写入 {} 条结果到 {}", records.len(), path_str);

        tokio::fs::write(&self.output_path, content)
            .await
            .map_err(|e| FileError::OutputWriteFailure {
                path: path_str,
                source: Box::new(e),
            })
    }
}

/// 4 空格缩进的 JSON 序列化
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn record(id: u64, name: &str) -> ResultRecord {
        ResultRecord {
            id: Number::from(id),
            restaurant_name: name.to_string(),
            rating: Number::from(4),
            distance_from_me: Number::from_f64(1.5).unwrap(),
            score: 40.69,
        }
    }

    #[tokio::test]
    async fn test_write_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::with_path(dir.path().join("top_results.json"));

        tokio_test::assert_ok!(writer.write(&[record(1, "A")]).await);

        let content = std::fs::read_to_string(writer.path()).unwrap();
        let expected = "[\n    {\n        \"id\": 1,\n        \"restaurant_name\": \"A\",\n        \"rating\": 4,\n        \"distance_from_me\": 1.5,\n        \"score\": 40.69\n    }\n]";
        assert_eq!(content, expected);
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old content that is much longer than the new one").unwrap();

        let writer = ResultWriter::with_path(&path);
        writer.write(&[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::with_path(dir.path().join("missing_dir").join("out.json"));

        let result = writer.write(&[record(1, "A")]).await;
        assert!(matches!(result, Err(FileError::OutputWriteFailure { .. })));
    }

    #[tokio::test]
    async fn test_debug_logging_and_error_path() {
        crate::utils::logging::init(true);

        let dir = tempfile::tempdir().unwrap();
        let ok = ResultWriter::with_path(dir.path().join("top_results.json"));
        tokio_test::assert_ok!(ok.write(&[record(2, "B")]).await);

        let bad_path = dir.path().join("missing_dir").join("top_results.json");
        let err = ResultWriter::with_path(&bad_path)
            .write(&[record(2, "B")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains(&bad_path.display().to_string()));
    }

    #[tokio::test]
    async fn test_non_ascii_written_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::with_path(dir.path().join("top_results.json"));

        let records = vec![record(5, "Café Ñandú 餐厅")];
        writer.write(&records).await.unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert!(content.contains("\"restaurant_name\": \"Café Ñandú 餐厅\""));
        assert!(!content.contains("\\u"));

        let decoded: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(decoded, serde_json::to_value(&records).unwrap());
    }
}
