//! Loading classes for the in-memory data-access collaborator.
//!
//! The seed file is a JSON array:
//!
//! ```json
//! [{"id": "c1", "className": "Math", "teacherId": "t1", "studentIds": ["s1", "s2"]}]
//! ```

use std::path::Path;

use thiserror::Error;

use crate::domain::Class;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub async fn load_classes(path: &Path) -> Result<Vec<Class>, SeedError> {
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;
    parse_classes(&raw).map_err(|source| SeedError::Json {
        path: display,
        source,
    })
}

pub fn parse_classes(raw: &str) -> Result<Vec<Class>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classes() {
        // テスト項目: シード JSON からクラス一覧を読み込める
        // given (前提条件):
        let raw = r#"[
            {"id": "c1", "className": "Math", "teacherId": "t1", "studentIds": ["a", "b", "d"]},
            {"id": "c2", "className": "Art", "teacherId": "t2"}
        ]"#;

        // when (操作):
        let classes = parse_classes(raw).unwrap();

        // then (期待する結果):
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].student_ids.len(), 3);
        assert!(classes[1].student_ids.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_ids() {
        // テスト項目: 空の ID を含むシードはエラー
        // when (操作):
        let result = parse_classes(r#"[{"id": "", "className": "x", "teacherId": "t1"}]"#);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        // テスト項目: 存在しないファイルは Io エラー
        // when (操作):
        let result = load_classes(Path::new("/nonexistent/rollcall-seed.json")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
