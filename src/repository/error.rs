// ==========================================
// 创意制作看板 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity}不存在: id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    /// 主键重复 (例如重复插入同一卡片ID)
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(#[source] rusqlite::Error),

    /// checklist_json / attachments_json 列编解码失败
    #[error("JSON 列 {column} 编解码失败: {source}")]
    JsonColumn {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, Some(msg))
                if code.code == ErrorCode::ConstraintViolation && msg.contains("UNIQUE") =>
            {
                RepositoryError::UniqueConstraintViolation(msg.clone())
            }
            _ => RepositoryError::DatabaseQueryError(err),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_failure_is_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id TEXT PRIMARY KEY); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

        let err: RepositoryError = conn.execute("SELECT * FROM missing", []).unwrap_err().into();
        assert!(matches!(err, RepositoryError::DatabaseQueryError(_)));
    }
}
