// ==========================================
// 创意制作看板 - API层错误类型
// ==========================================
// 职责: 将 Repository/Config 错误转换为调用方可区分的类别
// ==========================================

use crate::config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 调用方可修正 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 写入与已有数据冲突 (重复ID)
    #[error("数据冲突: {0}")]
    Conflict(String),

    // ===== 系统侧 =====
    #[error("存储错误: {0}")]
    Storage(#[source] RepositoryError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            other => ApiError::Storage(other),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Card",
            id: "C9".to_string(),
        }
        .into();

        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Card(id=C9)"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err: ApiError = RepositoryError::UniqueConstraintViolation("cards.id".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::InvalidValue {
            key: "sweep.hour".to_string(),
            message: "24".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains("sweep.hour"));
    }
}
