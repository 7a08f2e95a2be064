//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::UtmkaError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 记录/存储错误
/// - 4000-4099: 导入导出错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 记录/存储错误 3000-3099
    DatabaseConfigError = 3000,
    DatabaseConnectionError = 3001,
    DatabaseOperationError = 3002,

    // 导入导出错误 4000-4099
    SerializationError = 4000,
    FileOperationError = 4001,
}

impl From<&UtmkaError> for ErrorCode {
    fn from(err: &UtmkaError) -> Self {
        match err {
            UtmkaError::Validation(_) => ErrorCode::BadRequest,
            UtmkaError::NotFound(_) => ErrorCode::NotFound,
            UtmkaError::DatabaseConfig(_) => ErrorCode::DatabaseConfigError,
            UtmkaError::DatabaseConnection(_) => ErrorCode::DatabaseConnectionError,
            UtmkaError::DatabaseOperation(_) => ErrorCode::DatabaseOperationError,
            UtmkaError::Serialization(_) => ErrorCode::SerializationError,
            UtmkaError::FileOperation(_) => ErrorCode::FileOperationError,
        }
    }
}
