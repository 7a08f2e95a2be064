use std::fmt;

#[derive(Debug, Clone)]
pub enum UtmkaError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl UtmkaError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UtmkaError::DatabaseConfig(_) => "E001",
            UtmkaError::DatabaseConnection(_) => "E002",
            UtmkaError::DatabaseOperation(_) => "E003",
            UtmkaError::FileOperation(_) => "E004",
            UtmkaError::Validation(_) => "E005",
            UtmkaError::NotFound(_) => "E006",
            UtmkaError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UtmkaError::DatabaseConfig(_) => "Database Configuration Error",
            UtmkaError::DatabaseConnection(_) => "Database Connection Error",
            UtmkaError::DatabaseOperation(_) => "Database Operation Error",
            UtmkaError::FileOperation(_) => "File Operation Error",
            UtmkaError::Validation(_) => "Validation Error",
            UtmkaError::NotFound(_) => "Resource Not Found",
            UtmkaError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UtmkaError::DatabaseConfig(msg) => msg,
            UtmkaError::DatabaseConnection(msg) => msg,
            UtmkaError::DatabaseOperation(msg) => msg,
            UtmkaError::FileOperation(msg) => msg,
            UtmkaError::Validation(msg) => msg,
            UtmkaError::NotFound(msg) => msg,
            UtmkaError::Serialization(msg) => msg,
        }
    }

    /// HTTP 状态码映射（API 层统一使用）
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            UtmkaError::Validation(_) => StatusCode::BAD_REQUEST,
            UtmkaError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UtmkaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UtmkaError {}

// 便捷的构造函数
impl UtmkaError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        UtmkaError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        UtmkaError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        UtmkaError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        UtmkaError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        UtmkaError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UtmkaError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UtmkaError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for UtmkaError {
    fn from(err: sea_orm::DbErr) -> Self {
        UtmkaError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for UtmkaError {
    fn from(err: std::io::Error) -> Self {
        UtmkaError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UtmkaError {
    fn from(err: serde_json::Error) -> Self {
        UtmkaError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for UtmkaError {
    fn from(err: csv::Error) -> Self {
        UtmkaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UtmkaError>;
