use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortlifeError {
    CodeExhausted(String),
    OwnershipViolation(String),
    Validation(String),
    NotFound(String),
    Config(String),
    Serialization(String),
}

impl ShortlifeError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortlifeError::CodeExhausted(_) => "E001",
            ShortlifeError::OwnershipViolation(_) => "E002",
            ShortlifeError::Validation(_) => "E003",
            ShortlifeError::NotFound(_) => "E004",
            ShortlifeError::Config(_) => "E005",
            ShortlifeError::Serialization(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlifeError::CodeExhausted(_) => "Code Generation Exhausted",
            ShortlifeError::OwnershipViolation(_) => "Ownership Violation",
            ShortlifeError::Validation(_) => "Validation Error",
            ShortlifeError::NotFound(_) => "Resource Not Found",
            ShortlifeError::Config(_) => "Configuration Error",
            ShortlifeError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortlifeError::CodeExhausted(msg)
            | ShortlifeError::OwnershipViolation(msg)
            | ShortlifeError::Validation(msg)
            | ShortlifeError::NotFound(msg)
            | ShortlifeError::Config(msg)
            | ShortlifeError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ShortlifeError::CodeExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            ShortlifeError::OwnershipViolation(_) => StatusCode::FORBIDDEN,
            ShortlifeError::Validation(_) => StatusCode::BAD_REQUEST,
            ShortlifeError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortlifeError::Config(_) | ShortlifeError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortlifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortlifeError {}

// 便捷的构造函数
impl ShortlifeError {
    pub fn code_exhausted<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::CodeExhausted(msg.into())
    }

    pub fn ownership_violation<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::OwnershipViolation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::NotFound(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::Config(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortlifeError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for ShortlifeError {
    fn from(err: std::io::Error) -> Self {
        ShortlifeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShortlifeError {
    fn from(err: serde_json::Error) -> Self {
        ShortlifeError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ShortlifeError {
    fn from(err: toml::ser::Error) -> Self {
        ShortlifeError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ShortlifeError {
    fn from(err: config::ConfigError) -> Self {
        ShortlifeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlifeError>;
