//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::ShortlifeError;

/// 统一 JSON 响应包装
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// API 错误码
///
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    InternalServerError = 1005,
    LinkNotFound = 3000,
    LinkForbidden = 3001,
    LinkCodeExhausted = 3003,
}

impl From<&ShortlifeError> for ErrorCode {
    fn from(err: &ShortlifeError) -> Self {
        match err {
            ShortlifeError::CodeExhausted(_) => ErrorCode::LinkCodeExhausted,
            ShortlifeError::OwnershipViolation(_) => ErrorCode::LinkForbidden,
            ShortlifeError::Validation(_) => ErrorCode::BadRequest,
            ShortlifeError::NotFound(_) => ErrorCode::LinkNotFound,
            ShortlifeError::Config(_) | ShortlifeError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        code: code as i32,
        message: message.into(),
        data,
    })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 从 ShortlifeError 构建错误响应
pub fn error_response(err: &ShortlifeError) -> HttpResponse {
    json_response::<()>(err.http_status(), ErrorCode::from(err), err.message(), None)
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}
