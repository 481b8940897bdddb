//! 공통 응답 envelope
//!
//! 성공: `{"status": "success", "data": ...}`
//! 실패: `{"status": "error", "data": {"name": ..., "message": ...}}`
use serde::{Deserialize, Serialize};

/// 성공 응답 래퍼
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// 에러 상세
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    /// 에러 분류 이름 (예: `AuthenticationError`)
    pub name: String,
    pub message: String,
}

/// 실패 응답 래퍼
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub data: ErrorData,
}

impl ErrorEnvelope {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: ErrorData {
                name: name.into(),
                message: message.into(),
            },
        }
    }
}
