//! # Application Error Handling System
//!
//! 인증/CSRF 계층 전체에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 에러를 정의하고 `actix_web::ResponseError`를 구현하여
//! 모든 에러가 동일한 응답 봉투(envelope)로 변환되도록 합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "status": "error", "data": { "name": "AuthenticationError", "message": "Invalid credentials" } }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `ConflictError` | 409 Conflict | 중복 이메일 회원가입 |
//! | `AuthenticationError` | 401 Unauthorized | 잘못된 자격 증명, 토큰 오류 |
//! | `AuthorizationError` | 403 Forbidden | CSRF 토큰 불일치 |
//! | `RateLimitExceeded` | 429 Too Many Requests | 라우트별 호출 한도 초과 |
//! | `ConfigurationError` | 500 Internal Server Error | 부팅 시 설정 오류 |
//! | `DatabaseError` | 500 Internal Server Error | 사용자 저장소 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 자격 증명/토큰 실패는 모두 `AuthenticationError`로 정규화됩니다.
//! 운영 환경의 5xx 메시지는 [`crate::middlewares::error_handlers`]에서 일반화됩니다.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::dto::api_response::ErrorEnvelope;

/// 운영 환경에서 5xx 응답에 노출되는 일반화된 메시지
pub const GENERIC_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// 애플리케이션 전역 에러 타입
///
/// 핸들러와 미들웨어는 `Result<_, AppError>`를 반환하며,
/// actix-web이 [`ResponseError`](actix_web::ResponseError) 구현을 통해 HTTP 응답으로 변환합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 사용자 저장소(MongoDB 등) 연산 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 실패
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 중복 데이터 생성 시도 (이미 사용 중인 이메일 등)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패
    ///
    /// 잘못된 자격 증명, 만료/위조/타입 불일치 토큰, 비활성 사용자 모두 이 변형으로 수렴합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (CSRF 토큰 불일치 포함)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 라우트별 호출 한도 초과
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// 부팅 시 설정 오류
    ///
    /// 요청 처리 중에는 발생하지 않으며, 서버 기동을 중단시키는 용도로만 사용됩니다.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 봉투의 `data.name` 값
    ///
    /// 저장소 에러는 내부 구현을 드러내지 않도록 `InternalError`로 표기합니다.
    pub fn name(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "ValidationError",
            AppError::ConflictError(_) => "ConflictError",
            AppError::AuthenticationError(_) => "AuthenticationError",
            AppError::AuthorizationError(_) => "AuthorizationError",
            AppError::RateLimitExceeded(_) => "RateLimitExceeded",
            AppError::ConfigurationError(_) => "ConfigurationError",
            AppError::DatabaseError(_) | AppError::InternalError(_) => "InternalError",
        }
    }

    /// 클라이언트에게 전달되는 메시지 (접두사 없는 원문)
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::ValidationError(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::RateLimitExceeded(msg)
            | AppError::ConfigurationError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }

    /// 자격 증명 실패를 나타내는 공통 에러
    ///
    /// 존재하지 않는 이메일과 잘못된 비밀번호를 구분하지 않습니다.
    pub fn invalid_credentials() -> Self {
        AppError::AuthenticationError("Invalid credentials".to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러는 서버 측에 전체 내용이 기록됩니다 (4xx: warn, 5xx: error).
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {} - {}", status.as_u16(), self);
        } else {
            log::warn!("{} - {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(ErrorEnvelope::new(self.name(), self.message()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 `InternalError`로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token type".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Invalid CSRF token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_rate_limit_error_response() {
        let error = AppError::RateLimitExceeded("Too many requests".to_string());
        assert_eq!(error.error_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_database_error_is_named_internal() {
        let error = AppError::DatabaseError("connection reset".to_string());

        assert_eq!(error.name(), "InternalError");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_error_envelope_body() {
        let response = AppError::ConflictError("Email already exists".to_string()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["data"]["name"], "ConflictError");
        assert_eq!(json["data"]["message"], "Email already exists");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
