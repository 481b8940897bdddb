//! 인증 HTTP 핸들러
//!
//! | 엔드포인트 | 인증 | CSRF (WEB) |
//! |------------|------|------------|
//! | `POST /auth/register` | 없음 | O |
//! | `POST /auth/login` | 없음 | O |
//! | `POST /auth/refresh` | 리프레시 토큰 (WEB 쿠키 / MOBILE Bearer) | O |
//! | `POST /auth/logout` | 액세스 토큰 | O |
//! | `GET /auth/profile` | 액세스 토큰 | X |
//!
//! 모든 라우트에 호출 예산이 적용됩니다. 인증과 호출 예산은 라우트 설정에서 미들웨어로 붙습니다.
use actix_web::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::api_response::ApiResponse;
use crate::domain::dto::users::{LoginRequest, RegisterRequest};
use crate::domain::models::{AuthenticatedPrincipal, ChannelType};
use crate::services::auth::{AuthService, Delivery};

/// 회원가입
///
/// 입력 검증은 중복 이메일 확인과 함께 서비스에서 수행됩니다.
///
/// # Endpoint
/// `POST /auth/register`
///
/// ```bash
/// curl -X POST http://localhost:8080/auth/register \
///   -H "Content-Type: application/json" \
///   -H "X-Client-Type: mobile" \
///   -d '{"email":"user@example.com","password":"password123"}'
/// ```
pub async fn register(
    auth_service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

/// 로그인
///
/// WEB은 리프레시 토큰을 HttpOnly 쿠키로, MOBILE은 응답 본문으로 받습니다.
///
/// # Endpoint
/// `POST /auth/login`
pub async fn login(
    auth_service: web::Data<AuthService>,
    channel: ChannelType,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let delivery = auth_service.login(payload.into_inner(), channel).await?;

    Ok(delivered(delivery))
}

/// 토큰 갱신 (새 토큰 쌍 발급)
///
/// # Endpoint
/// `POST /auth/refresh`
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    channel: ChannelType,
    principal: AuthenticatedPrincipal,
) -> Result<HttpResponse, AppError> {
    let delivery = auth_service.refresh(principal.user(), channel)?;

    Ok(delivered(delivery))
}

/// 로그아웃
///
/// # Endpoint
/// `POST /auth/logout`
pub async fn logout(
    auth_service: web::Data<AuthService>,
    channel: ChannelType,
    principal: AuthenticatedPrincipal,
) -> Result<HttpResponse, AppError> {
    let (body, clear_cookie) = auth_service.logout(principal.user(), channel);

    Ok(HttpResponse::Ok()
        .cookie(clear_cookie)
        .json(ApiResponse::success(body)))
}

/// 현재 사용자 프로필
///
/// # Endpoint
/// `GET /auth/profile`
pub async fn profile(
    auth_service: web::Data<AuthService>,
    principal: AuthenticatedPrincipal,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.profile(principal.user());

    Ok(HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, "no-store, no-cache, must-revalidate, private"))
        .insert_header((PRAGMA, "no-cache"))
        .insert_header((EXPIRES, "0"))
        .json(ApiResponse::success(response)))
}

fn delivered(delivery: Delivery) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if let Some(cookie) = delivery.refresh_cookie {
        builder.cookie(cookie);
    }
    builder.json(ApiResponse::success(delivery.body))
}
