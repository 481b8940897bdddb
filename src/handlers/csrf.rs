//! CSRF 토큰 발급/상태 핸들러
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::api_response::ApiResponse;
use crate::domain::dto::csrf::CsrfTokenResponse;
use crate::services::security::{CsrfGuard, CSRF_SESSION_COOKIE};

/// CSRF 토큰 발급
///
/// `csrf-sid` 쿠키가 없을 때만 새 세션 쿠키를 설정합니다.
///
/// # Endpoint
/// `GET /csrf/token`
#[get("/token")]
pub async fn issue_token(
    req: HttpRequest,
    guard: web::Data<CsrfGuard>,
) -> Result<HttpResponse, AppError> {
    let existing = req.cookie(CSRF_SESSION_COOKIE);
    let issue = guard.issue(existing.as_ref().map(|c| c.value()))?;

    let mut builder = HttpResponse::Ok();
    if let Some(cookie) = issue.session_cookie {
        builder.cookie(cookie);
    }
    if let Some(cookie) = issue.token_cookie {
        builder.cookie(cookie);
    }

    Ok(builder.json(ApiResponse::success(CsrfTokenResponse {
        csrf_token: issue.token,
    })))
}

/// CSRF 가드 상태
///
/// # Endpoint
/// `GET /csrf/status`
#[get("/status")]
pub async fn status(guard: web::Data<CsrfGuard>) -> HttpResponse {
    HttpResponse::Ok().json(guard.status())
}
