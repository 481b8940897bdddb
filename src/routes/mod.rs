//! API 라우트 설정 모듈
//!
//! 부팅 시 조립된 [`AppState`]를 앱 데이터로 등록하고 라우트와 미들웨어를 묶습니다.
//!
//! # Routes
//!
//! | 메서드 | 경로 | 미들웨어 (바깥 → 안) |
//! |--------|------|----------------------|
//! | POST | `/auth/register` | CSRF → 호출 예산 |
//! | POST | `/auth/login` | CSRF → 호출 예산 |
//! | POST | `/auth/refresh` | CSRF → 호출 예산 → 리프레시 인증 |
//! | POST | `/auth/logout` | CSRF → 호출 예산 → 액세스 인증 |
//! | GET | `/auth/profile` | CSRF(통과) → 호출 예산 → 액세스 인증 |
//! | GET | `/csrf/token`, `/csrf/status` | CSRF(통과) |
//! | GET | `/health` | CSRF(통과) |
//!
//! # Examples
//!
//! ```rust,ignore
//! let state = AppState::build(config, store)?;
//! HttpServer::new(move || App::new().configure(configure_all_routes(state.clone())))
//! ```

use actix_web::web;
use serde_json::json;

use crate::config::RateLimitedRoute;
use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::handlers;
use crate::middlewares::{AuthMiddleware, CsrfMiddleware, RouteLimiters};


/// 앱 데이터와 모든 라우트를 등록합니다.
pub fn configure_all_routes(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(state.auth.clone()))
            .app_data(web::Data::from(state.tokens.clone()))
            .app_data(web::Data::from(state.classifier.clone()))
            .app_data(web::Data::from(state.csrf.clone()))
            .app_data(web::Data::new(state.transport))
            .app_data(json_config());

        cfg.service(
            web::scope("")
                .wrap(CsrfMiddleware::new(state.csrf.clone(), state.classifier.clone()))
                .service(health_check)
                .service(
                    web::scope("/csrf")
                        .service(handlers::csrf::issue_token)
                        .service(handlers::csrf::status),
                )
                .service(auth_scope(&state.limiters)),
        );
    }
}

/// 인증 라우트
///
/// 리소스의 `wrap`은 나중에 등록한 것이 바깥쪽이므로 호출 예산이 인증보다 먼저 실행됩니다.
fn auth_scope(limiters: &RouteLimiters) -> actix_web::Scope {
    web::scope("/auth")
        .service(
            web::resource("/register")
                .wrap(limiters.guard(RateLimitedRoute::Register))
                .route(web::post().to(handlers::auth::register)),
        )
        .service(
            web::resource("/login")
                .wrap(limiters.guard(RateLimitedRoute::Login))
                .route(web::post().to(handlers::auth::login)),
        )
        .service(
            web::resource("/refresh")
                .wrap(AuthMiddleware::refresh())
                .wrap(limiters.guard(RateLimitedRoute::Refresh))
                .route(web::post().to(handlers::auth::refresh)),
        )
        .service(
            web::resource("/logout")
                .wrap(AuthMiddleware::access())
                .wrap(limiters.guard(RateLimitedRoute::Logout))
                .route(web::post().to(handlers::auth::logout)),
        )
        .service(
            web::resource("/profile")
                .wrap(AuthMiddleware::access())
                .wrap(limiters.guard(RateLimitedRoute::Profile))
                .route(web::get().to(handlers::auth::profile)),
        )
}

/// JSON 본문 파싱 실패는 `ValidationError`(400)로 응답합니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check(csrf: web::Data<crate::services::security::CsrfGuard>) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "channel_auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "csrf": if csrf.is_enabled() { "enabled" } else { "disabled" }
    }))
}
