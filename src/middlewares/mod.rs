//! 미들웨어 모듈
//!
//! 요청 파이프라인 순서: 쿠키 파싱 → CSRF → 호출 예산 → 인증 → 핸들러
//!
//! - [`csrf_middleware`] - 앱 전역 CSRF 검증 (MOBILE 우회, fail-open 통과)
//! - [`rate_limit`] - 라우트별 호출 예산
//! - [`auth_middleware`] - 액세스/리프레시 토큰 인증
//! - [`error_handlers`] - 운영 환경 5xx 본문 일반화
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(CsrfMiddleware::new(guard, classifier))
//!     .service(
//!         web::resource("/auth/profile")
//!             .wrap(AuthMiddleware::access())
//!             .wrap(limiters.guard(RateLimitedRoute::Profile))
//!             .route(web::get().to(profile)),
//!     )
//! ```
//!
//! 리소스의 `wrap`은 나중에 등록한 것이 바깥쪽이므로 호출 예산이 인증보다 먼저 실행됩니다.

pub mod auth_middleware;
mod auth_inner;
pub mod csrf_middleware;
pub mod error_handlers;
pub mod rate_limit;

pub use auth_middleware::{AuthMiddleware, AuthMode};
pub use csrf_middleware::CsrfMiddleware;
pub use rate_limit::{RateLimit, RouteLimiters};
