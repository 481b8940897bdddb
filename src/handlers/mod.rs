//! # HTTP Request Handlers Module
//!
//! 요청 본문 검증과 응답 조립만 담당하고, 비즈니스 로직은 서비스 계층에 위임합니다.
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하며 에러는
//! `{status: "error", data: {name, message}}` 봉투로 변환됩니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 회원가입, 로그인, 토큰 갱신, 로그아웃, 프로필
//! - **`csrf`**: CSRF 토큰 발급, 가드 상태
//!
//! ## 추출기
//!
//! - [`ChannelType`](crate::domain::models::ChannelType) - 공유 분류기로 판별한 호출 채널
//! - [`AuthenticatedPrincipal`](crate::domain::models::AuthenticatedPrincipal) - 인증 미들웨어가 검증한 사용자
//!
//! ```rust,ignore
//! pub async fn login(
//!     auth_service: web::Data<AuthService>,
//!     channel: ChannelType,
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;
//!     let delivery = auth_service.login(payload.into_inner(), channel).await?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success(delivery.body)))
//! }
//! ```

pub mod auth;
pub mod csrf;
