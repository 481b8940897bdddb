//! 채널 인증 서비스 백엔드
//!
//! 웹 브라우저와 네이티브 모바일 앱을 함께 지원하는 인증 및 CSRF 방어 계층입니다.
//! 요청마다 호출 채널을 판별하여 토큰 수명과 전달 방식, CSRF 검증 여부를 결정합니다.
//!
//! # Features
//!
//! - **채널 분류**: `X-Client-Type` 헤더와 User-Agent 기반 WEB/MOBILE 판별
//! - **JWT 인증**: 액세스/리프레시 토큰 (HS256, 타입/발급자/대상 클레임), 채널별 TTL
//! - **토큰 전달**: MOBILE은 응답 본문, WEB은 HttpOnly 리프레시 쿠키
//! - **CSRF 방어**: 세션 바인딩 double-submit 토큰, fail-open/fail-closed 부팅
//! - **호출 예산**: 라우트별 클라이언트 단위 호출 한도
//! - **MongoDB**: 사용자 데이터 영구 저장 (테스트/로컬용 인메모리 저장소 제공)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ CSRF → 호출 예산 → 인증        │ ← 미들웨어 파이프라인
//! └──────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰, 전달 정책, CSRF 가드, 인증 오케스트레이터
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← PrincipalStore (MongoDB / 인메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use channel_auth_backend::config::AppConfig;
//! use channel_auth_backend::core::AppState;
//! use channel_auth_backend::repositories::InMemoryUserRepository;
//! use channel_auth_backend::routes::configure_all_routes;
//!
//! let config = AppConfig::from_env()?;
//! let state = AppState::build(config, Arc::new(InMemoryUserRepository::new()))?;
//! let app = App::new().configure(configure_all_routes(state));
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
