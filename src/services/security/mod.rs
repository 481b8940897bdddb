//! 요청 보안 서비스
//!
//! - [`client_classifier`] - 요청 헤더로 WEB/MOBILE 채널 판별
//! - [`csrf_service`] - 세션 바인딩 double-submit CSRF 가드

pub mod client_classifier;
pub mod csrf_service;

pub use client_classifier::*;
pub use csrf_service::*;
