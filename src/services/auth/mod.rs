//! 인증 서비스
//!
//! - [`token_service`] - 액세스/리프레시 토큰 발급과 검증
//! - [`token_transport`] - 채널별 토큰 전달 (본문 / HttpOnly 쿠키)
//! - [`auth_service`] - 회원가입, 로그인, 갱신, 로그아웃, 프로필 조회

pub mod auth_service;
pub mod token_service;
pub mod token_transport;

pub use auth_service::*;
pub use token_service::*;
pub use token_transport::*;
