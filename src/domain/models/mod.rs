//! # Domain Models
//!
//! 저장되지 않고 요청마다 파생되는 모델들입니다.
//!
//! - [`token`] - 액세스/리프레시 토큰 클레임과 발급 결과
//! - [`client`] - 호출 클라이언트의 채널 타입 (WEB / MOBILE)
//! - [`auth`] - 인증 미들웨어가 요청 extension에 저장하는 인증 컨텍스트

pub mod auth;
pub mod client;
pub mod token;

pub use auth::*;
pub use client::*;
pub use token::*;
