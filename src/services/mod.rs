//! # Service Layer
//!
//! - [`auth`] - 토큰 서비스, 전달 정책, 인증 오케스트레이터
//! - [`security`] - 채널 분류기, CSRF 가드

pub mod auth;
pub mod security;
