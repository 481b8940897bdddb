//! # Core Module
//!
//! 서비스 전역에서 공유되는 핵심 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현, `{status, data}` 응답 봉투
//! - **정규화**: 자격 증명/토큰 실패는 `AuthenticationError` 하나로 수렴
//!
//! ### [`state`] - 부팅 시 조립되는 애플리케이션 상태
//! - 설정, 토큰 서비스, CSRF 가드, 사용자 저장소를 한 번 생성하여 `Arc`로 공유
//! - 부팅 이후에는 읽기 전용

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
