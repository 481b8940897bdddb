//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조를 정의합니다.
//! 엔티티(`User`)는 이 계층을 거쳐서만 외부로 노출되며,
//! 비밀번호 해시 같은 민감한 필드는 어떤 응답 DTO에도 존재하지 않습니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── api_response.rs     # 공통 응답 envelope
//! ├── users/              # 회원가입/로그인 요청, 사용자 공개 정보 응답
//! ├── tokens/             # 토큰 발급/로그아웃 응답
//! └── csrf/               # CSRF 토큰/상태 응답
//! ```
//!
//! 모든 응답 필드는 camelCase로 직렬화됩니다.

pub mod api_response;
pub mod csrf;
pub mod tokens;
pub mod users;

pub use api_response::*;
