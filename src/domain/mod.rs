//! # Domain Layer Module
//!
//! 인증 계층의 도메인 타입을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 사용자(Principal) 엔티티, 외부 사용자 저장소가 소유
//! ├── DTOs      - API 요청/응답 계약과 `{status, data}` 응답 봉투
//! └── Models    - 토큰 클레임, 채널 타입, 인증된 사용자 컨텍스트
//! ```
//!
//! 토큰과 채널 타입은 요청마다 파생되며 저장되지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::*;
