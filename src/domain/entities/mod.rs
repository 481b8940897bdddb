//! 도메인 엔티티 모듈
//!
//! 이 계층에서 읽고 쓰는 유일한 영속 엔티티는 사용자(Principal)입니다.

pub mod users;

pub use users::*;
