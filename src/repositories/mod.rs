//! # Repository Layer
//!
//! 외부 사용자 저장소 접근 계층입니다. 인증 계층은 [`PrincipalStore`]
//! trait만 의존하며, 구현은 `USER_STORE` 설정으로 선택됩니다.
//!
//! - [`MongoUserRepository`] - MongoDB `users` 컬렉션 (email unique 인덱스)
//! - [`InMemoryUserRepository`] - 프로세스 메모리 (테스트, 로컬 실행)

pub mod users;

pub use users::*;
