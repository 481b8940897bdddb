//! Users Entity Module
//!
//! 인증 주체(Principal)인 `User` 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_local("user@example.com".to_string(), hashed_password);
//! assert!(user.is_active);
//! ```

pub mod user;

pub use user::*;
