//! 환경별 쿠키 속성 정책
//!
//! | 속성 | production | 그 외 |
//! |------|------------|-------|
//! | Secure | O | X |
//! | SameSite | Strict | Lax |
//! | HttpOnly | O | O |
//! | Path | `/` | `/` |
//!
//! `__Host-` 접두사 쿠키는 Domain 속성을 가지지 않습니다.

use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};

use crate::config::Environment;

#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    production: bool,
}

impl CookiePolicy {
    pub fn new(environment: Environment) -> Self {
        Self {
            production: environment.is_production(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    pub fn same_site(&self) -> SameSite {
        if self.production {
            SameSite::Strict
        } else {
            SameSite::Lax
        }
    }

    /// HttpOnly 쿠키 생성
    pub fn build(&self, name: &str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name.to_string(), value)
            .http_only(true)
            .secure(self.production)
            .same_site(self.same_site())
            .path("/")
            .max_age(max_age)
            .finish()
    }

    /// 같은 이름/속성의 만료 쿠키
    pub fn removal(&self, name: &str) -> Cookie<'static> {
        Cookie::build(name.to_string(), "")
            .http_only(true)
            .secure(self.production)
            .same_site(self.same_site())
            .path("/")
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_cookie_attributes() {
        let cookie = CookiePolicy::new(Environment::Production).build("__Host-x", "v".to_string(), Duration::seconds(60));

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
        assert!(cookie.domain().is_none());
    }

    #[test]
    fn test_development_cookie_attributes() {
        let cookie = CookiePolicy::new(Environment::Development).build("x", "v".to_string(), Duration::seconds(1));

        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_removal_cookie_is_expired() {
        let cookie = CookiePolicy::new(Environment::Development).removal("refresh-token");

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }
}
