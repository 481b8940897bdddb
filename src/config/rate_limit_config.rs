//! 라우트별 호출 예산 설정
//!
//! | 라우트 | 환경 변수 (ttl ms / limit) | 기본값 |
//! |--------|----------------------------|--------|
//! | register | `AUTH_REGISTER_TTL` / `AUTH_REGISTER_LIMIT` | 60000 / 5 |
//! | login | `AUTH_LOGIN_TTL` / `AUTH_LOGIN_LIMIT` | 60000 / 10 |
//! | refresh | `AUTH_REFRESH_TTL` / `AUTH_REFRESH_LIMIT` | 60000 / 20 |
//! | logout | `AUTH_LOGOUT_TTL` / `AUTH_LOGOUT_LIMIT` | 60000 / 20 |
//! | profile | `AUTH_PROFILE_TTL` / `AUTH_PROFILE_LIMIT` | 60000 / 100 |

use std::num::NonZeroU32;
use std::time::Duration;

use log::warn;

use super::{read_non_empty, Lookup};

/// 호출 예산이 적용되는 라우트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitedRoute {
    Register,
    Login,
    Refresh,
    Logout,
    Profile,
}

impl RateLimitedRoute {
    pub const ALL: [RateLimitedRoute; 5] = [
        RateLimitedRoute::Register,
        RateLimitedRoute::Login,
        RateLimitedRoute::Refresh,
        RateLimitedRoute::Logout,
        RateLimitedRoute::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitedRoute::Register => "register",
            RateLimitedRoute::Login => "login",
            RateLimitedRoute::Refresh => "refresh",
            RateLimitedRoute::Logout => "logout",
            RateLimitedRoute::Profile => "profile",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            RateLimitedRoute::Register => "AUTH_REGISTER",
            RateLimitedRoute::Login => "AUTH_LOGIN",
            RateLimitedRoute::Refresh => "AUTH_REFRESH",
            RateLimitedRoute::Logout => "AUTH_LOGOUT",
            RateLimitedRoute::Profile => "AUTH_PROFILE",
        }
    }

    fn default_budget(&self) -> RouteBudget {
        let limit = match self {
            RateLimitedRoute::Register => 5,
            RateLimitedRoute::Login => 10,
            RateLimitedRoute::Refresh => 20,
            RateLimitedRoute::Logout => 20,
            RateLimitedRoute::Profile => 100,
        };

        RouteBudget {
            window: Duration::from_millis(60_000),
            limit: NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// 윈도우당 허용 호출 수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteBudget {
    pub window: Duration,
    pub limit: NonZeroU32,
}

/// 전체 라우트 예산
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub register: RouteBudget,
    pub login: RouteBudget,
    pub refresh: RouteBudget,
    pub logout: RouteBudget,
    pub profile: RouteBudget,
}

impl RateLimitConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            register: budget_from(lookup, RateLimitedRoute::Register),
            login: budget_from(lookup, RateLimitedRoute::Login),
            refresh: budget_from(lookup, RateLimitedRoute::Refresh),
            logout: budget_from(lookup, RateLimitedRoute::Logout),
            profile: budget_from(lookup, RateLimitedRoute::Profile),
        }
    }

    pub fn budget(&self, route: RateLimitedRoute) -> RouteBudget {
        match route {
            RateLimitedRoute::Register => self.register,
            RateLimitedRoute::Login => self.login,
            RateLimitedRoute::Refresh => self.refresh,
            RateLimitedRoute::Logout => self.logout,
            RateLimitedRoute::Profile => self.profile,
        }
    }
}

fn budget_from(lookup: Lookup<'_>, route: RateLimitedRoute) -> RouteBudget {
    let default = route.default_budget();
    let ttl_key = format!("{}_TTL", route.env_prefix());
    let limit_key = format!("{}_LIMIT", route.env_prefix());

    let window = read_non_empty(lookup, &ttl_key)
        .and_then(|raw| match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
            _ => {
                warn!("⚠️ {} '{}'는 유효하지 않습니다, 기본값 사용", ttl_key, raw);
                None
            }
        })
        .unwrap_or(default.window);

    let limit = read_non_empty(lookup, &limit_key)
        .and_then(|raw| match raw.parse::<u32>().ok().and_then(NonZeroU32::new) {
            Some(limit) => Some(limit),
            None => {
                warn!("⚠️ {} '{}'는 유효하지 않습니다, 기본값 사용", limit_key, raw);
                None
            }
        })
        .unwrap_or(default.limit);

    RouteBudget { window, limit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;

    #[test]
    fn test_default_budgets() {
        let lookup = map_lookup(&[]);
        let config = RateLimitConfig::from_lookup(&lookup);

        let expected = [
            (RateLimitedRoute::Register, 5),
            (RateLimitedRoute::Login, 10),
            (RateLimitedRoute::Refresh, 20),
            (RateLimitedRoute::Logout, 20),
            (RateLimitedRoute::Profile, 100),
        ];
        for (route, limit) in expected {
            let budget = config.budget(route);
            assert_eq!(budget.limit.get(), limit, "route {}", route.as_str());
            assert_eq!(budget.window, Duration::from_secs(60));
        }
    }

    #[test]
    fn test_budget_overrides_and_invalid_values() {
        let lookup = map_lookup(&[
            ("AUTH_LOGIN_TTL", "1000"),
            ("AUTH_LOGIN_LIMIT", "3"),
            ("AUTH_PROFILE_LIMIT", "0"),
            ("AUTH_REGISTER_TTL", "soon"),
        ]);
        let config = RateLimitConfig::from_lookup(&lookup);

        assert_eq!(config.login.window, Duration::from_secs(1));
        assert_eq!(config.login.limit.get(), 3);
        assert_eq!(config.profile.limit.get(), 100);
        assert_eq!(config.register.window, Duration::from_secs(60));
    }
}
