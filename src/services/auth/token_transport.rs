//! 채널별 토큰 전달 정책
//!
//! - 액세스 토큰: 두 채널 모두 응답 본문
//! - 리프레시 토큰: MOBILE은 응답 본문, WEB은 HttpOnly 쿠키
//! - 로그아웃: 채널과 무관하게 WEB 리프레시 쿠키를 만료시킴

use actix_web::cookie::time::Duration;
use actix_web::cookie::Cookie;

use crate::config::Environment;
use crate::domain::dto::tokens::AuthResponse;
use crate::domain::dto::users::AuthUser;
use crate::domain::entities::users::User;
use crate::domain::models::{ChannelType, TokenPair};
use crate::utils::cookies::CookiePolicy;

pub const REFRESH_COOKIE_NAME: &str = "refresh-token";
pub const HOST_REFRESH_COOKIE_NAME: &str = "__Host-refresh-token";

/// 응답 본문과 선택적 리프레시 쿠키
#[derive(Debug)]
pub struct Delivery {
    pub body: AuthResponse,
    pub refresh_cookie: Option<Cookie<'static>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TokenTransport {
    cookies: CookiePolicy,
}

impl TokenTransport {
    pub fn new(environment: Environment) -> Self {
        Self {
            cookies: CookiePolicy::new(environment),
        }
    }

    /// production에서는 host-locked 이름을 사용합니다.
    pub fn refresh_cookie_name(&self) -> &'static str {
        if self.cookies.is_production() {
            HOST_REFRESH_COOKIE_NAME
        } else {
            REFRESH_COOKIE_NAME
        }
    }

    pub fn deliver(&self, channel: ChannelType, pair: TokenPair, user: &User) -> Delivery {
        let (refresh_token, refresh_cookie) = match channel {
            ChannelType::Mobile => (Some(pair.refresh_token), None),
            ChannelType::Web => {
                let cookie = self.cookies.build(
                    self.refresh_cookie_name(),
                    pair.refresh_token,
                    Duration::seconds(pair.refresh_expires_in),
                );
                (None, Some(cookie))
            }
        };

        Delivery {
            body: AuthResponse {
                access_token: pair.access_token,
                refresh_token,
                expires_in: pair.expires_in,
                user: AuthUser::from(user),
            },
            refresh_cookie,
        }
    }

    pub fn clear_refresh_cookie(&self) -> Cookie<'static> {
        self.cookies.removal(self.refresh_cookie_name())
    }
}
