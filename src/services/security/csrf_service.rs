//! 세션 바인딩 double-submit CSRF 가드
//!
//! ## 산출물
//!
//! - 세션 식별 쿠키 `csrf-sid` (UUID v4, HttpOnly, 24시간). 토큰 발급 요청 시 없으면 생성
//! - CSRF 토큰 `<hmac>|<random>`
//!   - `hmac = HMAC-SHA256(secret, "<len(sid)>!<sid>!<len(random)>!<random>")` (hex)
//!   - 응답 본문과 CSRF 토큰 쿠키로 동시에 전달
//!
//! ## 검증
//!
//! 요청이 제출한 토큰(헤더 또는 JSON `_token`)이 CSRF 토큰 쿠키와 같고,
//! 현재 세션 식별자에 대해 HMAC이 맞아야 합니다.
//! `csrf-sid` 쿠키가 없으면 `sha256("<ip>-<ua>")` 앞 32자를 세션 식별자로 사용합니다.
//! 이 값은 프록시 환경에서 불안정합니다.
//!
//! ## 초기화
//!
//! 설정 검증에 실패하면 `CSRF_STRICT=true`일 때 부팅을 중단하고,
//! 기본값(fail-open)에서는 [`GuardInitResult::Disabled`]로 전환되어
//! 모든 요청을 통과시키며 `X-CSRF-Disabled-Reason` 헤더를 붙입니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::Cookie;
use actix_web::http::Method;
use hmac::{Hmac, Mac};
use log::{error, info, warn};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{CsrfConfig, Secret};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::csrf::CsrfStatusResponse;
use crate::utils::cookies::CookiePolicy;

type HmacSha256 = Hmac<Sha256>;

pub const CSRF_SESSION_COOKIE: &str = "csrf-sid";
pub const CSRF_TOKEN_COOKIE: &str = "csrf-token";
pub const HOST_CSRF_TOKEN_COOKIE: &str = "__Host-csrf-token";
pub const CSRF_DISABLED_TOKEN: &str = "csrf-disabled";
pub const CSRF_TOKEN_HEADERS: [&str; 3] = ["x-csrf-token", "csrf-token", "x-xsrf-token"];
pub const CSRF_BODY_FIELD: &str = "_token";
pub const CSRF_SKIPPED_HEADER: &str = "x-csrf-skipped";
pub const CSRF_DISABLED_HEADER: &str = "x-csrf-disabled-reason";

const DEV_CSRF_SECRET: &str = "dev-fallback-key-configure-in-production";
const DEFAULT_SIZE: usize = 128;
const DEFAULT_COOKIE_MAX_AGE_MS: u64 = 25 * 60 * 1000;
const SESSION_COOKIE_MAX_AGE_HOURS: i64 = 24;
const INVALID_CSRF_TOKEN: &str = "Invalid CSRF token";

/// 검증을 건너뛰는 안전한 메서드
pub fn is_ignored_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// `csrf-sid` 쿠키, 없으면 IP + User-Agent 해시
pub fn session_identifier(session_cookie: Option<&str>, client_ip: &str, user_agent: &str) -> String {
    match session_cookie.filter(|sid| !sid.is_empty()) {
        Some(sid) => sid.to_string(),
        None => {
            let digest = Sha256::digest(format!("{}-{}", client_ip, user_agent).as_bytes());
            let mut encoded = hex::encode(digest);
            encoded.truncate(32);
            encoded
        }
    }
}

/// CSRF 검증에 필요한 요청 값
#[derive(Debug, Clone, Default)]
pub struct CsrfRequestInput<'a> {
    pub session_cookie: Option<&'a str>,
    pub token_cookie: Option<&'a str>,
    pub supplied_token: Option<&'a str>,
    pub client_ip: &'a str,
    pub user_agent: &'a str,
}

/// 토큰 발급 결과
#[derive(Debug)]
pub struct CsrfIssue {
    pub token: String,
    /// 기존 세션이 없을 때만 생성
    pub session_cookie: Option<Cookie<'static>>,
    /// 가드가 비활성화되면 없음
    pub token_cookie: Option<Cookie<'static>>,
}

/// 활성 상태의 CSRF 보호기
#[derive(Debug, Clone)]
pub struct CsrfProtector {
    secret: Secret,
    size: usize,
    cookie_name: &'static str,
    cookie_max_age: Duration,
    cookies: CookiePolicy,
}

impl CsrfProtector {
    pub fn cookie_name(&self) -> &'static str {
        self.cookie_name
    }

    /// 세션 식별자에 바인딩된 새 토큰
    pub fn generate_token(&self, session_id: &str) -> AppResult<String> {
        let mut random = vec![0u8; self.size];
        rand::thread_rng().fill_bytes(&mut random);
        let random = hex::encode(random);

        let signature = self.sign(session_id, &random)?;
        Ok(format!("{}|{}", signature, random))
    }

    /// 토큰의 HMAC이 세션 식별자에 대해 유효한지 확인합니다.
    pub fn validate_token(&self, token: &str, session_id: &str) -> bool {
        let Some((signature, random)) = token.split_once('|') else {
            return false;
        };
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };

        mac.update(message(session_id, random).as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    /// 상태 변경 요청 검증
    pub fn verify(&self, input: &CsrfRequestInput<'_>) -> AppResult<()> {
        let session_id = session_identifier(input.session_cookie, input.client_ip, input.user_agent);

        let (Some(supplied), Some(cookie)) = (input.supplied_token, input.token_cookie) else {
            return Err(AppError::AuthorizationError(INVALID_CSRF_TOKEN.to_string()));
        };

        if supplied != cookie || !self.validate_token(supplied, &session_id) {
            return Err(AppError::AuthorizationError(INVALID_CSRF_TOKEN.to_string()));
        }

        Ok(())
    }

    pub fn token_cookie(&self, token: String) -> Cookie<'static> {
        self.cookies.build(self.cookie_name, token, self.cookie_max_age)
    }

    fn sign(&self, session_id: &str, random: &str) -> AppResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::InternalError(format!("CSRF HMAC 초기화 실패: {}", e)))?;
        mac.update(message(session_id, random).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

fn message(session_id: &str, random: &str) -> String {
    format!("{}!{}!{}!{}", session_id.len(), session_id, random.len(), random)
}

/// 부팅 시 한 번 결정되는 가드 상태
#[derive(Debug, Clone)]
pub enum GuardInitResult {
    Enabled(CsrfProtector),
    Disabled { reason: String },
}

/// CSRF 가드
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    state: GuardInitResult,
    fail_open: bool,
    cookies: CookiePolicy,
}

impl CsrfGuard {
    /// 설정으로 가드를 초기화합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 설정 검증 실패 + `CSRF_STRICT=true`
    pub fn init(config: &CsrfConfig) -> AppResult<Self> {
        let cookies = CookiePolicy::new(config.environment);
        let fail_open = !config.strict;

        let state = match build_protector(config, cookies) {
            Ok(protector) => {
                info!("🛡️ CSRF protection enabled");
                GuardInitResult::Enabled(protector)
            }
            Err(reason) => {
                error!("❌ Failed to initialize CSRF protection: {}", reason);
                if !fail_open {
                    return Err(AppError::ConfigurationError(format!(
                        "CSRF initialization failed (strict mode): {}",
                        reason
                    )));
                }
                warn!("⚠️ CSRF protection is disabled (fail-open mode). Service continues to run.");
                GuardInitResult::Disabled { reason }
            }
        };

        Ok(Self { state, fail_open, cookies })
    }

    pub fn protector(&self) -> Option<&CsrfProtector> {
        match &self.state {
            GuardInitResult::Enabled(protector) => Some(protector),
            GuardInitResult::Disabled { .. } => None,
        }
    }

    pub fn disabled_reason(&self) -> Option<&str> {
        match &self.state {
            GuardInitResult::Enabled(_) => None,
            GuardInitResult::Disabled { reason } => Some(reason),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.protector().is_some()
    }

    pub fn status(&self) -> CsrfStatusResponse {
        CsrfStatusResponse {
            enabled: self.is_enabled(),
            fail_open: self.fail_open,
            reason: self.disabled_reason().unwrap_or_default().to_string(),
        }
    }

    /// 토큰을 발급합니다.
    ///
    /// 세션 쿠키가 없으면 새 세션을 만들어 토큰을 바인딩하고, 있으면 재사용합니다.
    /// 비활성 상태에서는 `"csrf-disabled"`를 반환합니다.
    pub fn issue(&self, existing_session: Option<&str>) -> AppResult<CsrfIssue> {
        let (session_id, session_cookie) = match existing_session.filter(|sid| !sid.is_empty()) {
            Some(sid) => (sid.to_string(), None),
            None => {
                let sid = Uuid::new_v4().to_string();
                let cookie = self.cookies.build(
                    CSRF_SESSION_COOKIE,
                    sid.clone(),
                    Duration::hours(SESSION_COOKIE_MAX_AGE_HOURS),
                );
                (sid, Some(cookie))
            }
        };

        match self.protector() {
            Some(protector) => {
                let token = protector.generate_token(&session_id)?;
                let token_cookie = protector.token_cookie(token.clone());
                Ok(CsrfIssue {
                    token,
                    session_cookie,
                    token_cookie: Some(token_cookie),
                })
            }
            None => {
                warn!("CSRF token generation is disabled (fail-open mode)");
                Ok(CsrfIssue {
                    token: CSRF_DISABLED_TOKEN.to_string(),
                    session_cookie,
                    token_cookie: None,
                })
            }
        }
    }
}

fn build_protector(config: &CsrfConfig, cookies: CookiePolicy) -> Result<CsrfProtector, String> {
    let size = match config.size.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_SIZE,
        Some(raw) => match raw.parse::<usize>() {
            Ok(size) if size > 0 => size,
            _ => return Err(format!("CSRF_SIZE must be a positive integer, got '{}'", raw)),
        },
    };

    let max_age_ms = match config.cookie_max_age_ms.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_COOKIE_MAX_AGE_MS,
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => return Err(format!("CSRF_COOKIE_MAX_AGE must be a positive number of milliseconds, got '{}'", raw)),
        },
    };
    let cookie_max_age = Duration::milliseconds(i64::try_from(max_age_ms).unwrap_or(i64::MAX));

    let secret = match config.secret.as_deref() {
        None => {
            if cookies.is_production() {
                error!("🚨 CSRF_SECRET is missing in production!");
                Secret::new(crate::config::emergency_secret())
            } else {
                Secret::new(DEV_CSRF_SECRET)
            }
        }
        Some(raw) if raw.trim().is_empty() => return Err("CSRF_SECRET must not be empty".to_string()),
        Some(raw) => Secret::new(raw),
    };

    let cookie_name = if cookies.is_production() {
        HOST_CSRF_TOKEN_COOKIE
    } else {
        CSRF_TOKEN_COOKIE
    };

    Ok(CsrfProtector {
        secret,
        size,
        cookie_name,
        cookie_max_age,
        cookies,
    })
}
