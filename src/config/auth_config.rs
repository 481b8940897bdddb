//! # Authentication Configuration Module
//!
//! JWT 서명 비밀키, 채널별 토큰 TTL 정책, CSRF 가드 설정을 관리합니다.
//!
//! ## 비밀키 해석 규칙
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 비프로덕션 + 미설정 | 개발용 고정 값 |
//! | 프로덕션 + 미설정 + `JWT_SECRET_STRICT=true` (기본) | 부팅 실패 |
//! | 프로덕션 + 미설정 + lenient | `prod-emergency-fallback-<ts>` (error 로그) |
//! | 프로덕션 + 32자 미만 | 부팅 실패 (strict 여부 무관) |
//!
//! ## TTL 설정
//!
//! ```bash
//! export JWT_ACCESS_EXPIRES_IN="15m"
//! export JWT_REFRESH_EXPIRES_IN="12h"
//! export JWT_MOBILE_ACCESS_EXPIRES_IN="30m"
//! export JWT_MOBILE_REFRESH_EXPIRES_IN="30d"
//! ```
//!
//! 값은 `<n>ms|s|m|h|d` 또는 초 단위 숫자입니다. 파싱할 수 없거나 0이면 부팅이 실패합니다.

use std::fmt;
use std::time::Duration;

use log::{error, warn};

use super::{read, read_non_empty, Environment, Lookup};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::{ChannelType, TokenKind};

/// 비프로덕션 환경의 JWT 개발용 비밀키
pub const DEV_JWT_SECRET: &str = "dev-fallback-secret";

/// 프로덕션 비밀키 최소 길이
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// 로그와 Debug 출력에서 값을 숨기는 비밀 문자열
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

/// 프로덕션 비상용 비밀키
///
/// 재시작마다 값이 바뀌므로 이전에 발급된 토큰은 모두 무효가 됩니다.
pub fn emergency_secret() -> String {
    format!("prod-emergency-fallback-{}", chrono::Utc::now().timestamp_millis())
}

/// 기간 문자열을 파싱합니다.
///
/// `"15m"`, `"12h"`, `"30d"`, `"500ms"`, `"45s"` 또는 초 단위 숫자(`"900"`)를 받습니다.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }

    let split_at = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split_at);

    let amount: u64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{}'", raw))?;

    let duration = match unit.trim() {
        "" | "s" => Duration::from_secs(amount),
        "ms" => Duration::from_millis(amount),
        "m" => Duration::from_secs(amount.saturating_mul(60)),
        "h" => Duration::from_secs(amount.saturating_mul(60 * 60)),
        "d" => Duration::from_secs(amount.saturating_mul(24 * 60 * 60)),
        other => return Err(format!("unknown duration unit '{}' in '{}'", other, raw)),
    };

    if duration.is_zero() {
        return Err(format!("duration '{}' must be greater than zero", raw));
    }

    Ok(duration)
}

/// 채널별 토큰 수명 정책
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    pub web_access: Duration,
    pub web_refresh: Duration,
    pub mobile_access: Duration,
    pub mobile_refresh: Duration,
}

impl TtlPolicy {
    pub fn ttl(&self, kind: TokenKind, channel: ChannelType) -> Duration {
        match (kind, channel) {
            (TokenKind::Access, ChannelType::Web) => self.web_access,
            (TokenKind::Refresh, ChannelType::Web) => self.web_refresh,
            (TokenKind::Access, ChannelType::Mobile) => self.mobile_access,
            (TokenKind::Refresh, ChannelType::Mobile) => self.mobile_refresh,
        }
    }

    fn from_lookup(lookup: Lookup<'_>) -> AppResult<Self> {
        Ok(Self {
            web_access: ttl_from(lookup, "JWT_ACCESS_EXPIRES_IN", "15m")?,
            web_refresh: ttl_from(lookup, "JWT_REFRESH_EXPIRES_IN", "12h")?,
            mobile_access: ttl_from(lookup, "JWT_MOBILE_ACCESS_EXPIRES_IN", "30m")?,
            mobile_refresh: ttl_from(lookup, "JWT_MOBILE_REFRESH_EXPIRES_IN", "30d")?,
        })
    }
}

fn ttl_from(lookup: Lookup<'_>, key: &str, default: &str) -> AppResult<Duration> {
    let raw = read_non_empty(lookup, key).unwrap_or_else(|| default.to_string());
    parse_duration(&raw).map_err(|e| AppError::ConfigurationError(format!("{}: {}", key, e)))
}

/// JWT 설정
///
/// 부팅 시 한 번 만들어지며 이후 읽기 전용입니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: Secret,
    pub refresh_secret: Secret,
    pub ttl: TtlPolicy,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn from_lookup(lookup: Lookup<'_>, environment: Environment) -> AppResult<Self> {
        let strict = parse_flag(read(lookup, "JWT_SECRET_STRICT").as_deref(), true);

        Ok(Self {
            access_secret: resolve_secret(lookup, "JWT_ACCESS_SECRET", environment, strict)?,
            refresh_secret: resolve_secret(lookup, "JWT_REFRESH_SECRET", environment, strict)?,
            ttl: TtlPolicy::from_lookup(lookup)?,
            issuer: read_non_empty(lookup, "JWT_ISSUER").unwrap_or_else(|| "channel-auth".to_string()),
            audience: read_non_empty(lookup, "JWT_AUDIENCE").unwrap_or_else(|| "channel-auth".to_string()),
        })
    }

    pub fn secret(&self, kind: TokenKind) -> &Secret {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }
}

fn resolve_secret(
    lookup: Lookup<'_>,
    key: &str,
    environment: Environment,
    strict: bool,
) -> AppResult<Secret> {
    let is_prod = environment.is_production();

    match read_non_empty(lookup, key) {
        Some(secret) if is_prod && secret.len() < MIN_PRODUCTION_SECRET_LEN => {
            Err(AppError::ConfigurationError(format!(
                "JWT weak secret: {} must be >= {} chars in production",
                key, MIN_PRODUCTION_SECRET_LEN
            )))
        }
        Some(secret) => Ok(Secret::new(secret)),
        None if !is_prod => {
            warn!("⚠️ {} not set, using development secret", key);
            Ok(Secret::new(DEV_JWT_SECRET))
        }
        None if strict => Err(AppError::ConfigurationError(format!(
            "JWT misconfig: {} is required in production",
            key
        ))),
        None => {
            error!("🚨 {} is missing in production, using emergency secret", key);
            Ok(Secret::new(emergency_secret()))
        }
    }
}

/// CSRF 가드 원시 설정
///
/// 값 검증은 가드 초기화 시점에 수행되며, 실패는 `CSRF_STRICT`에 따라
/// 부팅 중단 또는 비활성화(fail-open)로 이어집니다.
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    pub environment: Environment,
    /// `CSRF_SECRET` 원본 값
    pub secret: Option<String>,
    /// `CSRF_SIZE` 원본 값 (랜덤 바이트 수, 기본 128)
    pub size: Option<String>,
    /// `CSRF_COOKIE_MAX_AGE` 원본 값 (밀리초, 기본 25분)
    pub cookie_max_age_ms: Option<String>,
    /// `CSRF_STRICT=true`이면 초기화 실패 시 부팅을 중단합니다.
    pub strict: bool,
}

impl CsrfConfig {
    pub fn from_lookup(lookup: Lookup<'_>, environment: Environment) -> Self {
        Self {
            environment,
            secret: read(lookup, "CSRF_SECRET"),
            size: read(lookup, "CSRF_SIZE"),
            cookie_max_age_ms: read(lookup, "CSRF_COOKIE_MAX_AGE"),
            strict: parse_flag(read(lookup, "CSRF_STRICT").as_deref(), false),
        }
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|s| s.trim().to_lowercase()) {
        Some(ref s) if s == "true" || s == "1" => true,
        Some(ref s) if s == "false" || s == "0" => false,
        _ => default,
    }
}
