//! # Configuration Module
//!
//! 부팅 시 한 번 만들어지는 불변 설정 [`AppConfig`]를 정의합니다.
//! 생성된 설정은 `Arc`/`web::Data`로 주입되며 이후 변경되지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, CORS, 클라이언트 식별
//! - [`auth_config`] - JWT 비밀키/TTL 정책, CSRF 가드 원시 설정
//! - [`rate_limit_config`] - 라우트별 호출 예산
//!
//! ## 환경 분리
//!
//! `PROFILE=dev|prod`에 따라 `.env.dev`/`.env.prod` 파일을 먼저 로드한 뒤
//! [`AppConfig::from_env`]로 읽습니다. 모든 리더는 [`AppConfig::from_lookup`]으로
//! 임의의 키 조회 함수를 받을 수 있어 테스트가 프로세스 환경 변수를 건드리지 않습니다.
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}:{}", config.server.host, config.server.port);
//! ```

pub mod auth_config;
pub mod data_config;
pub mod rate_limit_config;

pub use auth_config::*;
pub use data_config::*;
pub use rate_limit_config::*;

use crate::core::errors::AppResult;

/// 설정 키 조회 함수
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 원본 값을 그대로 읽습니다.
pub(crate) fn read(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
}

/// 비어 있지 않은 값만 읽습니다.
pub(crate) fn read_non_empty(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub client: ClientConfig,
    pub jwt: JwtConfig,
    pub csrf: CsrfConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// 주어진 조회 함수로 설정을 읽습니다.
    ///
    /// 비밀키 강도 미달, 잘못된 TTL 등은 `ConfigurationError`로 실패합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> AppResult<Self> {
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup),
            database: DatabaseConfig::from_lookup(lookup),
            password: PasswordConfig::from_lookup(lookup),
            cors: CorsConfig::from_lookup(lookup),
            client: ClientConfig::from_lookup(lookup),
            jwt: JwtConfig::from_lookup(lookup, environment)?,
            csrf: CsrfConfig::from_lookup(lookup, environment),
            rate_limit: RateLimitConfig::from_lookup(lookup),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// 고정된 키/값 목록으로 조회 함수를 만듭니다.
#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    move |key: &str| map.get(key).cloned()
}
