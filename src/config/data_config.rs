//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 사용자 저장소, 패스워드 해싱, CORS 및
//! 클라이언트 식별 관련 설정을 관리합니다.

use log::warn;

use super::{read, read_non_empty, Lookup};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - Secure 쿠키, 강한 비밀키 강제
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값으로 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 `Development`를 사용합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        read_non_empty(lookup, "ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Development)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            other => {
                warn!("⚠️ 알 수 없는 ENVIRONMENT 값 '{}', production으로 처리합니다", other);
                Environment::Production
            }
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 기본값: "0.0.0.0" (모든 인터페이스)
    pub host: String,
    /// 기본값: 8080
    pub port: u16,
}

impl ServerConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let host = read_non_empty(lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match read_non_empty(lookup, "PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("⚠️ PORT 파싱 실패 ({}): {}, 8080 사용", raw, e);
                8080
            }),
            None => 8080,
        };

        Self { host, port }
    }
}

/// 사용자 저장소 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStoreKind {
    /// MongoDB `users` 컬렉션
    Mongo,
    /// 프로세스 메모리 (테스트, 로컬 실행용)
    Memory,
}

/// 데이터베이스 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub store: UserStoreKind,
}

impl DatabaseConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let uri = read_non_empty(lookup, "MONGODB_URI")
            .unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let name = read_non_empty(lookup, "DATABASE_NAME").unwrap_or_else(|| "channel_auth".to_string());
        let store = match read_non_empty(lookup, "USER_STORE").map(|s| s.to_lowercase()) {
            Some(ref s) if s == "memory" => UserStoreKind::Memory,
            Some(ref s) if s == "mongo" || s == "mongodb" => UserStoreKind::Mongo,
            Some(other) => {
                warn!("⚠️ 알 수 없는 USER_STORE 값 '{}', mongo 사용", other);
                UserStoreKind::Mongo
            }
            None => UserStoreKind::Mongo,
        };

        Self { uri, name, store }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-31)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub const DEFAULT_COST: u32 = 12;

    /// `BCRYPT_ROUNDS`를 읽습니다. 범위를 벗어나거나 숫자가 아니면 기본값 12를 사용합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let bcrypt_cost = match read_non_empty(lookup, "BCRYPT_ROUNDS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => {
                    warn!("⚠️ BCRYPT_ROUNDS '{}'는 유효하지 않습니다 (4-31), {} 사용", raw, Self::DEFAULT_COST);
                    Self::DEFAULT_COST
                }
            },
            None => Self::DEFAULT_COST,
        };

        Self { bcrypt_cost }
    }
}

/// CORS 설정
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let allowed_origins = split_list(
            &read(lookup, "CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".to_string()),
        );

        Self { allowed_origins }
    }
}

/// 클라이언트 식별 설정
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// 자사 모바일 앱 User-Agent 식별자 (소문자)
    pub mobile_app_identifiers: Vec<String>,
}

impl ClientConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let mobile_app_identifiers = read(lookup, "MOBILE_APP_IDENTIFIERS")
            .map(|raw| split_list(&raw.to_lowercase()))
            .unwrap_or_default();

        Self { mobile_app_identifiers }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str(" PRODUCTION "), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_environment_defaults_to_development() {
        let lookup = map_lookup(&[]);
        assert_eq!(Environment::from_lookup(&lookup), Environment::Development);
    }

    #[test]
    fn test_server_config_defaults() {
        let lookup = map_lookup(&[("PORT", "not-a-port")]);
        let server = ServerConfig::from_lookup(&lookup);

        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_bcrypt_rounds_range() {
        let lookup = map_lookup(&[("BCRYPT_ROUNDS", "4")]);
        assert_eq!(PasswordConfig::from_lookup(&lookup).bcrypt_cost, 4);

        let lookup = map_lookup(&[("BCRYPT_ROUNDS", "40")]);
        assert_eq!(PasswordConfig::from_lookup(&lookup).bcrypt_cost, 12);
    }

    #[test]
    fn test_user_store_selection() {
        let lookup = map_lookup(&[("USER_STORE", "Memory")]);
        assert_eq!(DatabaseConfig::from_lookup(&lookup).store, UserStoreKind::Memory);

        let lookup = map_lookup(&[]);
        assert_eq!(DatabaseConfig::from_lookup(&lookup).store, UserStoreKind::Mongo);
    }

    #[test]
    fn test_mobile_app_identifiers_are_lowercased() {
        let lookup = map_lookup(&[("MOBILE_APP_IDENTIFIERS", "MyApp-iOS, MyApp-Android,,")]);
        let client = ClientConfig::from_lookup(&lookup);

        assert_eq!(client.mobile_app_identifiers, vec!["myapp-ios", "myapp-android"]);
    }
}
