//! 부팅 시 한 번 조립되는 애플리케이션 상태
//!
//! 모든 구성 요소는 `Arc`로 공유되며 부팅 이후 변경되지 않습니다.
//! 가변 상태는 라우트별 호출 예산 리미터뿐입니다.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::errors::AppResult;
use crate::middlewares::RouteLimiters;
use crate::repositories::PrincipalStore;
use crate::services::auth::{AuthService, TokenService, TokenTransport};
use crate::services::security::{ClientClassifier, CsrfGuard};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn PrincipalStore>,
    pub classifier: Arc<ClientClassifier>,
    pub tokens: Arc<TokenService>,
    pub transport: TokenTransport,
    pub auth: Arc<AuthService>,
    pub csrf: Arc<CsrfGuard>,
    pub limiters: RouteLimiters,
}

impl AppState {
    /// 설정과 사용자 저장소로 전체 상태를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - `CSRF_STRICT=true`에서 CSRF 가드 초기화 실패
    pub fn build(config: AppConfig, store: Arc<dyn PrincipalStore>) -> AppResult<Self> {
        let csrf = Arc::new(CsrfGuard::init(&config.csrf)?);
        let classifier = Arc::new(ClientClassifier::new(&config.client));
        let transport = TokenTransport::new(config.environment);
        let tokens = Arc::new(TokenService::new(config.jwt.clone(), store.clone()));
        let auth = Arc::new(AuthService::new(
            store.clone(),
            tokens.clone(),
            transport,
            config.password.bcrypt_cost,
        ));
        let limiters = RouteLimiters::new(&config.rate_limit);

        Ok(Self {
            config: Arc::new(config),
            store,
            classifier,
            tokens,
            transport,
            auth,
            csrf,
            limiters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;
    use crate::core::errors::AppError;
    use crate::repositories::InMemoryUserRepository;

    #[test]
    fn test_build_with_defaults() {
        let lookup = map_lookup(&[]);
        let config = AppConfig::from_lookup(&lookup).unwrap();
        let state = AppState::build(config, Arc::new(InMemoryUserRepository::new())).unwrap();

        assert!(state.csrf.is_enabled());
        assert!(!state.config.is_production());
    }

    #[test]
    fn test_strict_csrf_failure_aborts_build() {
        let lookup = map_lookup(&[("CSRF_STRICT", "true"), ("CSRF_SIZE", "-1")]);
        let config = AppConfig::from_lookup(&lookup).unwrap();
        let result = AppState::build(config, Arc::new(InMemoryUserRepository::new()));

        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }
}
