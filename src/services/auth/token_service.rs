//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급과 검증을 담당합니다.
//! 두 토큰은 서로 다른 비밀키(HS256)와 채널별 TTL로 서명되며,
//! 서버에 저장되지 않습니다 (stateless).

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::users::User;
use crate::domain::models::{AccessClaims, ChannelType, RefreshClaims, TokenClaims, TokenKind, TokenPair};
use crate::repositories::PrincipalStore;

/// 토큰 검증 실패 원인
///
/// 클라이언트에는 모두 `AuthenticationError`로 전달됩니다.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token type")]
    InvalidTokenType,
    #[error("Invalid token issuer")]
    InvalidIssuer,
    #[error("Invalid token audience")]
    InvalidAudience,
    #[error("Invalid or expired token")]
    InvalidOrExpired,
    #[error("User not found or inactive")]
    PrincipalNotFoundOrInactive,
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> Self {
        AppError::AuthenticationError(error.to_string())
    }
}

/// JWT 토큰 관리 서비스
pub struct TokenService {
    config: JwtConfig,
    store: Arc<dyn PrincipalStore>,
}

impl TokenService {
    pub fn new(config: JwtConfig, store: Arc<dyn PrincipalStore>) -> Self {
        Self { config, store }
    }

    /// 채널 TTL에 맞춰 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID 없음, 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue_tokens(&user, ChannelType::Mobile)?;
    /// println!("Expires in: {} seconds", pair.expires_in);
    /// ```
    pub fn issue_tokens(&self, user: &User, channel: ChannelType) -> Result<TokenPair, AppError> {
        let sub = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let now = Utc::now().timestamp();
        let access_ttl = self.ttl_secs(TokenKind::Access, channel);
        let refresh_ttl = self.ttl_secs(TokenKind::Refresh, channel);

        let access_claims = AccessClaims {
            sub: sub.clone(),
            email: user.email.clone(),
            token_type: TokenKind::Access.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(access_ttl),
        };

        let refresh_claims = RefreshClaims {
            sub,
            email: user.email.clone(),
            token_type: TokenKind::Refresh.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now.saturating_add(refresh_ttl),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let access_token = self.sign(TokenKind::Access, &access_claims)?;
        let refresh_token = self.sign(TokenKind::Refresh, &refresh_claims)?;

        debug!("🔑 토큰 발급: user={} channel={}", user.email, channel);

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: access_ttl,
            refresh_expires_in: refresh_ttl,
        })
    }

    /// 액세스 토큰을 검증하고 활성 사용자를 반환합니다.
    pub async fn verify_access(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_claims(TokenKind::Access, token)?;
        self.load_active_principal(&claims).await
    }

    /// 리프레시 토큰을 검증하고 활성 사용자를 반환합니다.
    ///
    /// `iss`/`aud` 클레임은 존재할 때만 설정값과 비교합니다.
    /// `jti` 블랙리스트는 없습니다.
    pub async fn verify_refresh(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_claims(TokenKind::Refresh, token)?;

        if let Some(iss) = claims.iss.as_deref() {
            if iss != self.config.issuer {
                return Err(TokenError::InvalidIssuer.into());
            }
        }
        if let Some(aud) = claims.aud.as_deref() {
            if aud != self.config.audience {
                return Err(TokenError::InvalidAudience.into());
            }
        }

        self.load_active_principal(&claims).await
    }

    /// 서명과 만료를 검증한 뒤 `type` 클레임을 확인합니다.
    pub fn decode_claims(&self, kind: TokenKind, token: &str) -> Result<TokenClaims, TokenError> {
        let decoding_key = DecodingKey::from_secret(self.config.secret(kind).as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => debug!("{} 토큰 만료", kind.as_str()),
                    _ => debug!("{} 토큰 검증 실패: {}", kind.as_str(), e),
                }
                TokenError::InvalidOrExpired
            })?;

        if claims.token_type != kind.as_str() {
            warn!("⚠️ 토큰 타입 불일치: expected={} actual={}", kind.as_str(), claims.token_type);
            return Err(TokenError::InvalidTokenType);
        }

        Ok(claims)
    }

    async fn load_active_principal(&self, claims: &TokenClaims) -> Result<User, AppError> {
        match self.store.find_by_id(&claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(TokenError::PrincipalNotFoundOrInactive.into()),
        }
    }

    fn sign<T: serde::Serialize>(&self, kind: TokenKind, claims: &T) -> Result<String, AppError> {
        let encoding_key = EncodingKey::from_secret(self.config.secret(kind).as_bytes());

        encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("{} 토큰 생성 실패: {}", kind.as_str(), e)))
    }

    fn ttl_secs(&self, kind: TokenKind, channel: ChannelType) -> i64 {
        let secs = self.config.ttl.ttl(kind, channel).as_secs();
        i64::try_from(secs).unwrap_or(i64::MAX / 2).max(1)
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 부분만 추출합니다.
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{map_lookup, Environment};
    use crate::repositories::InMemoryUserRepository;

    struct Fixture {
        service: TokenService,
        store: Arc<InMemoryUserRepository>,
        user: User,
    }

    async fn fixture(pairs: &[(&str, &str)]) -> Fixture {
        let lookup = map_lookup(pairs);
        let config = JwtConfig::from_lookup(&lookup, Environment::Test).unwrap();
        let store = Arc::new(InMemoryUserRepository::new());
        let user = store
            .save(User::new_local("user@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        Fixture {
            service: TokenService::new(config, store.clone()),
            store,
            user,
        }
    }

    fn auth_message(result: Result<User, AppError>) -> String {
        match result {
            Err(AppError::AuthenticationError(msg)) => msg,
            other => panic!("expected AuthenticationError, got {:?}", other.map(|u| u.email)),
        }
    }

    #[actix_web::test]
    async fn test_issue_then_verify_succeeds() {
        let f = fixture(&[]).await;
        let pair = f.service.issue_tokens(&f.user, ChannelType::Web).unwrap();

        let from_access = f.service.verify_access(&pair.access_token).await.unwrap();
        let from_refresh = f.service.verify_refresh(&pair.refresh_token).await.unwrap();

        assert_eq!(from_access.id, f.user.id);
        assert_eq!(from_refresh.id, f.user.id);
        assert_eq!(pair.expires_in, 15 * 60);
        assert_eq!(pair.refresh_expires_in, 12 * 3600);
    }

    #[actix_web::test]
    async fn test_mobile_channel_uses_mobile_ttl() {
        let f = fixture(&[]).await;
        let pair = f.service.issue_tokens(&f.user, ChannelType::Mobile).unwrap();

        assert_eq!(pair.expires_in, 30 * 60);
        assert_eq!(pair.refresh_expires_in, 30 * 86400);
    }

    #[actix_web::test]
    async fn test_tokens_are_not_interchangeable() {
        // 같은 비밀키라도 type 클레임으로 거부되어야 한다
        let f = fixture(&[]).await;
        let pair = f.service.issue_tokens(&f.user, ChannelType::Web).unwrap();

        assert_eq!(auth_message(f.service.verify_access(&pair.refresh_token).await), "Invalid token type");
        assert_eq!(auth_message(f.service.verify_refresh(&pair.access_token).await), "Invalid token type");
    }

    #[actix_web::test]
    async fn test_distinct_secrets_reject_cross_use() {
        let f = fixture(&[
            ("JWT_ACCESS_SECRET", "access-secret-access-secret-0000"),
            ("JWT_REFRESH_SECRET", "refresh-secret-refresh-secret-00"),
        ])
        .await;
        let pair = f.service.issue_tokens(&f.user, ChannelType::Web).unwrap();

        assert_eq!(auth_message(f.service.verify_refresh(&pair.access_token).await), "Invalid or expired token");
    }

    #[actix_web::test]
    async fn test_expired_token_fails() {
        let f = fixture(&[]).await;
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: f.user.id_string().unwrap(),
            email: f.user.email.clone(),
            token_type: "access".to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = f.service.sign(TokenKind::Access, &claims).unwrap();

        assert_eq!(auth_message(f.service.verify_access(&token).await), "Invalid or expired token");
    }

    #[actix_web::test]
    async fn test_inactive_principal_fails() {
        let f = fixture(&[]).await;
        let pair = f.service.issue_tokens(&f.user, ChannelType::Web).unwrap();
        f.store.set_active(&f.user.id_string().unwrap(), false).unwrap();

        assert_eq!(auth_message(f.service.verify_access(&pair.access_token).await), "User not found or inactive");
        assert_eq!(auth_message(f.service.verify_refresh(&pair.refresh_token).await), "User not found or inactive");
    }

    #[actix_web::test]
    async fn test_refresh_issuer_and_audience_are_checked() {
        let f = fixture(&[]).await;
        let now = Utc::now().timestamp();
        let mut claims = RefreshClaims {
            sub: f.user.id_string().unwrap(),
            email: f.user.email.clone(),
            token_type: "refresh".to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 60,
            iss: "someone-else".to_string(),
            aud: "channel-auth".to_string(),
        };
        let token = f.service.sign(TokenKind::Refresh, &claims).unwrap();
        assert_eq!(auth_message(f.service.verify_refresh(&token).await), "Invalid token issuer");

        claims.iss = "channel-auth".to_string();
        claims.aud = "other-audience".to_string();
        let token = f.service.sign(TokenKind::Refresh, &claims).unwrap();
        assert_eq!(auth_message(f.service.verify_refresh(&token).await), "Invalid token audience");
    }

    #[actix_web::test]
    async fn test_refresh_without_issuer_claims_is_accepted() {
        let f = fixture(&[]).await;
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": f.user.id_string().unwrap(),
            "email": f.user.email.clone(),
            "type": "refresh",
            "iat": now,
            "exp": now + 60,
        });
        let token = f.service.sign(TokenKind::Refresh, &claims).unwrap();

        assert!(f.service.verify_refresh(&token).await.is_ok());
    }

    #[actix_web::test]
    async fn test_garbage_token_fails() {
        let f = fixture(&[]).await;
        assert_eq!(auth_message(f.service.verify_access("not.a.jwt").await), "Invalid or expired token");
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer("bearer   abc"), Some("abc"));
        assert_eq!(extract_bearer("Basic abc"), None);
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("abc"), None);
    }
}
