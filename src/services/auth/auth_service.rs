//! 인증 오케스트레이터
//!
//! 저장소, 토큰 서비스, 전달 정책을 조합해 회원가입/로그인/토큰 갱신/
//! 로그아웃/프로필 조회를 처리합니다. 로그인 입력 검증은 핸들러에서, 회원가입 입력 검증은
//! 중복 이메일 확인과의 순서 때문에 여기서 수행됩니다.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::web;
use log::{info, warn};
use validator::Validate;

use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::tokens::LogoutResponse;
use crate::domain::dto::users::{LoginRequest, ProfileResponse, ProfileUser, RegisterRequest, RegisterResponse};
use crate::domain::entities::users::User;
use crate::domain::models::ChannelType;
use crate::repositories::PrincipalStore;
use crate::services::auth::{Delivery, TokenService, TokenTransport};

/// 인증 유스케이스 서비스
pub struct AuthService {
    store: Arc<dyn PrincipalStore>,
    tokens: Arc<TokenService>,
    transport: TokenTransport,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        tokens: Arc<TokenService>,
        transport: TokenTransport,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            tokens,
            transport,
            bcrypt_cost,
        }
    }

    /// 회원가입
    ///
    /// 토큰은 발급하지 않으며 공개 필드(`id`, `email`)만 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일 형식 오류, 또는 새 이메일의 비밀번호 규칙 위반
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일 (비밀번호 규칙과 무관)
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let invalid = request.validate().err();
        if let Some(errors) = invalid.as_ref().filter(|e| e.field_errors().contains_key("email")) {
            return Err(AppError::ValidationError(errors.to_string()));
        }

        if self.store.find_by_email(&request.email).await?.is_some() {
            warn!("회원가입 거부 - 중복 이메일: {}", request.email);
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }

        if let Some(errors) = invalid {
            return Err(AppError::ValidationError(errors.to_string()));
        }

        let password_hash = self.hash_password(request.password).await?;
        let user = self.store.save(User::new_local(request.email, password_hash)).await?;

        info!("✅ 회원가입 완료 - 사용자: {}", user.email);
        Ok(RegisterResponse::from(&user))
    }

    /// 로그인
    ///
    /// 존재하지 않는 이메일, 비활성 계정, 잘못된 비밀번호는 모두
    /// 같은 `Invalid credentials` 에러입니다.
    pub async fn login(&self, request: LoginRequest, channel: ChannelType) -> Result<Delivery, AppError> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(AppError::invalid_credentials)?;

        if !self.verify_password(request.password, user.password_hash.clone()).await? {
            warn!("로그인 실패 - 사용자: {}", request.email);
            return Err(AppError::invalid_credentials());
        }

        info!("로그인 성공 - 사용자: {}, 채널: {}", user.email, channel);
        self.issue_and_deliver(&user, channel)
    }

    /// 리프레시 토큰으로 검증된 사용자에게 새 토큰 쌍을 발급합니다.
    ///
    /// 이전 토큰은 무효화되지 않습니다.
    pub fn refresh(&self, user: &User, channel: ChannelType) -> Result<Delivery, AppError> {
        info!("토큰 갱신 - 사용자: {}, 채널: {}", user.email, channel);
        self.issue_and_deliver(user, channel)
    }

    /// 로그아웃
    ///
    /// 서버 상태는 없으며 WEB 리프레시 쿠키 만료는 채널과 무관하게 항상 포함됩니다.
    pub fn logout(&self, user: &User, channel: ChannelType) -> (LogoutResponse, Cookie<'static>) {
        info!("로그아웃 - 사용자: {}, 채널: {}", user.email, channel);

        let body = match channel {
            ChannelType::Mobile => LogoutResponse::mobile(chrono::Utc::now().to_rfc3339()),
            ChannelType::Web => LogoutResponse::web(),
        };

        (body, self.transport.clear_refresh_cookie())
    }

    pub fn profile(&self, user: &User) -> ProfileResponse {
        ProfileResponse {
            user: ProfileUser::from(user),
        }
    }

    fn issue_and_deliver(&self, user: &User, channel: ChannelType) -> Result<Delivery, AppError> {
        let pair = self.tokens.issue_tokens(user, channel)?;
        Ok(self.transport.deliver(channel, pair, user))
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;

        web::block(move || bcrypt::hash(password, cost))
            .await
            .context("비밀번호 해싱 작업 실패")?
            .context("비밀번호 해싱 실패")
    }

    async fn verify_password(&self, password: String, password_hash: String) -> Result<bool, AppError> {
        web::block(move || bcrypt::verify(password, &password_hash))
            .await
            .context("비밀번호 검증 작업 실패")?
            .context("비밀번호 검증 실패")
    }
}
