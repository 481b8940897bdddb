//! 토큰 인증 미들웨어
//!
//! 라우트가 요구하는 토큰을 검증하고 [`AuthenticatedPrincipal`]을 요청 extension에 저장합니다.
//!
//! | 모드 | WEB | MOBILE |
//! |------|-----|--------|
//! | [`AuthMode::Access`] | Bearer 액세스 토큰 | Bearer 액세스 토큰 |
//! | [`AuthMode::Refresh`] | 리프레시 쿠키 | Bearer 리프레시 토큰 |
//!
//! [`AuthenticatedPrincipal`]: crate::domain::models::AuthenticatedPrincipal

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 요구하는 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Access,
    Refresh,
}

/// 토큰 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 액세스 토큰 필수
    pub fn access() -> Self {
        Self::new(AuthMode::Access)
    }

    /// 리프레시 토큰 필수
    pub fn refresh() -> Self {
        Self::new(AuthMode::Refresh)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}
