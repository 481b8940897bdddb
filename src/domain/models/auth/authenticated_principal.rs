use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

use crate::core::errors::AppError;
use crate::domain::entities::users::User;

/// 인증 미들웨어가 토큰을 검증한 뒤 요청 extension에 저장하는 주체
///
/// 액세스 모드에서는 액세스 토큰의, 리프레시 모드에서는 리프레시 토큰의
/// 주체입니다. 항상 활성 사용자만 저장됩니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub User);

impl AuthenticatedPrincipal {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedPrincipal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication required".to_string(),
            ))),
        }
    }
}
