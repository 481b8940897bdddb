//! AuthMiddleware 토큰 추출과 검증
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::domain::entities::users::User;
use crate::domain::models::{AuthenticatedPrincipal, ChannelType};
use crate::middlewares::auth_middleware::AuthMode;
use crate::services::auth::{extract_bearer, TokenService, TokenTransport};
use crate::services::security::ClientClassifier;

const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            match authenticate(&req, mode).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 {}", user.email);
                    req.extensions_mut().insert(AuthenticatedPrincipal(user));
                }
                Err(err) => {
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 모드와 채널에 맞는 위치에서 토큰을 읽어 검증합니다.
async fn authenticate(req: &ServiceRequest, mode: AuthMode) -> Result<User, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;

    match mode {
        AuthMode::Access => {
            let token = bearer_token(req)?;
            token_service.verify_access(&token).await
        }
        AuthMode::Refresh => {
            let token = refresh_token(req)?;
            token_service.verify_refresh(&token).await
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Result<String, AppError> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .map(str::to_string)
        .ok_or_else(|| AppError::AuthenticationError(AUTHENTICATION_REQUIRED.to_string()))
}

/// WEB은 리프레시 쿠키, MOBILE은 Bearer 헤더
fn refresh_token(req: &ServiceRequest) -> Result<String, AppError> {
    let channel = req
        .app_data::<web::Data<ClientClassifier>>()
        .map(|classifier| classifier.classify_request(req.headers()))
        .unwrap_or(ChannelType::Web);

    if channel.is_mobile() {
        return bearer_token(req);
    }

    let cookie_name = req
        .app_data::<web::Data<TokenTransport>>()
        .map(|transport| transport.refresh_cookie_name())
        .ok_or_else(|| AppError::InternalError("TokenTransport가 등록되지 않았습니다".to_string()))?;

    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::AuthenticationError(AUTHENTICATION_REQUIRED.to_string()))
}
