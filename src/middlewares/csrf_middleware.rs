//! CSRF 검증 미들웨어
//!
//! 요청 처리 순서:
//! 1. MOBILE 채널 → 검증 생략, `X-CSRF-Skipped: mobile-client`
//! 2. 가드 비활성(fail-open) → 통과, `X-CSRF-Disabled-Reason: <reason>`
//! 3. GET/HEAD/OPTIONS → 통과
//! 4. 헤더 또는 JSON `_token` 필드의 토큰을 쿠키/세션과 대조, 실패 시 403
//!
//! 앱 전역에 한 번 등록하며 라우트별 호출 예산과 인증보다 먼저 실행됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{mime, web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::services::security::{
    is_ignored_method, ClientClassifier, CsrfGuard, CsrfRequestInput, CSRF_BODY_FIELD, CSRF_DISABLED_HEADER,
    CSRF_SESSION_COOKIE, CSRF_SKIPPED_HEADER, CSRF_TOKEN_HEADERS,
};
use crate::utils::client_ip::client_identity;

const MOBILE_CLIENT: &str = "mobile-client";

/// CSRF 미들웨어
pub struct CsrfMiddleware {
    guard: Arc<CsrfGuard>,
    classifier: Arc<ClientClassifier>,
}

impl CsrfMiddleware {
    pub fn new(guard: Arc<CsrfGuard>, classifier: Arc<ClientClassifier>) -> Self {
        Self { guard, classifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CsrfMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CsrfMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CsrfMiddlewareService {
            service: Rc::new(service),
            guard: self.guard.clone(),
            classifier: self.classifier.clone(),
        }))
    }
}

pub struct CsrfMiddlewareService<S> {
    service: Rc<S>,
    guard: Arc<CsrfGuard>,
    classifier: Arc<ClientClassifier>,
}

impl<S, B> Service<ServiceRequest> for CsrfMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let guard = self.guard.clone();
        let channel = self.classifier.classify_request(req.headers());

        Box::pin(async move {
            if channel.is_mobile() {
                let mut res = service.call(req).await?;
                res.headers_mut().insert(
                    HeaderName::from_static(CSRF_SKIPPED_HEADER),
                    HeaderValue::from_static(MOBILE_CLIENT),
                );
                return Ok(res.map_into_left_body());
            }

            let Some(protector) = guard.protector() else {
                let mut res = service.call(req).await?;
                if let Some(value) = guard
                    .disabled_reason()
                    .filter(|reason| !reason.is_empty())
                    .and_then(|reason| HeaderValue::from_str(reason).ok())
                {
                    res.headers_mut().insert(HeaderName::from_static(CSRF_DISABLED_HEADER), value);
                }
                return Ok(res.map_into_left_body());
            };

            if is_ignored_method(req.method()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let supplied = match header_token(&req) {
                Some(token) => Some(token),
                None => body_token(&mut req).await,
            };
            let session_cookie = req.cookie(CSRF_SESSION_COOKIE);
            let token_cookie = req.cookie(protector.cookie_name());
            let client_ip = client_identity(&req);
            let user_agent = req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();

            let input = CsrfRequestInput {
                session_cookie: session_cookie.as_ref().map(|c| c.value()),
                token_cookie: token_cookie.as_ref().map(|c| c.value()),
                supplied_token: supplied.as_deref(),
                client_ip: &client_ip,
                user_agent: &user_agent,
            };

            if let Err(err) = protector.verify(&input) {
                log::warn!("🛡️ CSRF 검증 실패: {} {}", req.method(), req.path());
                return Ok(reject(req, err));
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 허용된 헤더 중 처음 발견된 토큰
fn header_token(req: &ServiceRequest) -> Option<String> {
    CSRF_TOKEN_HEADERS.iter().find_map(|name| {
        req.headers()
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// JSON 본문의 `_token` 필드
///
/// 본문을 읽은 뒤 핸들러가 다시 읽을 수 있도록 payload를 되돌려 놓습니다.
async fn body_token(req: &mut ServiceRequest) -> Option<String> {
    let is_json = req
        .mime_type()
        .ok()
        .flatten()
        .is_some_and(|ct| ct.subtype() == mime::JSON || ct.suffix() == Some(mime::JSON));
    if !is_json {
        return None;
    }

    let bytes = req.extract::<web::Bytes>().await.ok()?;
    let token = serde_json::from_slice::<serde_json::Value>(&bytes)
        .ok()
        .and_then(|body| body.get(CSRF_BODY_FIELD).and_then(|v| v.as_str()).map(str::to_string));

    req.set_payload(Payload::from(bytes));
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CsrfConfig, Environment};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};

    fn csrf_config(secret: Option<&str>) -> CsrfConfig {
        CsrfConfig {
            environment: Environment::Development,
            secret: secret.map(str::to_string),
            size: None,
            cookie_max_age_ms: None,
            strict: false,
        }
    }

    async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
        HttpResponse::Ok().json(body.into_inner())
    }

    macro_rules! csrf_app {
        ($guard:expr) => {
            test::init_service(
                App::new()
                    .wrap(CsrfMiddleware::new(Arc::new($guard), Arc::new(ClientClassifier::default())))
                    .route("/submit", web::post().to(echo))
                    .route("/read", web::get().to(HttpResponse::Ok)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_browser_post_without_token_is_forbidden() {
        let app = csrf_app!(CsrfGuard::init(&csrf_config(None)).unwrap());

        let req = test::TestRequest::post()
            .uri("/submit")
            .insert_header((header::USER_AGENT, "Mozilla/5.0"))
            .set_json(serde_json::json!({"a": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["message"], "Invalid CSRF token");
    }

    #[actix_web::test]
    async fn test_safe_method_passes() {
        let app = csrf_app!(CsrfGuard::init(&csrf_config(None)).unwrap());

        let req = test::TestRequest::get().uri("/read").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_mobile_client_is_skipped() {
        let app = csrf_app!(CsrfGuard::init(&csrf_config(None)).unwrap());

        let req = test::TestRequest::post()
            .uri("/submit")
            .insert_header(("X-Client-Type", "mobile"))
            .set_json(serde_json::json!({"a": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CSRF_SKIPPED_HEADER).unwrap(), "mobile-client");
    }

    #[actix_web::test]
    async fn test_body_token_is_accepted_and_body_preserved() {
        let guard = CsrfGuard::init(&csrf_config(None)).unwrap();
        let issue = guard.issue(None).unwrap();
        let session = issue.session_cookie.clone().unwrap();
        let token_cookie = issue.token_cookie.clone().unwrap();
        let app = csrf_app!(guard);

        let req = test::TestRequest::post()
            .uri("/submit")
            .insert_header((header::USER_AGENT, "Mozilla/5.0"))
            .cookie(Cookie::new(session.name().to_string(), session.value().to_string()))
            .cookie(Cookie::new(token_cookie.name().to_string(), token_cookie.value().to_string()))
            .set_json(serde_json::json!({"_token": issue.token, "a": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["a"], 1);
    }

    #[actix_web::test]
    async fn test_disabled_guard_passes_with_reason_header() {
        let app = csrf_app!(CsrfGuard::init(&csrf_config(Some("   "))).unwrap());

        let req = test::TestRequest::post()
            .uri("/submit")
            .insert_header((header::USER_AGENT, "Mozilla/5.0"))
            .set_json(serde_json::json!({"a": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(CSRF_DISABLED_HEADER).unwrap(),
            "CSRF_SECRET must not be empty"
        );
    }
}
