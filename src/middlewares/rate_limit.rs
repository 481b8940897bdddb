//! 라우트별 호출 예산 미들웨어
//!
//! `governor`의 keyed 리미터를 라우트마다 하나씩 두고, 클라이언트 식별자
//! ([`client_identity`])를 키로 사용합니다. 리미터는 부팅 시 만들어져 모든 워커가 공유합니다.
//!
//! ```rust,ignore
//! web::resource("/register")
//!     .wrap(limiters.guard(RateLimitedRoute::Register))
//!     .route(web::post().to(register))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::{RateLimitConfig, RateLimitedRoute, RouteBudget};
use crate::core::errors::AppError;
use crate::utils::client_ip::client_identity;

/// 이 횟수의 검사마다 만료된 클라이언트 상태를 정리합니다.
const PRUNE_EVERY: u64 = 1024;

/// 클라이언트 식별자 기준 리미터
pub type KeyedLimiter = DefaultKeyedRateLimiter<String>;

/// 예산: 첫 호출부터 `window` 안에서 최대 `limit`회, 이후 `window`마다 1회 회복
pub fn build_limiter(budget: RouteBudget) -> KeyedLimiter {
    let quota = Quota::with_period(budget.window)
        .unwrap_or_else(|| Quota::per_second(budget.limit))
        .allow_burst(budget.limit);

    RateLimiter::keyed(quota)
}

/// 한 라우트의 리미터와 검사 횟수
///
/// 식별자는 클라이언트가 보낸 헤더에서 오므로 키 수가 계속 늘 수 있습니다.
/// [`PRUNE_EVERY`]회 검사마다 초기 상태로 돌아간 키를 지웁니다.
pub struct RouteBucket {
    limiter: KeyedLimiter,
    checks: AtomicU64,
}

impl RouteBucket {
    pub fn new(budget: RouteBudget) -> Self {
        Self {
            limiter: build_limiter(budget),
            checks: AtomicU64::new(0),
        }
    }

    /// 예산 안이면 `true`
    pub fn check(&self, identity: &str) -> bool {
        let seen = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % PRUNE_EVERY == 0 {
            self.prune();
        }

        self.limiter.check_key(&identity.to_owned()).is_ok()
    }

    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// 상태를 보관 중인 클라이언트 수
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// 라우트별 공유 리미터 묶음
#[derive(Clone)]
pub struct RouteLimiters {
    register: Arc<RouteBucket>,
    login: Arc<RouteBucket>,
    refresh: Arc<RouteBucket>,
    logout: Arc<RouteBucket>,
    profile: Arc<RouteBucket>,
}

impl RouteLimiters {
    pub fn new(config: &RateLimitConfig) -> Self {
        let build = |route| Arc::new(RouteBucket::new(config.budget(route)));

        Self {
            register: build(RateLimitedRoute::Register),
            login: build(RateLimitedRoute::Login),
            refresh: build(RateLimitedRoute::Refresh),
            logout: build(RateLimitedRoute::Logout),
            profile: build(RateLimitedRoute::Profile),
        }
    }

    pub fn limiter(&self, route: RateLimitedRoute) -> Arc<RouteBucket> {
        match route {
            RateLimitedRoute::Register => self.register.clone(),
            RateLimitedRoute::Login => self.login.clone(),
            RateLimitedRoute::Refresh => self.refresh.clone(),
            RateLimitedRoute::Logout => self.logout.clone(),
            RateLimitedRoute::Profile => self.profile.clone(),
        }
    }

    /// 라우트 미들웨어 생성
    pub fn guard(&self, route: RateLimitedRoute) -> RateLimit {
        RateLimit::new(route, self.limiter(route))
    }
}

/// 호출 예산 미들웨어
pub struct RateLimit {
    route: RateLimitedRoute,
    limiter: Arc<RouteBucket>,
}

impl RateLimit {
    pub fn new(route: RateLimitedRoute, limiter: Arc<RouteBucket>) -> Self {
        Self { route, limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service: Rc::new(service),
            route: self.route,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitService<S> {
    service: Rc<S>,
    route: RateLimitedRoute,
    limiter: Arc<RouteBucket>,
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = client_identity(&req);

        if !self.limiter.check(&identity) {
            log::warn!("🚦 호출 한도 초과 - 라우트: {}, 클라이언트: {}", self.route.as_str(), identity);
            let response = AppError::RateLimitExceeded("Too many requests".to_string()).error_response();
            let (req, _) = req.into_parts();
            return Box::pin(async move { Ok(ServiceResponse::new(req, response).map_into_right_body()) });
        }

        let service = self.service.clone();
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
