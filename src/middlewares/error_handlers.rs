//! 운영 환경 5xx 응답 일반화
//!
//! 서버 에러의 상세 내용은 [`AppError`](crate::core::AppError) 응답 생성 시 로그에 남고,
//! 클라이언트에는 `"Internal server error"`만 전달됩니다.
//!
//! ```rust,ignore
//! App::new().wrap(Condition::new(config.is_production(), error_handlers::server_errors()))
//! ```

use actix_web::dev::ServiceResponse;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::HttpResponse;

use crate::core::errors::GENERIC_SERVER_ERROR_MESSAGE;
use crate::domain::dto::api_response::ErrorEnvelope;

/// 모든 5xx 응답 본문을 일반화된 에러 봉투로 교체합니다.
pub fn server_errors<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler_server(genericize)
}

fn genericize<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let (req, _) = res.into_parts();
    let response = HttpResponse::build(status).json(ErrorEnvelope::new("InternalError", GENERIC_SERVER_ERROR_MESSAGE));

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppError;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    async fn failing() -> Result<HttpResponse, AppError> {
        Err(AppError::DatabaseError("connection refused on 10.0.0.3:27017".to_string()))
    }

    async fn rejected() -> Result<HttpResponse, AppError> {
        Err(AppError::ConflictError("Email already exists".to_string()))
    }

    #[actix_web::test]
    async fn test_server_error_message_is_hidden() {
        let app = test::init_service(
            App::new()
                .wrap(server_errors())
                .route("/fail", web::get().to(failing))
                .route("/conflict", web::get().to(rejected)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/fail").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["message"], GENERIC_SERVER_ERROR_MESSAGE);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/conflict").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["message"], "Email already exists");
    }
}
