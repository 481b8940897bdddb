//! 채널 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 사용자 저장소, 토큰 서비스, CSRF 가드를 조립한 뒤
//! Actix-web HTTP 서버를 구동합니다. 설정 오류 시 0이 아닌 코드로 종료합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{self, Condition};
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use channel_auth_backend::config::{AppConfig, CorsConfig, UserStoreKind};
use channel_auth_backend::core::{AppError, AppState};
use channel_auth_backend::db::Database;
use channel_auth_backend::middlewares::error_handlers;
use channel_auth_backend::repositories::{InMemoryUserRepository, MongoUserRepository, PrincipalStore};
use channel_auth_backend::routes::configure_all_routes;
use channel_auth_backend::services::security::CSRF_TOKEN_HEADERS;
use channel_auth_backend::utils::display_terminal::{print_boot_summary, print_step_start, print_sub_task};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 채널 인증 서비스 시작중...");

    let state = match bootstrap().await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ 부팅 실패: {}", e);
            std::process::exit(1);
        }
    };

    start_http_server(state).await
}

/// 설정 로드 → 사용자 저장소 → 서비스 조립
async fn bootstrap() -> Result<AppState, AppError> {
    print_step_start(1, "Loading configuration");
    let config = AppConfig::from_env()?;
    print_sub_task("Environment", &format!("{:?}", config.environment));

    print_step_start(2, "Preparing user store");
    let store = initialize_user_store(&config).await?;

    print_step_start(3, "Assembling services");
    let state = AppState::build(config, store)?;
    print_sub_task(
        "CSRF",
        if state.csrf.is_enabled() { "enabled" } else { "disabled (fail-open)" },
    );

    Ok(state)
}

/// `USER_STORE` 설정에 따라 MongoDB 또는 인메모리 저장소를 준비합니다.
async fn initialize_user_store(config: &AppConfig) -> Result<Arc<dyn PrincipalStore>, AppError> {
    match config.database.store {
        UserStoreKind::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect(&config.database).await?;
            let repository = MongoUserRepository::new(&database);
            repository.create_indexes().await?;
            print_sub_task("MongoDB", database.database_name());
            Ok(Arc::new(repository))
        }
        UserStoreKind::Memory => {
            info!("🗄️ 인메모리 사용자 저장소 사용");
            print_sub_task("Memory", "in-process");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 접근 로그, 경로 정규화, 운영 환경 5xx 일반화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", state.config.server.host, state.config.server.port);

    print_boot_summary(
        &format!("{:?}", state.config.environment),
        match state.config.database.store {
            UserStoreKind::Mongo => "mongo",
            UserStoreKind::Memory => "memory",
        },
        if state.csrf.is_enabled() { "enabled" } else { "disabled" },
        &bind_address,
    );
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        let production = state.config.is_production();
        let cors = configure_cors(&state.config.cors);

        App::new()
            .wrap(Condition::new(production, error_handlers::server_errors()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes(state.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=channel_auth_backend::middlewares=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// `CORS_ORIGINS`의 출처만 허용하며 쿠키 전송을 위해 자격 증명을 지원합니다.
/// CSRF 토큰 헤더는 허용하는 별칭 모두를 프리플라이트에서 통과시킵니다.
fn configure_cors(config: &CorsConfig) -> Cors {
    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    CSRF_TOKEN_HEADERS
        .iter()
        .fold(cors, |cors, name| cors.allowed_header(*name))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .allowed_header("x-client-type")
        .expose_headers(vec!["x-csrf-skipped", "x-csrf-disabled-reason"])
        .supports_credentials()
        .max_age(3600)
}
