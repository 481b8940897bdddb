use serde::{Deserialize, Serialize};

use crate::domain::dto::users::AuthUser;

/// 로그인/토큰 갱신 응답
///
/// `refresh_token`은 MOBILE 채널에서만 본문에 포함됩니다.
/// WEB 채널은 `Set-Cookie`로만 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
    pub user: AuthUser,
}

/// 모바일 클라이언트의 로컬 토큰 정리 지시
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutCleanup {
    pub clear_tokens: bool,
    pub token_types: Vec<String>,
}

/// 로그아웃 응답
///
/// WEB 채널은 빈 객체(`{}`)를 받습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_out_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<LogoutCleanup>,
}

impl LogoutResponse {
    pub fn web() -> Self {
        Self::default()
    }

    pub fn mobile(logged_out_at: String) -> Self {
        Self {
            message: Some("Logged out successfully".to_string()),
            logged_out_at: Some(logged_out_at),
            cleanup: Some(LogoutCleanup {
                clear_tokens: true,
                token_types: vec!["accessToken".to_string(), "refreshToken".to_string()],
            }),
        }
    }
}
