use serde::{Deserialize, Serialize};

/// CSRF 토큰 발급 응답
///
/// 가드가 비활성화된 경우 `csrf_token`은 `"csrf-disabled"`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// CSRF 가드 상태 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfStatusResponse {
    pub enabled: bool,
    pub fail_open: bool,
    /// 활성 상태에서는 빈 문자열
    pub reason: String,
}
