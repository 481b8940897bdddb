//! JWT 인증 토큰 클레임 및 발급 결과
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키와 TTL로 서명되며,
//! `type` 클레임으로 용도를 구분합니다. 올바르게 서명되었더라도
//! 타입이 다르면 서로 대체할 수 없습니다.
use serde::{Deserialize, Serialize};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// API 호출용 단기 토큰
    Access,
    /// 토큰 쌍 재발급 전용 장기 토큰
    Refresh,
}

impl TokenKind {
    /// `type` 클레임 값
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// 액세스 토큰 클레임 (서명용)
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    pub email: String,
    /// 항상 `"access"`
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// 리프레시 토큰 클레임 (서명용)
///
/// `jti`는 발급마다 새로 생성되지만 서버에 저장되지 않습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub email: String,
    /// 항상 `"refresh"`
    #[serde(rename = "type")]
    pub token_type: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// 검증 시 디코딩되는 공통 클레임
///
/// 타입 검사를 서명 검증 이후에 명시적으로 수행하기 위해
/// 두 토큰 모두를 받아들일 수 있는 느슨한 형태로 디코딩합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// 토큰 쌍 발급 결과
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// 액세스 토큰 (항상 응답 본문으로 전달)
    pub access_token: String,
    /// 리프레시 토큰 (채널에 따라 본문 또는 쿠키로 전달)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
    /// 리프레시 토큰 만료 시간 (초)
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_claim_values() {
        assert_eq!(TokenKind::Access.as_str(), "access");
        assert_eq!(TokenKind::Refresh.as_str(), "refresh");
    }

    #[test]
    fn test_access_claims_decode_as_loose_claims() {
        let claims = AccessClaims {
            sub: "abc".to_string(),
            email: "user@example.com".to_string(),
            token_type: "access".to_string(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "access");

        let loose: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(loose.token_type, "access");
        assert!(loose.iss.is_none());
        assert!(loose.aud.is_none());
    }
}
