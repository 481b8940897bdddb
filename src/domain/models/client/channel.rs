//! 클라이언트 채널 타입
//!
//! 요청마다 헤더로부터 파생되며 저장되지 않습니다.
//! 브라우저(WEB)는 쿠키 저장소와 CSRF 노출을, 네이티브 앱(MOBILE)은
//! Bearer 토큰 저장소를 사용합니다.

use std::fmt;
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::services::security::ClientClassifier;

/// 호출 클라이언트 채널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelType {
    Web,
    Mobile,
}

impl ChannelType {
    pub fn is_mobile(&self) -> bool {
        matches!(self, ChannelType::Mobile)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Web => write!(f, "WEB"),
            ChannelType::Mobile => write!(f, "MOBILE"),
        }
    }
}

/// 핸들러 인자로 채널을 추출합니다.
///
/// 부팅 시 등록된 공유 [`ClientClassifier`]로 분류하므로 CSRF 우회 판단과
/// 토큰 TTL/전달 정책이 항상 같은 결과를 봅니다.
impl FromRequest for ChannelType {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.app_data::<web::Data<ClientClassifier>>() {
            Some(classifier) => ready(Ok(classifier.classify_request(req.headers()))),
            None => ready(Err(AppError::InternalError(
                "ClientClassifier가 등록되지 않았습니다".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelType::Web.to_string(), "WEB");
        assert_eq!(ChannelType::Mobile.to_string(), "MOBILE");
        assert!(ChannelType::Mobile.is_mobile());
        assert!(!ChannelType::Web.is_mobile());
    }
}
