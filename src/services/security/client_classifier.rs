//! 클라이언트 채널 분류기
//!
//! 판별 순서:
//! 1. `X-Client-Type` 헤더 (`mobile` / `web`, 대소문자와 공백 무시)
//! 2. User-Agent에 네이티브/하이브리드 앱 시그니처 포함 → MOBILE
//! 3. User-Agent에 브라우저 엔진 토큰 포함 → WEB
//! 4. 그 외 → WEB
//!
//! 부팅 시 하나만 만들어 CSRF 우회 판단과 토큰 정책이 공유합니다.

use actix_web::http::header::{HeaderMap, USER_AGENT};

use crate::config::ClientConfig;
use crate::domain::models::ChannelType;

pub const CLIENT_TYPE_HEADER: &str = "x-client-type";

/// 네이티브 식별자, 크로스 플랫폼 프레임워크, 모바일 HTTP 클라이언트
const MOBILE_SIGNATURES: &[&str] = &[
    "ios-app",
    "android-app",
    "mobile-app",
    "react-native",
    "flutter",
    "xamarin",
    "cordova",
    "phonegap",
    "expo",
    "capacitor",
    "okhttp",
    "alamofire",
    "retrofit",
];

const BROWSER_TOKENS: &[&str] = &["mozilla", "webkit", "chrome", "safari", "firefox", "edge", "opera"];

/// 요청 헤더 기반 채널 분류기
#[derive(Debug, Clone, Default)]
pub struct ClientClassifier {
    /// 자사 앱 User-Agent 식별자 (소문자)
    app_identifiers: Vec<String>,
}

impl ClientClassifier {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            app_identifiers: config.mobile_app_identifiers.clone(),
        }
    }

    /// 헤더 값만으로 채널을 판별합니다. 어떤 입력에도 실패하지 않습니다.
    pub fn classify(&self, client_type: Option<&str>, user_agent: Option<&str>) -> ChannelType {
        if let Some(explicit) = client_type {
            match explicit.trim().to_lowercase().as_str() {
                "mobile" => return ChannelType::Mobile,
                "web" => return ChannelType::Web,
                _ => {}
            }
        }

        let ua = user_agent.unwrap_or_default().to_lowercase();
        if ua.is_empty() {
            return ChannelType::Web;
        }

        let is_app = MOBILE_SIGNATURES.iter().any(|sig| ua.contains(sig))
            || self.app_identifiers.iter().any(|id| ua.contains(id.as_str()));
        if is_app {
            return ChannelType::Mobile;
        }

        if BROWSER_TOKENS.iter().any(|token| ua.contains(token)) {
            return ChannelType::Web;
        }

        ChannelType::Web
    }

    /// actix 요청 헤더 어댑터
    pub fn classify_request(&self, headers: &HeaderMap) -> ChannelType {
        let client_type = headers.get(CLIENT_TYPE_HEADER).and_then(|v| v.to_str().ok());
        let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

        self.classify(client_type, user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    const DESKTOP_CHROME: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    #[test]
    fn test_explicit_mobile_header_overrides_browser_user_agent() {
        let classifier = ClientClassifier::default();

        for value in ["mobile", "MOBILE", "  Mobile  ", "\tmObIlE\n"] {
            assert_eq!(classifier.classify(Some(value), Some(DESKTOP_CHROME)), ChannelType::Mobile);
        }
    }

    #[test]
    fn test_explicit_web_header_overrides_app_user_agent() {
        let classifier = ClientClassifier::default();
        assert_eq!(classifier.classify(Some("web"), Some("okhttp/4.9.0")), ChannelType::Web);
    }

    #[test]
    fn test_unknown_client_type_falls_back_to_user_agent() {
        let classifier = ClientClassifier::default();
        assert_eq!(classifier.classify(Some("tablet"), Some("Flutter/3.0")), ChannelType::Mobile);
    }

    #[test]
    fn test_app_signatures_are_mobile() {
        let classifier = ClientClassifier::default();

        for ua in ["okhttp/4.12.0", "Alamofire/5.8", "react-native/0.72", "Expo/2.0 CFNetwork", "MyShop iOS-App/3.1"] {
            assert_eq!(classifier.classify(None, Some(ua)), ChannelType::Mobile, "ua: {}", ua);
        }
    }

    #[test]
    fn test_configured_app_identifier_is_mobile() {
        let classifier = ClientClassifier::new(&ClientConfig {
            mobile_app_identifiers: vec!["channelapp".to_string()],
        });

        assert_eq!(classifier.classify(None, Some("ChannelApp/1.2 (iPhone)")), ChannelType::Mobile);
    }

    #[test]
    fn test_browser_and_unknown_are_web() {
        let classifier = ClientClassifier::default();

        assert_eq!(classifier.classify(None, Some(DESKTOP_CHROME)), ChannelType::Web);
        assert_eq!(classifier.classify(None, Some("curl/8.0")), ChannelType::Web);
        assert_eq!(classifier.classify(None, None), ChannelType::Web);
    }

    #[test]
    fn test_classify_request_reads_headers() {
        let classifier = ClientClassifier::default();
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(CLIENT_TYPE_HEADER), HeaderValue::from_static("Mobile"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_CHROME));

        assert_eq!(classifier.classify_request(&headers), ChannelType::Mobile);
    }
}
