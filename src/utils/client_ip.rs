//! 클라이언트 식별자 추출
//!
//! 우선순위: `X-Forwarded-For`의 첫 주소 → `X-Real-IP` → 소켓 peer 주소 → `"unknown"`

use actix_web::dev::ServiceRequest;
use actix_web::http::header::HeaderMap;

pub const UNKNOWN_CLIENT: &str = "unknown";

/// 프록시 헤더에서 클라이언트 IP를 읽습니다.
pub fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if forwarded.is_some() {
        return forwarded.map(str::to_string);
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// 요청의 추적 대상 클라이언트 식별자
pub fn client_identity(req: &ServiceRequest) -> String {
    forwarded_ip(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_wins_over_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for".parse().unwrap(), HeaderValue::from_static("1.2.3.4, 5.6.7.8"));
        headers.insert("x-real-ip".parse().unwrap(), HeaderValue::from_static("9.9.9.9"));

        assert_eq!(forwarded_ip(&headers), Some("1.2.3.4".to_string()));
    }

    #[test]
    fn test_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip".parse().unwrap(), HeaderValue::from_static("9.9.9.9"));

        assert_eq!(forwarded_ip(&headers), Some("9.9.9.9".to_string()));
    }

    #[test]
    fn test_client_identity_uses_peer_then_unknown() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.7:5000".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_identity(&req), "10.0.0.7");

        let req = TestRequest::default().to_srv_request();
        assert_eq!(client_identity(&req), UNKNOWN_CLIENT);
    }
}
