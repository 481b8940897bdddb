//! 공통 유틸리티
//!
//! - [`cookies`] - 환경별 쿠키 속성 정책
//! - [`client_ip`] - 프록시 헤더를 고려한 클라이언트 식별
//! - [`display_terminal`] - 부팅 과정 터미널 출력

pub mod client_ip;
pub mod cookies;
pub mod display_terminal;
