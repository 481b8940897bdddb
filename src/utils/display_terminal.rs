//! 터미널 출력 포맷팅 유틸리티
//!
//! 부팅 과정에서 단계별 진행 상황과 최종 구성을 출력합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  System Started                  ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// `→ Step 1: ...` 형식으로 단계 시작을 출력합니다
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 단계의 세부 항목을 출력합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부팅 완료 요약
pub fn print_boot_summary(environment: &str, store: &str, csrf: &str, bind_address: &str) {
    println!();
    print_boxed_title("🎉 CHANNEL AUTH READY");
    println!("   🌍 Environment: {}", environment);
    println!("   🗄️ User store: {}", store);
    println!("   🛡️ CSRF: {}", csrf);
    println!("   🚀 Listening: http://{}", bind_address);
    println!();
}
