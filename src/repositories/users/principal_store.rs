use async_trait::async_trait;

use crate::core::errors::AppError;
use crate::domain::entities::users::User;

/// 사용자(Principal) 저장소 인터페이스
///
/// id/email 조회와 신규 저장만 제공합니다. 비밀번호는 저장 전에 해싱되어 있어야 합니다.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// 이메일로 조회. 비활성 사용자도 반환합니다.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// ID로 조회. 형식이 맞지 않는 ID는 `Ok(None)`입니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자 저장. 이메일이 이미 있으면 `ConflictError`입니다.
    async fn save(&self, user: User) -> Result<User, AppError>;
}
