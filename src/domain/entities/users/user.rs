//! User Entity Implementation
//!
//! 인증 주체(Principal) 엔티티입니다. 외부 사용자 저장소가 소유하며,
//! 이 계층은 id/email 조회와 신규 저장만 수행합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `password_hash`는 bcrypt 해시이며 어떤 응답에도 포함되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 계정 활성화 여부. 비활성 사용자는 로그인과 토큰 검증이 모두 거부됩니다.
    pub is_active: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    ///
    /// 비밀번호는 호출 전에 이미 해싱되어 있어야 합니다.
    pub fn new_local(email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

/// bson `DateTime`을 RFC 3339 문자열로 변환합니다.
pub fn to_rfc3339(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user_is_active_without_id() {
        let user = User::new_local("user@example.com".to_string(), "$2b$04$hash".to_string());

        assert!(user.is_active);
        assert!(user.id_string().is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_id_string_is_hex() {
        let mut user = User::new_local("user@example.com".to_string(), "hash".to_string());
        let id = ObjectId::new();
        user.id = Some(id);

        assert_eq!(user.id_string(), Some(id.to_hex()));
    }
}
