use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{to_rfc3339, User};

/// 회원가입 응답 DTO (공개 필드만)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
}

impl From<&User> for RegisterResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
        }
    }
}

/// 토큰 발급 응답에 포함되는 사용자 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub is_active: bool,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            is_active: user.is_active,
        }
    }
}

/// 프로필 조회 응답의 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for ProfileUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            is_active: user.is_active,
            created_at: to_rfc3339(&user.created_at),
            updated_at: to_rfc3339(&user.updated_at),
        }
    }
}

/// 프로필 조회 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn sample_user() -> User {
        let mut user = User::new_local("user@example.com".to_string(), "secret-hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_profile_user_is_camel_case_without_hash() {
        let user = sample_user();
        let json = serde_json::to_value(ProfileUser::from(&user)).unwrap();

        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["isActive"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_register_response_exposes_only_id_and_email() {
        let user = sample_user();
        let json = serde_json::to_value(RegisterResponse::from(&user)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(json["id"], user.id_string().unwrap());
    }
}
