//! 메모리 기반 사용자 저장소
//!
//! `USER_STORE=memory`로 선택되며 테스트와 로컬 실행에 사용합니다.
//! 프로세스가 종료되면 데이터가 사라집니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::PrincipalStore;
use crate::core::errors::AppError;
use crate::domain::entities::users::User;

/// 메모리 사용자 저장소 (key: ObjectId hex)
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 활성 여부 변경 (테스트용 관리 기능)
    #[cfg(test)]
    pub fn set_active(&self, id: &str, is_active: bool) -> Result<(), AppError> {
        let mut users = self.write()?;
        match users.get_mut(id) {
            Some(user) => {
                user.is_active = is_active;
                user.updated_at = mongodb::bson::DateTime::now();
                Ok(())
            }
            None => Err(AppError::InternalError(format!("unknown user id {}", id))),
        }
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, User>>, AppError> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, User>>, AppError> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PrincipalStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.read()?.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.write()?;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id.to_hex(), user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_save_assigns_id_and_finds_by_email_and_id() {
        let store = InMemoryUserRepository::new();
        let saved = store
            .save(User::new_local("user@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let id = saved.id_string().unwrap();

        let by_email = store.find_by_email("user@example.com").await.unwrap().unwrap();
        let by_id = store.find_by_id(&id).await.unwrap().unwrap();

        assert_eq!(by_email.id, saved.id);
        assert_eq!(by_id.email, "user@example.com");
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryUserRepository::new();
        store
            .save(User::new_local("dup@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let result = store
            .save(User::new_local("dup@example.com".to_string(), "other".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_unknown_id_is_none() {
        let store = InMemoryUserRepository::new();
        assert!(store.find_by_id("not-an-object-id").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_set_active_updates_user() {
        let store = InMemoryUserRepository::new();
        let saved = store
            .save(User::new_local("user@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let id = saved.id_string().unwrap();

        store.set_active(&id, false).unwrap();

        assert!(!store.find_by_id(&id).await.unwrap().unwrap().is_active);
    }
}
